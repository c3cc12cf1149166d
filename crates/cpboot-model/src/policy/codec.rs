use serde::Deserialize;
use serde_json::Value;

use crate::{SchedulerPolicy, error::CodecError};

/// Document kind carried by every policy document.
pub const POLICY_KIND: &str = "Policy";

/// The single policy schema version understood by this build.
pub const POLICY_API_VERSION: &str = "v1";

/// Leading fields inspected before the full document is decoded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeMeta {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    api_version: String,
}

/// Versioned JSON codec for [`SchedulerPolicy`] documents.
///
/// Decoding checks the type metadata first so that a document written for another
/// schema version fails loudly instead of being half-understood.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyCodec;

impl PolicyCodec {
    pub fn new() -> Self {
        Self
    }

    /// Schema version this codec decodes and encodes.
    #[inline]
    pub fn version(&self) -> &'static str {
        POLICY_API_VERSION
    }

    /// Decode a policy document.
    ///
    /// Rules:
    /// - input is not empty or whitespace-only;
    /// - input is a JSON object;
    /// - `apiVersion` is present and equals [`POLICY_API_VERSION`];
    /// - `kind`, when present, equals [`POLICY_KIND`].
    ///
    /// Unknown fields are ignored.
    pub fn decode(&self, data: &[u8]) -> Result<SchedulerPolicy, CodecError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(CodecError::Empty);
        }

        let doc: Value =
            serde_json::from_slice(data).map_err(|e| CodecError::Malformed(e.to_string()))?;
        if !doc.is_object() {
            return Err(CodecError::Malformed(format!(
                "expected a JSON object, found {}",
                json_type(&doc)
            )));
        }

        let meta =
            TypeMeta::deserialize(&doc).map_err(|e| CodecError::Malformed(e.to_string()))?;

        if meta.api_version.is_empty() {
            return Err(CodecError::MissingVersion);
        }
        if meta.api_version != POLICY_API_VERSION {
            return Err(CodecError::UnsupportedVersion {
                found: meta.api_version,
                expected: POLICY_API_VERSION,
            });
        }
        if !meta.kind.is_empty() && meta.kind != POLICY_KIND {
            return Err(CodecError::UnexpectedKind {
                found: meta.kind,
                expected: POLICY_KIND,
            });
        }

        let mut policy: SchedulerPolicy =
            serde_json::from_value(doc).map_err(|e| CodecError::Malformed(e.to_string()))?;
        policy.kind = POLICY_KIND.to_string();
        Ok(policy)
    }

    /// Encode a policy, stamping the current kind and version.
    pub fn encode(&self, policy: &SchedulerPolicy) -> Result<Vec<u8>, CodecError> {
        let mut stamped = policy.clone();
        stamped.kind = POLICY_KIND.to_string();
        stamped.api_version = POLICY_API_VERSION.to_string();

        serde_json::to_vec_pretty(&stamped).map_err(|e| CodecError::Malformed(e.to_string()))
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
