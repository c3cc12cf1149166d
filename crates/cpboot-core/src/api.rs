//! Operator-facing messages for the API surfaces activated at startup.
use std::fmt;

use cpboot_model::ApiOptions;

/// Legacy API prefix, only served when explicitly enabled.
pub const LEGACY_API_PREFIX: &str = "/api/v1beta3";
/// Current API prefix.
pub const API_PREFIX: &str = "/api/v1";

/// An activated API surface, rendered once the serving address is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupMessage {
    pub prefix: &'static str,
    pub deprecated: bool,
}

impl StartupMessage {
    pub fn render(&self, host: &str) -> String {
        format!("Started API at {host}{self}")
    }
}

impl fmt::Display for StartupMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix)?;
        if self.deprecated {
            f.write_str(" (deprecated)")?;
        }
        Ok(())
    }
}

/// Surfaces to announce, legacy first.
pub fn startup_messages(opts: &ApiOptions) -> Vec<StartupMessage> {
    let mut out = Vec::with_capacity(2);
    if opts.enable_v1beta3 {
        out.push(StartupMessage {
            prefix: LEGACY_API_PREFIX,
            deprecated: true,
        });
    }
    if !opts.disable_v1 {
        out.push(StartupMessage {
            prefix: API_PREFIX,
            deprecated: false,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_all(opts: ApiOptions) -> Vec<String> {
        startup_messages(&opts)
            .iter()
            .map(|m| m.render("https://10.0.0.1:8443"))
            .collect()
    }

    #[test]
    fn defaults_announce_only_v1() {
        assert_eq!(
            render_all(ApiOptions::default()),
            vec!["Started API at https://10.0.0.1:8443/api/v1"]
        );
    }

    #[test]
    fn legacy_surface_comes_first_and_is_marked() {
        let opts = ApiOptions {
            enable_v1beta3: true,
            disable_v1: false,
        };
        assert_eq!(
            render_all(opts),
            vec![
                "Started API at https://10.0.0.1:8443/api/v1beta3 (deprecated)",
                "Started API at https://10.0.0.1:8443/api/v1",
            ]
        );
    }

    #[test]
    fn everything_disabled_announces_nothing() {
        let opts = ApiOptions {
            enable_v1beta3: false,
            disable_v1: true,
        };
        assert!(startup_messages(&opts).is_empty());
    }
}
