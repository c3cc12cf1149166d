use std::{fmt, net::IpAddr, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// IP range assigned to the cluster, in `addr/prefix` notation.
///
/// The node controller carves per-node ranges out of it when CIDR allocation is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClusterCidr {
    addr: IpAddr,
    prefix: u8,
}

impl ClusterCidr {
    /// Build a CIDR from its parts, checking the prefix against the address family.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Self, ModelError> {
        let max = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix > max {
            return Err(ModelError::InvalidCidr(format!(
                "{addr}/{prefix}: prefix exceeds {max}"
            )));
        }
        Ok(Self { addr, prefix })
    }

    #[inline]
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    #[inline]
    pub fn prefix(&self) -> u8 {
        self.prefix
    }
}

impl FromStr for ClusterCidr {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (addr, prefix) = trimmed
            .split_once('/')
            .ok_or_else(|| ModelError::InvalidCidr(format!("{s}: missing '/<prefix>'")))?;

        let addr = addr
            .parse::<IpAddr>()
            .map_err(|e| ModelError::InvalidCidr(format!("{s}: {e}")))?;
        let prefix = prefix
            .parse::<u8>()
            .map_err(|e| ModelError::InvalidCidr(format!("{s}: {e}")))?;

        Self::new(addr, prefix)
    }
}

impl TryFrom<String> for ClusterCidr {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClusterCidr> for String {
    fn from(c: ClusterCidr) -> Self {
        c.to_string()
    }
}

impl fmt::Display for ClusterCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}
