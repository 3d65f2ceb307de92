use std::fmt;
use std::str::FromStr;

/// Credential-exchange mechanisms the user manager knows how to serve.
///
/// The set is closed: a name outside it is a configuration error, never
/// silently dropped, since dropping one would change the server's advertised
/// capabilities without warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mechanism {
    /// SASL/PLAIN and legacy plain-text auth (password on the wire)
    Plain,
    /// SASL/DIGEST-MD5 (RFC 2831)
    DigestMd5,
    /// SASL/ANONYMOUS (no credentials, unauthenticated principal)
    Anonymous,
}

impl Mechanism {
    /// Get the mechanism name as advertised in stream features
    pub fn name(&self) -> &'static str {
        match self {
            Mechanism::Plain => "PLAIN",
            Mechanism::DigestMd5 => "DIGEST-MD5",
            Mechanism::Anonymous => "ANONYMOUS",
        }
    }

    /// Whether verifying this mechanism requires the credential store
    pub fn requires_store(&self) -> bool {
        !matches!(self, Mechanism::Anonymous)
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for mechanism names outside the supported set.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported mechanism: {0}")]
pub struct UnsupportedMechanismError(pub String);

impl FromStr for Mechanism {
    type Err = UnsupportedMechanismError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "PLAIN" => Ok(Mechanism::Plain),
            "DIGEST-MD5" => Ok(Mechanism::DigestMd5),
            "ANONYMOUS" => Ok(Mechanism::Anonymous),
            _ => Err(UnsupportedMechanismError(name.to_string())),
        }
    }
}
