use thiserror::Error;

/// Error for identifier construction and parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JabberIdError {
    #[error("Identifier has no '@' separator")]
    MissingSeparator,

    #[error("Identifier local part is empty")]
    EmptyLocalPart,

    #[error("Identifier domain part is empty")]
    EmptyDomain,
}

/// Infrastructure failure talking to the credential store.
///
/// Both variants are retryable from the host's point of view: they mean
/// "cannot determine authentication", never "authentication failed".
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    #[error("Credential store query failed: {0}")]
    Query(String),
}

/// Top-level error for authentication operations.
///
/// Failed verification is not represented here: it is a normal outcome,
/// returned as an unauthenticated `Principal`.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Only raised by operations that require the account to exist before a
    /// credential comparison is possible (secret-hash derivation).
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
