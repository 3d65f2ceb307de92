use sha1::Digest;
use sha1::Sha1;

/// Compute the legacy (non-SASL) stream digest.
///
/// The client hashes the stream id it was issued at stream initiation
/// together with its password; the server recomputes the same value from the
/// stored secret and compares.
///
/// # Arguments
/// * `stream_id` - Session nonce issued by the server at stream start
/// * `password` - Plain-text secret
///
/// # Returns
/// Lowercase hex SHA-1 of `stream_id || password`
pub fn stream_digest(stream_id: &str, password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(stream_id.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two hex digests, ignoring hex-case differences.
///
/// Clients are free to send either hex case; the comparison must not be
/// sensitive to it.
pub fn digests_match(presented: &str, expected: &str) -> bool {
    presented.eq_ignore_ascii_case(expected)
}
