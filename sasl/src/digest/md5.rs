use md5::Digest;
use md5::Md5;

/// Compute the reusable DIGEST-MD5 secret hash.
///
/// This is the `H(username:realm:passwd)` value of RFC 2831: the one piece
/// of secret material the server must be able to produce to run DIGEST-MD5
/// without holding the password in a reversible form. It can be precomputed
/// at account-creation time and stored in place of the password.
///
/// # Arguments
/// * `user` - Local part of the identifier
/// * `realm` - Realm (the domain scope of the secret)
/// * `secret` - Plain-text secret
///
/// # Returns
/// Lowercase hex MD5 of `user:realm:secret`
pub fn user_realm_secret_hash(user: &str, realm: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(user.as_bytes());
    hasher.update(b":");
    hasher.update(realm.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
