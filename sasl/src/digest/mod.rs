pub mod legacy;
pub mod md5;

pub use legacy::digests_match;
pub use legacy::stream_digest;
pub use md5::user_realm_secret_hash;
