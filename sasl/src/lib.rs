//! Credential-exchange utilities library
//!
//! Provides the mechanism-independent pieces of authentication:
//! - The registry of supported SASL/legacy mechanisms
//! - Legacy stream digests (SHA-1 over stream id and password)
//! - DIGEST-MD5 user/realm/secret hashing
//!
//! The host server and the user manager both consume this crate; it performs
//! no I/O and holds no state.
//!
//! # Examples
//!
//! ## Mechanism registry
//! ```
//! use sasl::Mechanism;
//!
//! let mechanism: Mechanism = "DIGEST-MD5".parse().unwrap();
//! assert_eq!(mechanism, Mechanism::DigestMd5);
//! assert!("FOO".parse::<Mechanism>().is_err());
//! ```
//!
//! ## Legacy stream digest
//! ```
//! use sasl::digest::stream_digest;
//! use sasl::digest::digests_match;
//!
//! let digest = stream_digest("3EE948B0", "Calli0pe");
//! assert_eq!(digest, "48fc78be9ec8f86d8ce1c39c320c97c21d62334d");
//! assert!(digests_match(&digest, &digest.to_uppercase()));
//! ```
//!
//! ## DIGEST-MD5 secret hash
//! ```
//! use sasl::digest::user_realm_secret_hash;
//!
//! let hash = user_realm_secret_hash("chris", "elwood.innosoft.com", "secret");
//! assert_eq!(hash, "eb5a750053e4d2c34aa84bbc9b0b6ee7");
//! ```

pub mod digest;
pub mod mechanism;

// Re-export commonly used items
pub use mechanism::Mechanism;
pub use mechanism::UnsupportedMechanismError;
