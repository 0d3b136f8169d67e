//! # DID Key
//!
//! A `did:key` method driver: encodes public keys as `did:key` identifiers,
//! manages key pairs and signers for Ed25519, secp256k1 and P-256, and
//! resolves `did:key` identifiers into DID documents.
//!
//! ```rust,ignore
//! use credibil_didkey::{AlgName, Options, Resolver, driver};
//!
//! let driver = driver(AlgName::EdDsa);
//! let key_pair = driver.generate_key_pair();
//! let did = driver.did_from_public_key(&key_pair.public_key);
//!
//! let resolver = Resolver::new(driver.resolver_registry());
//! let resolved = resolver.resolve(&did, &Options::default());
//! ```
//!
//! See [DID resolution](https://w3c.github.io/did-resolution) for more.

pub mod codec;
pub mod key;

mod alg;
mod document;
mod error;
mod jwk;
mod resolve;
mod url;

pub use self::alg::*;
pub use self::document::*;
pub use self::error::Error;
pub use self::jwk::*;
pub use self::key::{DidKeyDriver, did_from_multibase, driver};
pub use self::resolve::*;
pub use self::url::ParsedDid;

/// Result type for `did:key` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
