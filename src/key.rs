//! # DID Key
//!
//! The `did:key` method is a DID method for static cryptographic keys. At its
//! core, it is based on expanding a cryptographic public key into a DID
//! Document.
//!
//! A [`DidKeyDriver`] binds one [`Algorithm`] and exposes identifier creation
//! and key operations for it, along with the method resolver for
//! registration with a [`Resolver`](crate::resolve::Resolver).
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-key>
//! - <https://w3c.github.io/did-resolution>

mod resolver;

pub use resolver::resolve;

use crate::alg::{AlgName, Algorithm, Issuer, KeyPair, KeySigner};
use crate::resolve::{ResolveFn, ResolverRegistry};

/// The DID method name handled by this module.
pub const METHOD: &str = "key";

/// Construct a `did:key` DID from a multibase-encoded public key.
#[must_use]
pub fn did_from_multibase(multibase: &str) -> String {
    format!("did:{METHOD}:{multibase}")
}

/// Get the driver for the signature scheme named by `alg`.
#[must_use]
pub fn driver(alg: AlgName) -> DidKeyDriver {
    DidKeyDriver::new(alg.into())
}

/// `did:key` operations for a single signature scheme.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DidKeyDriver {
    alg: Algorithm,
}

impl DidKeyDriver {
    /// Create a driver bound to `alg`.
    #[must_use]
    pub const fn new(alg: Algorithm) -> Self {
        Self { alg }
    }

    /// The algorithm the driver is bound to.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.alg
    }

    /// Construct a DID from a public key.
    #[must_use]
    pub fn did_from_public_key(&self, public_key: &[u8]) -> String {
        did_from_multibase(&self.alg.multibase_from_public_key(public_key))
    }

    /// Generate a new key pair.
    #[must_use]
    pub fn generate_key_pair(&self) -> KeyPair {
        self.alg.generate_key_pair()
    }

    /// Rebuild a key pair from its secret key.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is not valid for the scheme.
    pub fn key_pair_from_secret_key(&self, secret_key: &[u8]) -> crate::Result<KeyPair> {
        self.alg.key_pair_from_secret_key(secret_key)
    }

    /// Create a signer from a secret key.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is not valid for the scheme.
    pub fn signer_from_secret_key(&self, secret_key: &[u8]) -> crate::Result<KeySigner> {
        self.alg.signer_from_secret_key(secret_key)
    }

    /// Create an issuer (DID, signer and algorithm name) for a key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is not valid for the scheme.
    pub fn issuer_from_key_pair(&self, key_pair: &KeyPair) -> crate::Result<Issuer> {
        self.alg.issuer_from_key_pair(key_pair)
    }

    /// The `did:key` resolver keyed by method name.
    ///
    /// Resolution dispatches on the DID's multibase prefix, so the registry
    /// entry is the same for every driver.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn resolver_registry(&self) -> ResolverRegistry {
        ResolverRegistry::from([(METHOD.to_string(), resolve as ResolveFn)])
    }
}
