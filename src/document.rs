//! # DID Document
//!
//! A DID Document is a JSON-LD document that contains information related to a
//! DID. A `did:key` document is generated from the public key in the DID and
//! is never stored.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::jwk::PublicKeyJwk;

/// Base DID document context.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// Context for `JsonWebKey2020` verification methods.
pub const JWS_2020_CONTEXT: &str = "https://w3id.org/security/suites/jws-2020/v1";

/// Context for `X25519KeyAgreementKey2019` key agreement methods.
pub const X25519_2019_CONTEXT: &str = "https://w3id.org/security/suites/x25519-2019/v1";

/// DID Document
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The context of the DID document. Omitted from the `application/did+json`
    /// representation.
    #[serde(rename = "@context")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,

    /// The DID for a particular DID subject.
    pub id: String,

    /// Verification methods for the DID subject.
    pub verification_method: Vec<VerificationMethod>,

    /// The `authentication` verification relationship is used to specify how
    /// the DID subject is expected to be authenticated.
    ///
    /// <https://www.w3.org/TR/did-core/#authentication>
    pub authentication: Vec<String>,

    /// The `assertion_method` verification relationship is used to specify how
    /// the DID subject is expected to express claims, such as for the
    /// purposes of issuing a Verifiable Credential.
    ///
    /// <https://www.w3.org/TR/did-core/#assertion>
    pub assertion_method: Vec<String>,

    /// The `capability_delegation` verification relationship is used to specify
    /// a mechanism that might be used by the DID subject to delegate a
    /// cryptographic capability to another party.
    ///
    /// <https://www.w3.org/TR/did-core/#capability-delegation>
    pub capability_delegation: Vec<String>,

    /// The `capability_invocation` verification relationship is used to specify
    /// a verification method that might be used by the DID subject to
    /// invoke a cryptographic capability.
    ///
    /// <https://www.w3.org/TR/did-core/#capability-invocation>
    pub capability_invocation: Vec<String>,

    /// The `key_agreement` verification relationship is used to specify how an
    /// entity can generate encryption material in order to transmit
    /// confidential information intended for the DID subject.
    ///
    /// Only present for Ed25519 keys.
    ///
    /// <https://www.w3.org/TR/did-core/#key-agreement>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_agreement: Option<Vec<VerificationMethod>>,
}

impl Document {
    /// Find a verification or key agreement method by its DID URL.
    #[must_use]
    pub fn get_verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method
            .iter()
            .chain(self.key_agreement.iter().flatten())
            .find(|vm| vm.id == id)
    }
}

/// A verification method binds a public key to the DID subject.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct VerificationMethod {
    /// A DID URL that identifies the verification method.
    pub id: String,

    /// The type of verification method.
    #[serde(rename = "type")]
    pub type_: MethodType,

    /// The DID of the controller of the verification method.
    pub controller: String,

    /// The public key material.
    #[serde(flatten)]
    pub key: PublicKeyFormat,
}

/// The format of the public key material.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all_fields = "camelCase")]
#[serde(untagged)]
pub enum PublicKeyFormat {
    /// The key is encoded as a JWK.
    PublicKeyJwk {
        /// The public key encoded as a JWK.
        public_key_jwk: PublicKeyJwk,
    },

    /// The raw key is encoded as (non-multibase) base58-btc.
    PublicKeyBase58 {
        /// The base58-btc encoded public key.
        public_key_base58: String,
    },
}

impl Default for PublicKeyFormat {
    fn default() -> Self {
        Self::PublicKeyJwk {
            public_key_jwk: PublicKeyJwk::default(),
        }
    }
}

/// Verification method types produced by `did:key` resolution.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub enum MethodType {
    /// JSON Web Key (JWK), version 2020.
    #[default]
    JsonWebKey2020,

    /// `X25519` Key Agreement Key, version 2019.
    X25519KeyAgreementKey2019,
}

impl Display for MethodType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonWebKey2020 => write!(f, "JsonWebKey2020"),
            Self::X25519KeyAgreementKey2019 => write!(f, "X25519KeyAgreementKey2019"),
        }
    }
}

/// DID document metadata. A `did:key` document is derived from the DID alone
/// so there is no creation or update history to report.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DocumentMetadata {}
