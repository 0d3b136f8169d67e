//! # JSON Web Key
//!
//! Public key representation used in `JsonWebKey2020` verification methods.
//!
//! See <https://www.rfc-editor.org/rfc/rfc7517>

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Simplified JSON Web Key (JWK) for a public key.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PublicKeyJwk {
    /// Key type.
    pub kty: KeyType,

    /// Cryptographic curve.
    pub crv: Curve,

    /// The public key (OKP) or the X coordinate of the public key (EC),
    /// base64url encoded.
    pub x: String,

    /// The Y coordinate of the public key, base64url encoded. EC keys only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

/// Cryptographic key type.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum KeyType {
    /// Octet key pair (Edwards curve).
    #[default]
    #[serde(rename = "OKP")]
    Okp,

    /// Elliptic curve key pair.
    #[serde(rename = "EC")]
    Ec,
}

/// Cryptographic curve type.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum Curve {
    /// Ed25519 curve.
    #[default]
    Ed25519,

    /// secp256k1 curve.
    #[serde(rename = "secp256k1")]
    Secp256k1,

    /// NIST P-256 curve.
    #[serde(rename = "P-256")]
    P256,
}

impl Display for Curve {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => write!(f, "Ed25519"),
            Self::Secp256k1 => write!(f, "secp256k1"),
            Self::P256 => write!(f, "P-256"),
        }
    }
}
