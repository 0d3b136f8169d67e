//! # Key Algorithms
//!
//! The closed set of signature schemes usable with `did:key`: Ed25519,
//! secp256k1 and P-256. Each [`Algorithm`] variant provides key generation,
//! multibase encoding, signing and JWK conversion for its scheme.
//!
//! Adding a scheme means adding a variant here and a textual prefix to
//! [`codec`](crate::codec).

mod ed25519;
mod nistp256;
mod secp256k1;

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::codec::{self, ED25519_CODEC, P256_CODEC, SECP256K1_CODEC};
use crate::error::Error;
use crate::jwk::PublicKeyJwk;
use crate::key;

/// A public/secret key pair.
///
/// For Ed25519 the public key is 32 bytes and the secret key is the 64-byte
/// seed + public key. For secp256k1 and P-256 the public key is a 33-byte
/// compressed point and the secret key is the 32-byte scalar.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Public key bytes.
    pub public_key: Vec<u8>,

    /// Secret key bytes.
    pub secret_key: Vec<u8>,
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("secret_key", &"[redacted]")
            .finish()
    }
}

/// JOSE algorithm name of a signature scheme.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum AlgName {
    /// `EdDSA` using Ed25519.
    #[default]
    #[serde(rename = "EdDSA")]
    EdDsa,

    /// ECDSA using secp256k1 and SHA-256.
    #[serde(rename = "ES256K")]
    Es256K,

    /// ECDSA using P-256 and SHA-256.
    #[serde(rename = "ES256")]
    Es256,
}

impl Display for AlgName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdDsa => write!(f, "EdDSA"),
            Self::Es256K => write!(f, "ES256K"),
            Self::Es256 => write!(f, "ES256"),
        }
    }
}

impl FromStr for AlgName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EdDSA" => Ok(Self::EdDsa),
            "ES256K" => Ok(Self::Es256K),
            "ES256" => Ok(Self::Es256),
            _ => Err(Error::UnsupportedKeyType(format!(
                "The algorithm must be either EdDSA, ES256K, or ES256, but {s}"
            ))),
        }
    }
}

/// Signature schemes supported by `did:key`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Ed25519 (Edwards curve).
    #[default]
    Ed25519,

    /// secp256k1 (Weierstrass curve).
    Secp256k1,

    /// NIST P-256 (Weierstrass curve).
    P256,
}

impl From<AlgName> for Algorithm {
    fn from(name: AlgName) -> Self {
        match name {
            AlgName::EdDsa => Self::Ed25519,
            AlgName::Es256K => Self::Secp256k1,
            AlgName::Es256 => Self::P256,
        }
    }
}

impl Algorithm {
    /// The JOSE algorithm name used when signing with this scheme.
    #[must_use]
    pub const fn name(self) -> AlgName {
        match self {
            Self::Ed25519 => AlgName::EdDsa,
            Self::Secp256k1 => AlgName::Es256K,
            Self::P256 => AlgName::Es256,
        }
    }

    /// The multicodec prefix for public keys of this scheme.
    #[must_use]
    pub const fn codec(self) -> &'static [u8] {
        match self {
            Self::Ed25519 => &ED25519_CODEC,
            Self::Secp256k1 => &SECP256K1_CODEC,
            Self::P256 => &P256_CODEC,
        }
    }

    /// Length in bytes of an encoded public key.
    #[must_use]
    pub const fn public_key_len(self) -> usize {
        match self {
            Self::Ed25519 => ed25519::PUBLIC_KEY_LENGTH,
            Self::Secp256k1 | Self::P256 => 33,
        }
    }

    /// Select the scheme used to encode a multibase public key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKeyType`] if the multibase prefix is not
    /// one of the supported signing key types.
    pub fn from_multibase(multibase: &str) -> crate::Result<Self> {
        let codec = codec::codec_for(multibase)?;
        let alg = match codec {
            c if c == ED25519_CODEC => Self::Ed25519,
            c if c == SECP256K1_CODEC => Self::Secp256k1,
            c if c == P256_CODEC => Self::P256,
            _ => return Err(Error::UnsupportedKeyType(format!("unknown multicodec {codec:?}"))),
        };
        tracing::trace!(%multibase, ?alg, "selected algorithm");
        Ok(alg)
    }

    /// Generate a new key pair from a cryptographically secure random source.
    #[must_use]
    pub fn generate_key_pair(self) -> KeyPair {
        match self {
            Self::Ed25519 => ed25519::generate(),
            Self::Secp256k1 => secp256k1::generate(),
            Self::P256 => nistp256::generate(),
        }
    }

    /// Rebuild a key pair from its secret key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecretKey`] if the secret key is not valid for
    /// the scheme.
    pub fn key_pair_from_secret_key(self, secret_key: &[u8]) -> crate::Result<KeyPair> {
        match self {
            Self::Ed25519 => ed25519::from_secret(secret_key),
            Self::Secp256k1 => secp256k1::from_secret(secret_key),
            Self::P256 => nistp256::from_secret(secret_key),
        }
    }

    /// Encode a public key as a base58-btc multibase string.
    #[must_use]
    pub fn multibase_from_public_key(self, public_key: &[u8]) -> String {
        codec::encode(self.codec(), public_key)
    }

    /// Decode a base58-btc multibase string into a public key.
    ///
    /// # Errors
    ///
    /// Returns the codec's decoding errors, or [`Error::InvalidKeyLength`] if
    /// the decoded key is not the expected length for the scheme.
    pub fn public_key_from_multibase(self, multibase: &str) -> crate::Result<Vec<u8>> {
        let public_key = codec::decode(self.codec(), multibase)?;
        if public_key.len() != self.public_key_len() {
            return Err(Error::InvalidKeyLength(format!(
                "The public key must be {} bytes, but {}",
                self.public_key_len(),
                public_key.len()
            )));
        }
        Ok(public_key)
    }

    /// Create a signer from a secret key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecretKey`] if the secret key is not valid for
    /// the scheme.
    pub fn signer_from_secret_key(self, secret_key: &[u8]) -> crate::Result<KeySigner> {
        match self {
            Self::Ed25519 => ed25519::signer(secret_key).map(KeySigner::Ed25519),
            Self::Secp256k1 => secp256k1::signer(secret_key).map(KeySigner::Secp256k1),
            Self::P256 => nistp256::signer(secret_key).map(KeySigner::P256),
        }
    }

    /// Express a public key as a JWK.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] if the key cannot be decoded for
    /// the scheme.
    pub fn public_key_jwk(self, public_key: &[u8]) -> crate::Result<PublicKeyJwk> {
        match self {
            Self::Ed25519 => ed25519::jwk(public_key),
            Self::Secp256k1 => secp256k1::jwk(public_key),
            Self::P256 => nistp256::jwk(public_key),
        }
    }

    /// Derive the X25519 key agreement public key for a signing public key.
    ///
    /// Only Ed25519 keys have a key agreement key; `None` is returned for the
    /// other schemes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] if an Ed25519 key is not a valid
    /// curve point.
    pub fn key_agreement_key(self, public_key: &[u8]) -> crate::Result<Option<Vec<u8>>> {
        match self {
            Self::Ed25519 => ed25519::to_x25519(public_key).map(|k| Some(k.to_vec())),
            Self::Secp256k1 | Self::P256 => Ok(None),
        }
    }

    /// Verify a signature produced by this scheme's signer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] if the key cannot be decoded and
    /// [`Error::InvalidSignature`] if the signature does not verify.
    pub fn verify(self, public_key: &[u8], msg: &[u8], signature: &[u8]) -> crate::Result<()> {
        match self {
            Self::Ed25519 => ed25519::verify(public_key, msg, signature),
            Self::Secp256k1 => secp256k1::verify(public_key, msg, signature),
            Self::P256 => nistp256::verify(public_key, msg, signature),
        }
    }

    /// Bundle the DID, signer and algorithm name for a key pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecretKey`] if the secret key is not valid for
    /// the scheme.
    pub fn issuer_from_key_pair(self, key_pair: &KeyPair) -> crate::Result<Issuer> {
        Ok(Issuer {
            did: key::did_from_multibase(&self.multibase_from_public_key(&key_pair.public_key)),
            signer: self.signer_from_secret_key(&key_pair.secret_key)?,
            alg: self.name(),
        })
    }
}

/// Produces signatures over arbitrary messages.
pub trait Signer {
    /// The algorithm the signer uses.
    fn algorithm(&self) -> AlgName;

    /// Sign the message, returning the raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be signed.
    fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// Sign the message, returning the base64url-encoded signature as used in
    /// a JWS.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be signed.
    fn sign_encoded(&self, msg: &[u8]) -> anyhow::Result<String> {
        let signature = self.try_sign(msg)?;
        Ok(Base64UrlUnpadded::encode_string(&signature))
    }
}

/// Signer holding the secret key of one of the supported schemes.
#[derive(Clone, Debug)]
pub enum KeySigner {
    /// Ed25519 signing key.
    Ed25519(ed25519_dalek::SigningKey),

    /// secp256k1 signing key.
    Secp256k1(k256::ecdsa::SigningKey),

    /// P-256 signing key.
    P256(p256::ecdsa::SigningKey),
}

impl Signer for KeySigner {
    fn algorithm(&self) -> AlgName {
        match self {
            Self::Ed25519(_) => AlgName::EdDsa,
            Self::Secp256k1(_) => AlgName::Es256K,
            Self::P256(_) => AlgName::Es256,
        }
    }

    fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        let signature = match self {
            Self::Ed25519(key) => ed25519::sign(key, msg),
            Self::Secp256k1(key) => secp256k1::sign(key, msg),
            Self::P256(key) => nistp256::sign(key, msg),
        };
        Ok(signature)
    }
}

/// The identity needed to issue signed tokens.
#[derive(Clone, Debug)]
pub struct Issuer {
    /// The issuer's `did:key` DID.
    pub did: String,

    /// Signer for the issuer's secret key.
    pub signer: KeySigner,

    /// Algorithm name for the token header.
    pub alg: AlgName,
}
