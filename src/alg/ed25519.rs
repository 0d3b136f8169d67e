//! Ed25519 keys, `EdDSA` signatures and conversion to X25519.

use base64ct::{Base64UrlUnpadded, Encoding};
use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::{KEYPAIR_LENGTH, Signature, Signer as _, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

pub use ed25519_dalek::PUBLIC_KEY_LENGTH;

use super::KeyPair;
use crate::error::Error;
use crate::jwk::{Curve, KeyType, PublicKeyJwk};

pub fn generate() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        public_key: signing_key.verifying_key().to_bytes().to_vec(),
        secret_key: signing_key.to_keypair_bytes().to_vec(),
    }
}

// The secret key is the seed followed by the public key, so the public key
// is read from the trailing bytes.
pub fn from_secret(secret_key: &[u8]) -> crate::Result<KeyPair> {
    let keypair_bytes = keypair_bytes(secret_key)?;
    Ok(KeyPair {
        public_key: keypair_bytes[KEYPAIR_LENGTH - PUBLIC_KEY_LENGTH..].to_vec(),
        secret_key: keypair_bytes.to_vec(),
    })
}

pub fn signer(secret_key: &[u8]) -> crate::Result<SigningKey> {
    let keypair_bytes = keypair_bytes(secret_key)?;
    SigningKey::from_keypair_bytes(&keypair_bytes)
        .map_err(|e| Error::InvalidSecretKey(format!("issue creating Ed25519 signing key: {e}")))
}

pub fn sign(signing_key: &SigningKey, msg: &[u8]) -> Vec<u8> {
    signing_key.sign(msg).to_bytes().to_vec()
}

pub fn verify(public_key: &[u8], msg: &[u8], signature: &[u8]) -> crate::Result<()> {
    let verifying_key = verifying_key(public_key)?;
    let signature = Signature::from_slice(signature)
        .map_err(|e| Error::InvalidSignature(format!("issue decoding signature: {e}")))?;
    verifying_key
        .verify(msg, &signature)
        .map_err(|e| Error::InvalidSignature(format!("EdDSA signature did not verify: {e}")))
}

pub fn jwk(public_key: &[u8]) -> crate::Result<PublicKeyJwk> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(Error::InvalidKeyLength(format!(
            "The public key must be {PUBLIC_KEY_LENGTH} bytes, but {}",
            public_key.len()
        )));
    }
    Ok(PublicKeyJwk {
        kty: KeyType::Okp,
        crv: Curve::Ed25519,
        x: Base64UrlUnpadded::encode_string(public_key),
        y: None,
    })
}

/// Convert an Ed25519 public key to the X25519 public key of the same secret.
///
/// See <https://w3c-ccg.github.io/did-method-key/#encryption-method-creation-algorithm>
pub fn to_x25519(public_key: &[u8]) -> crate::Result<[u8; 32]> {
    let edwards_y = CompressedEdwardsY::from_slice(public_key)
        .map_err(|e| Error::InvalidPublicKey(format!("public key is not Edwards Y: {e}")))?;
    let Some(edwards_pt) = edwards_y.decompress() else {
        return Err(Error::InvalidPublicKey("Edwards Y cannot be decompressed to point".into()));
    };
    Ok(edwards_pt.to_montgomery().to_bytes())
}

fn keypair_bytes(secret_key: &[u8]) -> crate::Result<[u8; KEYPAIR_LENGTH]> {
    secret_key.try_into().map_err(|_| {
        Error::InvalidSecretKey(format!(
            "The secret key must be {KEYPAIR_LENGTH} bytes, but {}",
            secret_key.len()
        ))
    })
}

fn verifying_key(public_key: &[u8]) -> crate::Result<VerifyingKey> {
    let bytes: [u8; PUBLIC_KEY_LENGTH] = public_key.try_into().map_err(|_| {
        Error::InvalidKeyLength(format!(
            "The public key must be {PUBLIC_KEY_LENGTH} bytes, but {}",
            public_key.len()
        ))
    })?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| Error::InvalidPublicKey(format!("issue decoding Ed25519 key: {e}")))
}
