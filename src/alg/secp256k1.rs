//! secp256k1 keys and ES256K signatures.

use base64ct::{Base64UrlUnpadded, Encoding};
use k256::ecdsa::signature::{Signer as _, Verifier as _};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use rand::rngs::OsRng;

use super::KeyPair;
use crate::error::Error;
use crate::jwk::{Curve, KeyType, PublicKeyJwk};

const SECRET_KEY_LENGTH: usize = 32;

pub fn generate() -> KeyPair {
    key_pair(&SigningKey::random(&mut OsRng))
}

pub fn from_secret(secret_key: &[u8]) -> crate::Result<KeyPair> {
    Ok(key_pair(&signer(secret_key)?))
}

pub fn signer(secret_key: &[u8]) -> crate::Result<SigningKey> {
    if secret_key.len() != SECRET_KEY_LENGTH {
        return Err(Error::InvalidSecretKey(format!(
            "The secret key must be {SECRET_KEY_LENGTH} bytes, but {}",
            secret_key.len()
        )));
    }
    SigningKey::from_slice(secret_key)
        .map_err(|e| Error::InvalidSecretKey(format!("issue creating secp256k1 signing key: {e}")))
}

// SHA-256 digest of the message, signature as 64-byte `r || s` with low `s`.
pub fn sign(signing_key: &SigningKey, msg: &[u8]) -> Vec<u8> {
    let signature: Signature = signing_key.sign(msg);
    signature.to_bytes().to_vec()
}

pub fn verify(public_key: &[u8], msg: &[u8], signature: &[u8]) -> crate::Result<()> {
    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| Error::InvalidPublicKey(format!("issue decoding secp256k1 key: {e}")))?;
    let signature = Signature::from_slice(signature)
        .map_err(|e| Error::InvalidSignature(format!("issue decoding signature: {e}")))?;
    verifying_key
        .verify(msg, &signature)
        .map_err(|e| Error::InvalidSignature(format!("ES256K signature did not verify: {e}")))
}

pub fn jwk(public_key: &[u8]) -> crate::Result<PublicKeyJwk> {
    let public_key = PublicKey::from_sec1_bytes(public_key)
        .map_err(|e| Error::InvalidPublicKey(format!("issue decoding secp256k1 key: {e}")))?;
    let point = public_key.to_encoded_point(false);
    let (Some(x), Some(y)) = (point.x(), point.y()) else {
        return Err(Error::InvalidPublicKey("secp256k1 key is the identity point".into()));
    };
    Ok(PublicKeyJwk {
        kty: KeyType::Ec,
        crv: Curve::Secp256k1,
        x: Base64UrlUnpadded::encode_string(x),
        y: Some(Base64UrlUnpadded::encode_string(y)),
    })
}

fn key_pair(signing_key: &SigningKey) -> KeyPair {
    KeyPair {
        public_key: signing_key.verifying_key().to_encoded_point(true).as_bytes().to_vec(),
        secret_key: signing_key.to_bytes().to_vec(),
    }
}

#[cfg(test)]
mod test {
    use k256::ecdsa::signature::hazmat::PrehashVerifier;
    use sha2::{Digest, Sha256};

    use super::*;

    // Signatures are over the SHA-256 digest of the message.
    #[test]
    fn prehash_verify() {
        let key_pair = generate();
        let signing_key = signer(&key_pair.secret_key).expect("should create");
        let signature = sign(&signing_key, b"hello");

        let digest = Sha256::digest(b"hello");
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&key_pair.public_key).expect("should decode");
        let signature = Signature::from_slice(&signature).expect("should decode");
        verifying_key.verify_prehash(&digest, &signature).expect("should verify");
    }

    #[test]
    fn jwk_coordinates() {
        let key_pair = generate();
        let jwk = jwk(&key_pair.public_key).expect("should convert");
        assert_eq!(jwk.kty, KeyType::Ec);
        assert_eq!(jwk.crv, Curve::Secp256k1);

        let x = Base64UrlUnpadded::decode_vec(&jwk.x).expect("should decode");
        assert_eq!(x, key_pair.public_key[1..]);
        let y = jwk.y.expect("should have y");
        let y = Base64UrlUnpadded::decode_vec(&y).expect("should decode");
        assert_eq!(y.len(), 32);
        // compressed point prefix encodes the parity of y
        assert_eq!(key_pair.public_key[0], 0x02 + (y[31] & 1));
    }

    #[test]
    fn zero_secret() {
        let err = signer(&[0; 32]).expect_err("should fail");
        assert_eq!(err.code(), "invalidSecretKey");
    }

    // Secrets shorter than the scalar are not zero-padded.
    #[test]
    fn short_secret() {
        let secret_key = generate().secret_key;
        for len in [24, 28, 31, 33] {
            let mut secret = secret_key.clone();
            secret.resize(len, 1);
            let err = from_secret(&secret).expect_err("should fail");
            assert_eq!(err.code(), "invalidSecretKey", "{len}");
        }
    }

    #[test]
    fn not_a_point() {
        let mut public_key = [0xff; 33];
        public_key[0] = 0x02;
        let err = jwk(&public_key).expect_err("should fail");
        assert_eq!(err.code(), "invalidPublicKey");
    }
}
