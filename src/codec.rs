//! # Multibase Codec
//!
//! Converts raw public key bytes to and from the multibase (base58-btc)
//! encoding of a multicodec-prefixed key used as the `did:key`
//! method-specific identifier.
//!
//! See <https://w3c-ccg.github.io/did-method-key/#format>

use anyhow::anyhow;
use multibase::Base;

use crate::error::Error;

/// Multibase marker for base58-btc.
pub const BASE58BTC_HEADER: char = 'z';

/// Multicodec prefix for an Ed25519 public key.
pub const ED25519_CODEC: [u8; 2] = [0xed, 0x01];

/// Multicodec prefix for an X25519 public key.
pub const X25519_CODEC: [u8; 2] = [0xec, 0x01];

/// Multicodec prefix for a compressed secp256k1 public key.
pub const SECP256K1_CODEC: [u8; 2] = [0xe7, 0x01];

/// Multicodec prefix for a compressed P-256 public key.
pub const P256_CODEC: [u8; 2] = [0x80, 0x24];

/// Leading characters of a base58-btc multibase Ed25519 key.
pub const ED25519_PREFIX: &str = "z6Mk";

/// Leading characters of a base58-btc multibase X25519 key.
pub const X25519_PREFIX: &str = "z6LS";

/// Leading characters of a base58-btc multibase secp256k1 key.
pub const SECP256K1_PREFIX: &str = "zQ3s";

/// Leading characters of a base58-btc multibase P-256 key.
pub const P256_PREFIX: &str = "zDn";

// Textual prefix to multicodec prefix. The textual prefixes are what base58
// produces for each multicodec prefix followed by a key of the expected
// length; a new entry must be checked against real encoder output.
const SIGNING_PREFIXES: [(&str, &[u8]); 3] = [
    (ED25519_PREFIX, &ED25519_CODEC),
    (SECP256K1_PREFIX, &SECP256K1_CODEC),
    (P256_PREFIX, &P256_CODEC),
];

/// Encode a public key as a base58-btc multibase string, prefixing the key
/// with the multicodec `codec`.
#[must_use]
pub fn encode(codec: &[u8], public_key: &[u8]) -> String {
    let mut multi_bytes = codec.to_vec();
    multi_bytes.extend_from_slice(public_key);
    multibase::encode(Base::Base58Btc, &multi_bytes)
}

/// Decode a base58-btc multibase string into public key bytes, checking and
/// stripping the multicodec `codec`.
///
/// Key length is not checked here.
///
/// # Errors
///
/// Returns [`Error::InvalidMultibaseHeader`] if the string does not start
/// with `z`, [`Error::InvalidMulticodecHeader`] if the decoded bytes do not
/// start with `codec`, and [`Error::Other`] if the payload is not valid
/// base58.
pub fn decode(codec: &[u8], multibase: &str) -> crate::Result<Vec<u8>> {
    let Some(payload) = multibase.strip_prefix(BASE58BTC_HEADER) else {
        let found = multibase.chars().next().map(String::from).unwrap_or_default();
        return Err(Error::InvalidMultibaseHeader(format!(
            "The multibase must start with {BASE58BTC_HEADER}, but {found}"
        )));
    };
    let multi_bytes = Base::Base58Btc
        .decode(payload)
        .map_err(|e| Error::Other(anyhow!("issue decoding base58btc: {e}")))?;

    let header = &multi_bytes[..codec.len().min(multi_bytes.len())];
    if header != codec {
        return Err(Error::InvalidMulticodecHeader(format!(
            "The multicodec must start with {codec:?}, but {header:?}"
        )));
    }
    Ok(multi_bytes[codec.len()..].to_vec())
}

/// Plain base58-btc encoding with no multibase marker and no multicodec
/// prefix. Used for `publicKeyBase58` values.
#[must_use]
pub fn base58(bytes: &[u8]) -> String {
    Base::Base58Btc.encode(bytes)
}

/// Find the multicodec prefix of a signing key from the leading characters of
/// its multibase string.
///
/// # Errors
///
/// Returns [`Error::UnsupportedKeyType`] if the string does not start with a
/// supported prefix.
pub fn codec_for(multibase: &str) -> crate::Result<&'static [u8]> {
    SIGNING_PREFIXES
        .iter()
        .find(|(prefix, _)| multibase.starts_with(prefix))
        .map(|(_, codec)| *codec)
        .ok_or_else(|| {
            Error::UnsupportedKeyType(format!(
                "The multibase must start with either {ED25519_PREFIX}, {SECP256K1_PREFIX}, or \
                 {P256_PREFIX}, but {multibase}"
            ))
        })
}
