//! # Errors
//!
//! Errors raised while encoding, decoding or resolving `did:key` identifiers.
//! Each variant maps to a stable error code that is reported in DID
//! resolution metadata.

use anyhow::anyhow;
use serde_json::{Value, json};
use thiserror::Error;

/// Errors returned by the codec, algorithm and resolution layers.
#[derive(Error, Debug)]
pub enum Error {
    /// The DID method is not `key`.
    #[error("methodNotSupported: {0}")]
    MethodNotSupported(String),

    /// The multibase string does not start with the base58-btc marker.
    #[error("invalidMultibaseHeader: {0}")]
    InvalidMultibaseHeader(String),

    /// The decoded bytes do not start with the expected multicodec prefix.
    #[error("invalidMulticodecHeader: {0}")]
    InvalidMulticodecHeader(String),

    /// The multibase prefix does not match any supported key type.
    #[error("unsupportedPublicKeyType: {0}")]
    UnsupportedKeyType(String),

    /// The decoded public key is not the length expected for its key type.
    #[error("invalidKeyLength: {0}")]
    InvalidKeyLength(String),

    /// The public key bytes do not describe a point on the curve.
    #[error("invalidPublicKey: {0}")]
    InvalidPublicKey(String),

    /// The secret key is not valid for the key type.
    #[error("invalidSecretKey: {0}")]
    InvalidSecretKey(String),

    /// A signature failed verification.
    #[error("invalidSignature: {0}")]
    InvalidSignature(String),

    /// The identifier is not a syntactically valid DID.
    #[error("invalidDid: {0}")]
    InvalidDid(String),

    /// No resolver is registered for the DID method.
    #[error("unsupportedDidMethod: {0}")]
    UnsupportedDidMethod(String),

    /// The DID URL does not identify anything in the DID document.
    #[error("notFound: {0}")]
    NotFound(String),

    /// Any other failure.
    #[error("internalError: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Returns the error code used in DID resolution metadata.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MethodNotSupported(_) => "methodNotSupported",
            Self::InvalidMultibaseHeader(_) => "invalidMultibaseHeader",
            Self::InvalidMulticodecHeader(_) => "invalidMulticodecHeader",
            Self::UnsupportedKeyType(_) => "unsupportedPublicKeyType",
            Self::InvalidKeyLength(_) => "invalidKeyLength",
            Self::InvalidPublicKey(_) => "invalidPublicKey",
            Self::InvalidSecretKey(_) => "invalidSecretKey",
            Self::InvalidSignature(_) => "invalidSignature",
            Self::InvalidDid(_) => "invalidDid",
            Self::UnsupportedDidMethod(_) => "unsupportedDidMethod",
            Self::NotFound(_) => "notFound",
            Self::Other(_) => "internalError",
        }
    }

    /// Returns the error message without the error code.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MethodNotSupported(msg)
            | Self::InvalidMultibaseHeader(msg)
            | Self::InvalidMulticodecHeader(msg)
            | Self::UnsupportedKeyType(msg)
            | Self::InvalidKeyLength(msg)
            | Self::InvalidPublicKey(msg)
            | Self::InvalidSecretKey(msg)
            | Self::InvalidSignature(msg)
            | Self::InvalidDid(msg)
            | Self::UnsupportedDidMethod(msg)
            | Self::NotFound(msg) => msg.clone(),
            Self::Other(err) => format!("{err:#}"),
        }
    }

    /// Rebuild an error from the code and message reported in resolution
    /// metadata. Unknown codes become [`Error::Other`].
    #[must_use]
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "methodNotSupported" => Self::MethodNotSupported(message),
            "invalidMultibaseHeader" => Self::InvalidMultibaseHeader(message),
            "invalidMulticodecHeader" => Self::InvalidMulticodecHeader(message),
            "unsupportedPublicKeyType" => Self::UnsupportedKeyType(message),
            "invalidKeyLength" => Self::InvalidKeyLength(message),
            "invalidPublicKey" => Self::InvalidPublicKey(message),
            "invalidSecretKey" => Self::InvalidSecretKey(message),
            "invalidSignature" => Self::InvalidSignature(message),
            "invalidDid" => Self::InvalidDid(message),
            "unsupportedDidMethod" => Self::UnsupportedDidMethod(message),
            "notFound" => Self::NotFound(message),
            _ => Self::Other(anyhow!(message)),
        }
    }

    /// Returns the error as a JSON object with `error` and `message` fields.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.code(),
            "message": self.message(),
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_code() {
        let err = Error::MethodNotSupported("Method not supported".into());
        assert_eq!(err.code(), "methodNotSupported");
        assert_eq!(err.message(), "Method not supported");
        assert_eq!(err.to_string(), "methodNotSupported: Method not supported");
    }

    #[test]
    fn from_code() {
        for err in [
            Error::MethodNotSupported("a".into()),
            Error::UnsupportedKeyType("b".into()),
            Error::InvalidKeyLength("c".into()),
            Error::InvalidDid("d".into()),
            Error::UnsupportedDidMethod("e".into()),
            Error::Other(anyhow!("f")),
        ] {
            let rebuilt = Error::from_code(err.code(), err.message());
            assert_eq!(rebuilt.code(), err.code());
            assert_eq!(rebuilt.message(), err.message());
        }
    }

    #[test]
    fn other_is_internal() {
        let err: Error = anyhow!("something broke").into();
        assert_eq!(
            err.to_json(),
            json!({"error": "internalError", "message": "something broke"})
        );
    }
}
