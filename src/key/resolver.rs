//! # DID Key Resolver
//!
//! Expands a `did:key` DID into its DID document. The document is derived
//! entirely from the public key encoded in the DID so resolution needs no
//! network or storage access.
//!
//! See <https://w3c-ccg.github.io/did-method-key/#read>

use super::METHOD;
use crate::alg::Algorithm;
use crate::codec::{self, X25519_CODEC};
use crate::document::{
    DID_CONTEXT, Document, DocumentMetadata, JWS_2020_CONTEXT, MethodType, PublicKeyFormat,
    VerificationMethod, X25519_2019_CONTEXT,
};
use crate::error::Error;
use crate::resolve::{ContentType, Metadata, Options, Resolved, Resolver};
use crate::url::ParsedDid;

/// Resolve a `did:key` DID.
///
/// Matches [`ResolveFn`](crate::resolve::ResolveFn) so it can be registered
/// with a [`Resolver`]. Failures are returned in the resolution metadata.
#[must_use]
pub fn resolve(did: &str, parsed: &ParsedDid, _: &Resolver, options: &Options) -> Resolved {
    tracing::debug!(%did, "resolving");

    let content_type = options.accept.unwrap_or_default();
    match document(parsed, content_type) {
        Ok(document) => Resolved {
            did_resolution_metadata: Metadata {
                content_type: Some(content_type),
                ..Metadata::default()
            },
            did_document_metadata: DocumentMetadata::default(),
            did_document: Some(document),
        },
        Err(e) => {
            tracing::warn!(%did, code = e.code(), "resolution failed: {}", e.message());
            Resolved::error(&e)
        }
    }
}

fn document(parsed: &ParsedDid, content_type: ContentType) -> crate::Result<Document> {
    if parsed.method != METHOD {
        return Err(Error::MethodNotSupported(format!(
            "The method must be \"{METHOD}\", but \"{}\"",
            parsed.method
        )));
    }

    let multibase = &parsed.id;
    let alg = Algorithm::from_multibase(multibase)?;
    let public_key = alg.public_key_from_multibase(multibase)?;
    let public_key_jwk = alg.public_key_jwk(&public_key)?;

    let did = &parsed.did;
    let kid = parsed.resource_id(multibase);

    let mut document = Document {
        context: vec![DID_CONTEXT.to_string(), JWS_2020_CONTEXT.to_string()],
        id: did.clone(),
        verification_method: vec![VerificationMethod {
            id: kid.clone(),
            type_: MethodType::JsonWebKey2020,
            controller: did.clone(),
            key: PublicKeyFormat::PublicKeyJwk { public_key_jwk },
        }],
        authentication: vec![kid.clone()],
        assertion_method: vec![kid.clone()],
        capability_delegation: vec![kid.clone()],
        capability_invocation: vec![kid],
        key_agreement: None,
    };

    // key agreement
    // <https://w3c-ccg.github.io/did-method-key/#encryption-method-creation-algorithm>
    if let Some(x25519) = alg.key_agreement_key(&public_key)? {
        let agreement_multibase = codec::encode(&X25519_CODEC, &x25519);
        document.context.push(X25519_2019_CONTEXT.to_string());
        document.key_agreement = Some(vec![VerificationMethod {
            id: parsed.resource_id(&agreement_multibase),
            type_: MethodType::X25519KeyAgreementKey2019,
            controller: did.clone(),
            key: PublicKeyFormat::PublicKeyBase58 {
                public_key_base58: codec::base58(&x25519),
            },
        }]);
    }

    if content_type == ContentType::DidJson {
        document.context.clear();
    }

    Ok(document)
}
