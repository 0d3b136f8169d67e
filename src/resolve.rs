//! # DID Resolution
//!
//! Types returned by DID resolution and a minimal multi-method [`Resolver`]
//! that dispatches to registered method resolvers.
//!
//! Resolution never fails at the call boundary: errors are returned as data
//! in the resolution metadata.
//!
//! See [DID resolution](https://w3c.github.io/did-resolution) for more.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentMetadata, PublicKeyFormat, VerificationMethod};
use crate::error::Error;
use crate::jwk::PublicKeyJwk;
use crate::url::ParsedDid;

/// A DID method resolver.
///
/// Called with the DID as given, its parsed form, the resolver doing the
/// dispatch (for methods that need to resolve other DIDs) and the caller's
/// options.
pub type ResolveFn = fn(&str, &ParsedDid, &Resolver, &Options) -> Resolved;

/// Method resolvers keyed by DID method name.
pub type ResolverRegistry = HashMap<String, ResolveFn>;

/// Used to pass addtional values to a `resolve` method.
///
/// The `accept` property is used to specify the Media Type of the returned
/// document. For example:
///
/// ```json
/// {
///    "accept": "application/did+ld+json"
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// [`accept`](https://www.w3.org/TR/did-spec-registries/#accept) resolution option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<ContentType>,
}

/// Returned by `resolve` DID methods.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resolved {
    /// Resolution metadata.
    pub did_resolution_metadata: Metadata,

    /// DID document metadata.
    pub did_document_metadata: DocumentMetadata,

    /// The DID document. `None` if resolution failed.
    pub did_document: Option<Document>,
}

impl Resolved {
    /// Resolution result for a failed resolution.
    #[must_use]
    pub fn error(err: &Error) -> Self {
        Self {
            did_resolution_metadata: Metadata {
                content_type: None,
                error: Some(err.code().to_string()),
                message: Some(err.message()),
            },
            did_document_metadata: DocumentMetadata::default(),
            did_document: None,
        }
    }

    /// Convert the result into the resolved document or the error it carries.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution failed.
    pub fn into_document(self) -> crate::Result<Document> {
        if let Some(document) = self.did_document {
            return Ok(document);
        }
        let md = self.did_resolution_metadata;
        let message = md.message.unwrap_or_default();
        match md.error {
            Some(code) => Err(Error::from_code(&code, message)),
            None => Err(Error::NotFound(format!("no DID document: {message}"))),
        }
    }
}

/// DID resolution metadata.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// The Media Type of the returned document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,

    /// The error code from the resolution process, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// A human-readable explanation of the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The Media Type of the returned resource.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ContentType {
    /// JSON-LD representation of a DID document.
    #[default]
    #[serde(rename = "application/did+ld+json")]
    DidLdJson,

    /// Plain JSON representation of a DID document (no `@context`).
    #[serde(rename = "application/did+json")]
    DidJson,
}

/// Resolves DIDs by dispatching to the resolver registered for the DID
/// method.
#[derive(Clone, Default)]
pub struct Resolver {
    registry: ResolverRegistry,
}

impl Debug for Resolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.registry.keys().collect();
        methods.sort();
        f.debug_struct("Resolver").field("methods", &methods).finish()
    }
}

impl Resolver {
    /// Create a resolver from a registry of method resolvers.
    #[must_use]
    pub const fn new(registry: ResolverRegistry) -> Self {
        Self { registry }
    }

    /// Add the method resolvers in `registry`, replacing any already
    /// registered for the same method.
    #[must_use]
    pub fn with(mut self, registry: ResolverRegistry) -> Self {
        self.registry.extend(registry);
        self
    }

    /// Resolve a DID into a DID document.
    ///
    /// Failures are reported in the returned resolution metadata.
    #[must_use]
    pub fn resolve(&self, did: &str, options: &Options) -> Resolved {
        let parsed = match ParsedDid::from_str(did) {
            Ok(parsed) => parsed,
            Err(e) => return Resolved::error(&e),
        };
        let Some(resolve_fn) = self.registry.get(&parsed.method) else {
            let err = Error::UnsupportedDidMethod(format!(
                "No resolver is registered for \"{}\"",
                parsed.method
            ));
            return Resolved::error(&err);
        };
        resolve_fn(did, &parsed, self, options)
    }

    /// Dereference a DID URL into the verification method it identifies.
    ///
    /// # Errors
    ///
    /// Returns an error if the DID cannot be resolved or the document has no
    /// verification method matching the DID URL.
    pub fn dereference(&self, did_url: &str) -> crate::Result<VerificationMethod> {
        let parsed = ParsedDid::from_str(did_url)?;
        let document = self.resolve(&parsed.did, &Options::default()).into_document()?;

        // a bare DID dereferences to the first verification method
        let vm = match &parsed.fragment {
            Some(fragment) => document.get_verification_method(&parsed.resource_id(fragment)),
            None => document.verification_method.first(),
        };
        vm.cloned().ok_or_else(|| {
            Error::NotFound(format!("verification method {did_url} not found in document"))
        })
    }
}

/// Retrieve the JWK specified by the provided DID URL.
///
/// # Errors
///
/// Returns an error if the DID URL cannot be dereferenced or the verification
/// method does not hold a JWK.
pub fn resolve_jwk(did_url: &str, resolver: &Resolver) -> crate::Result<PublicKeyJwk> {
    let vm = resolver.dereference(did_url)?;
    let PublicKeyFormat::PublicKeyJwk { public_key_jwk } = vm.key else {
        return Err(Error::NotFound(format!("{did_url} is not a JSON Web Key")));
    };
    Ok(public_key_jwk)
}
