//! Destructure DID URLs into strongly typed components.
//!
//! A DID URL is of the form
//!
//! `did:<method>:<method-specific-id>[/<path>][?<query>][#<fragment>]`.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

static DID_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^did:(?<method>[a-z0-9]+):(?<id>(?:[a-zA-Z0-9._%-]*:)*[a-zA-Z0-9._%-]+)(?<path>/[^?#]*)?(?:\?(?<query>[^#]*))?(?:#(?<fragment>.*))?$",
    )
    .expect("should compile")
});

/// Structure of a parsed DID URL.
///
/// The method is kept as a string so that resolvers can report which method
/// they were asked for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedDid {
    /// The DID without path, query or fragment: `did:<method>:<id>`.
    pub did: String,

    /// The complete DID URL that was parsed.
    pub did_url: String,

    /// DID method.
    pub method: String,

    /// Method-specific ID. For `did:key` this is the multibase public key.
    pub id: String,

    /// Path, including the leading `/`.
    pub path: Option<String>,

    /// Query string, without the leading `?`.
    pub query: Option<String>,

    /// Fragment, without the leading `#`.
    pub fragment: Option<String>,
}

impl ParsedDid {
    /// The DID URL of a resource in the DID document identified by
    /// `fragment`.
    #[must_use]
    pub fn resource_id(&self, fragment: &str) -> String {
        format!("{}#{fragment}", self.did)
    }
}

impl FromStr for ParsedDid {
    type Err = Error;

    /// Parse a string into a [`ParsedDid`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDid`] if the string is not a valid DID URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(caps) = DID_URL_REGEX.captures(s) else {
            return Err(Error::InvalidDid(format!("{s} is not a valid DID")));
        };
        let method = caps["method"].to_string();
        let id = caps["id"].to_string();

        Ok(Self {
            did: format!("did:{method}:{id}"),
            did_url: s.to_string(),
            method,
            id,
            path: caps.name("path").map(|m| m.as_str().to_string()),
            query: caps.name("query").map(|m| m.as_str().to_string()),
            fragment: caps.name("fragment").map(|m| m.as_str().to_string()),
        })
    }
}

impl Display for ParsedDid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.did)?;
        if let Some(path) = &self.path {
            write!(f, "{path}")?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
