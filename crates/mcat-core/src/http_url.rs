//! # HTTP URLs
//!
//! [`HttpUrl`] accepts absolute `http`/`https` URLs with a host. A domain
//! host must carry a top-level domain (`example.org`, not `intranet`), and
//! the whole URL is limited to 2083 characters.
//!
//! Surrounding whitespace is trimmed; the trimmed text is kept as submitted
//! otherwise and is what gets serialized, so `http://a.org/x` does not come
//! back as `http://a.org/x/` or with a rewritten host.

use ::url::{Host, Url};
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Maximum accepted URL length, in characters.
pub const MAX_URL_LENGTH: usize = 2083;

/// An absolute HTTP(S) URL, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpUrl {
    raw: String,
    parsed: Url,
}

impl HttpUrl {
    /// Trim, validate and wrap a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::MalformedUrl`] when the trimmed text does not
    /// parse, uses a scheme other than `http`/`https`, lacks a host, has a
    /// domain host without a top-level domain, or is longer than
    /// [`MAX_URL_LENGTH`].
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        let trimmed = value.trim();
        let raw = if trimmed.len() == value.len() {
            value
        } else {
            trimmed.to_string()
        };
        let parsed = Self::validate(&raw)?;
        Ok(Self { raw, parsed })
    }

    fn validate(raw: &str) -> Result<Url, FieldError> {
        let reject = |reason: &str| FieldError::MalformedUrl {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.chars().count() > MAX_URL_LENGTH {
            return Err(reject("URL exceeds 2083 characters"));
        }
        let parsed = Url::parse(raw).map_err(|e| reject(&e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(reject("URL scheme must be http or https"));
        }
        match parsed.host() {
            None => return Err(reject("URL host required")),
            Some(Host::Domain(domain)) => {
                let tld = domain.trim_end_matches('.').rsplit_once('.').map(|(_, tld)| tld);
                if !tld.is_some_and(|tld| !tld.is_empty()) {
                    return Err(reject("URL host invalid, top level domain required"));
                }
            }
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
        }

        Ok(parsed)
    }

    /// The URL exactly as submitted.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.parsed
    }

    /// The host component.
    pub fn host_str(&self) -> Option<&str> {
        self.parsed.host_str()
    }
}

impl std::fmt::Display for HttpUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for HttpUrl {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for HttpUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for HttpUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
