//! Short links to tracks kept on a storage server.
//!
//! A link URL names a stored track with `nktl=<id>` in its hash. The
//! resolver only describes the fetch; performing it is the caller's job.
//! The fetched body is a fragment sequence.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LinkConfig;
use crate::error::{LinkError, LinkResult};
use crate::sequence::decode_sequence;
use crate::track::DecodedTrack;

/// Matches a stored track id in a URL hash.
static TRACK_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#.*nktl=([A-Za-z0-9_-]+)").expect("invalid regex: track link")
});

/// How the response body should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Raw bytes.
    Binary,
}

/// A request the caller has to perform to resolve a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchDescriptor {
    /// Where to fetch the stored track.
    pub url: String,
    /// Expected body format.
    pub response_type: ResponseType,
}

/// Turns link URLs into fetches and fetched bodies into tracks.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    config: LinkConfig,
}

impl LinkResolver {
    /// Creates a resolver.
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Returns true if `url` names a stored track.
    pub fn is_link_url(url: &str) -> bool {
        TRACK_LINK.is_match(url)
    }

    /// Extracts the stored track id from `url`.
    pub fn track_id(url: &str) -> Option<&str> {
        TRACK_LINK
            .captures(url)
            .and_then(|captures| captures.get(1))
            .map(|id| id.as_str())
    }

    /// Describes the fetch that resolves `url`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NoTrackId`] if `url` is not a link URL.
    pub fn fetch_descriptor(&self, url: &str) -> LinkResult<FetchDescriptor> {
        let id = Self::track_id(url).ok_or_else(|| LinkError::NoTrackId {
            url: url.to_owned(),
        })?;
        Ok(FetchDescriptor {
            url: self.config.track_url(id),
            response_type: ResponseType::Binary,
        })
    }

    /// Decodes the fetched bodies of one link.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::ResponseCount`] unless exactly one body is given.
    pub fn parse_responses<B: AsRef<[u8]>>(&self, bodies: &[B]) -> LinkResult<Vec<DecodedTrack>> {
        let [body] = bodies else {
            return Err(LinkError::ResponseCount {
                count: bodies.len(),
            });
        };
        let text = String::from_utf8_lossy(body.as_ref());
        let tracks = decode_sequence(&text)?;
        debug!(count = tracks.len(), "stored track decoded");
        Ok(tracks)
    }
}
