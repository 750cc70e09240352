//! Genius API response models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An artist as returned by the artist endpoint or synthesized by a fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
    /// Genius artist ID (absent for unresolved names)
    pub id: Option<u64>,
    /// Artist name
    pub name: String,
    /// Number of Genius followers (if reported)
    pub followers_count: Option<u64>,
}

impl ArtistRecord {
    /// Record for an artist known to Genius
    pub fn new(id: u64, name: impl Into<String>, followers_count: u64) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            followers_count: Some(followers_count),
        }
    }

    /// Record for a name that could not be matched to any artist
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            followers_count: None,
        }
    }

    /// True for records produced by [`ArtistRecord::unresolved`]
    ///
    /// Lookups always carry an ID and the stub table always carries a
    /// follower count, so only an explicit "no match" has neither.
    pub fn is_unresolved(&self) -> bool {
        self.id.is_none() && self.followers_count.is_none()
    }
}

/// Summary of the principal artist embedded in a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryArtist {
    /// Genius artist ID
    pub id: u64,
    /// Artist name
    pub name: String,
    /// URL to the Genius artist page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Remaining fields (image_url, is_verified, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The record wrapped by a search hit (usually a song)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    /// Principal artist of the result
    pub primary_artist: PrimaryArtist,
    /// Every other top-level field, `stats` included
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl HitResult {
    /// Nested `stats` object, when present
    pub fn stats(&self) -> Option<&Map<String, Value>> {
        self.fields.get("stats").and_then(Value::as_object)
    }

    /// Display title of the result
    pub fn title(&self) -> Option<&str> {
        self.fields
            .get("full_title")
            .or_else(|| self.fields.get("title"))
            .and_then(Value::as_str)
    }
}

/// One entry of a search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Index the hit came from (e.g. "song")
    #[serde(default)]
    pub index: Option<String>,
    /// Hit type (e.g. "song")
    #[serde(rename = "type", default)]
    pub hit_type: Option<String>,
    /// Wrapped result record
    pub result: HitResult,
}

impl SearchHit {
    /// ID of the hit's primary artist
    pub fn primary_artist_id(&self) -> u64 {
        self.result.primary_artist.id
    }
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub response: SearchBody,
}

/// Hits are kept untyped here so one bad entry does not sink the page
#[derive(Debug, Deserialize)]
pub(crate) struct SearchBody {
    pub hits: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistEnvelope {
    pub response: ArtistBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistBody {
    pub artist: RawArtist,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub followers_count: Option<u64>,
}

impl From<RawArtist> for ArtistRecord {
    fn from(raw: RawArtist) -> Self {
        Self {
            id: Some(raw.id),
            name: raw.name,
            followers_count: raw.followers_count,
        }
    }
}

/// Genius error payloads come in two shapes: a `meta` block or an OAuth-style pair
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub meta: Option<ErrorMeta>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorMeta {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn message(self) -> Option<String> {
        self.meta
            .and_then(|m| m.message)
            .or(self.error_description)
            .or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hit_keeps_unknown_fields() {
        let hit: SearchHit = serde_json::from_value(json!({
            "index": "song",
            "type": "song",
            "result": {
                "id": 378195,
                "title": "Creep",
                "stats": {"pageviews": 5},
                "primary_artist": {
                    "id": 604,
                    "name": "Radiohead",
                    "url": "https://genius.com/artists/Radiohead",
                    "is_verified": false
                }
            }
        }))
        .unwrap();

        assert_eq!(hit.primary_artist_id(), 604);
        assert_eq!(hit.result.title(), Some("Creep"));
        assert_eq!(hit.result.stats().unwrap()["pageviews"], json!(5));
        assert_eq!(hit.result.primary_artist.extra["is_verified"], json!(false));
        assert!(!hit.result.fields.contains_key("primary_artist"));
    }

    #[test]
    fn test_hit_without_artist_id_is_rejected() {
        let result = serde_json::from_value::<SearchHit>(json!({
            "result": {"title": "Orphan", "primary_artist": {"name": "Nobody"}}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_artist_without_followers() {
        let raw: RawArtist = serde_json::from_value(json!({"id": 1, "name": "Seal"})).unwrap();
        let artist: ArtistRecord = raw.into();
        assert_eq!(artist.id, Some(1));
        assert_eq!(artist.followers_count, None);
    }

    #[test]
    fn test_error_message_shapes() {
        let meta: ErrorResponse =
            serde_json::from_value(json!({"meta": {"status": 404, "message": "Not found"}}))
                .unwrap();
        assert_eq!(meta.message().as_deref(), Some("Not found"));

        let oauth: ErrorResponse = serde_json::from_value(json!({
            "error": "invalid_token",
            "error_description": "The access token provided is expired"
        }))
        .unwrap();
        assert_eq!(
            oauth.message().as_deref(),
            Some("The access token provided is expired")
        );
    }
}
