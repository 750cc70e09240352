//! Mock Genius API server for testing search and artist lookup
//!
//! Provides a [`MockGeniusServer`] that simulates the Genius `/search` and
//! `/artists/{id}` endpoints, and fixtures for the payloads they return.

use std::time::Duration;

use genius_shared_config::GeniusConfig;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock Genius server
///
/// This struct wraps a [`wiremock::MockServer`]. Every mounted mock requires
/// the server's access token as the `access_token` query parameter, so a
/// client configured without it never matches.
pub struct MockGeniusServer {
    server: MockServer,
    access_token: String,
}

impl MockGeniusServer {
    /// Start a new mock Genius server with the default token
    pub async fn start() -> Self {
        Self::start_with_token("test-access-token").await
    }

    /// Start a new mock Genius server with a custom token
    pub async fn start_with_token(access_token: &str) -> Self {
        let server = MockServer::start().await;
        Self {
            server,
            access_token: access_token.to_string(),
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get the access token the mocks expect
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Configuration pointing at this server, token included
    pub fn config(&self) -> GeniusConfig {
        GeniusConfig::with_url(self.url()).with_token(self.access_token.clone())
    }

    /// Configuration pointing at this server with no token
    pub fn config_without_token(&self) -> GeniusConfig {
        GeniusConfig::with_url(self.url())
    }

    /// Mount a search response for `term`
    pub async fn mock_search(&self, term: &str, hits: Vec<SongHitFixture>) {
        let hits_json: Vec<serde_json::Value> = hits.iter().map(|h| h.to_json()).collect();
        self.mock_search_raw(
            term,
            json!({
                "meta": {"status": 200},
                "response": {"hits": hits_json}
            }),
        )
        .await;
    }

    /// Mount a search response with no hits for `term`
    pub async fn mock_search_empty(&self, term: &str) {
        self.mock_search(term, Vec::new()).await;
    }

    /// Mount a search response with an arbitrary JSON body for `term`
    pub async fn mock_search_raw(&self, term: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", term))
            .and(query_param("access_token", self.access_token.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a search response whose body is not JSON at all
    pub async fn mock_search_garbage(&self, term: &str) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", term))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&self.server)
            .await;
    }

    /// Mount a failing search for any term
    pub async fn mock_search_failure(&self, status_code: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "meta": {"status": status_code, "message": message}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a successful artist lookup
    pub async fn mock_artist(&self, artist: ArtistFixture) {
        self.mock_artist_raw(artist.id, artist.to_response()).await;
    }

    /// Mount an artist lookup with an arbitrary JSON body
    pub async fn mock_artist_raw(&self, artist_id: u64, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/artists/{}", artist_id)))
            .and(query_param("access_token", self.access_token.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a failing artist lookup
    pub async fn mock_artist_failure(&self, artist_id: u64, status_code: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/artists/{}", artist_id)))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "meta": {"status": status_code, "message": message}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a slow artist lookup for every ID
    pub async fn mock_artist_timeout(&self, delay_ms: u64) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/artists/\d+$"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(delay_ms))
                    .set_body_json(json!({"meta": {"status": 200}})),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of requests received on paths starting with `prefix`
    pub async fn request_count(&self, prefix: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().starts_with(prefix))
            .count()
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }
}

/// Fixture for a song hit in a search response
#[derive(Debug, Clone)]
pub struct SongHitFixture {
    pub id: u64,
    pub title: String,
    pub artist_id: u64,
    pub artist_name: String,
    pub artist_url: Option<String>,
    pub pageviews: Option<u64>,
}

impl SongHitFixture {
    /// Create a song hit with a derived artist URL and page views
    pub fn new(id: u64, title: &str, artist_id: u64, artist_name: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            artist_id,
            artist_name: artist_name.to_string(),
            artist_url: Some(format!(
                "https://genius.com/artists/{}",
                artist_name.replace(' ', "-")
            )),
            pageviews: Some(1000 + id),
        }
    }

    /// Drop the `stats` block from the hit
    pub fn without_stats(mut self) -> Self {
        self.pageviews = None;
        self
    }

    /// Convert to JSON value (the whole hit, not just the result)
    pub fn to_json(&self) -> serde_json::Value {
        let mut primary_artist = json!({
            "id": self.artist_id,
            "name": self.artist_name,
            "is_verified": false
        });
        if let Some(url) = &self.artist_url {
            primary_artist["url"] = json!(url);
        }

        let mut result = json!({
            "id": self.id,
            "title": self.title,
            "full_title": format!("{} by {}", self.title, self.artist_name),
            "primary_artist": primary_artist
        });
        if let Some(pageviews) = self.pageviews {
            result["stats"] = json!({
                "unreviewed_annotations": 0,
                "hot": false,
                "pageviews": pageviews
            });
        }

        json!({
            "highlights": [],
            "index": "song",
            "type": "song",
            "result": result
        })
    }
}

/// Fixture for an artist lookup response
#[derive(Debug, Clone)]
pub struct ArtistFixture {
    pub id: u64,
    pub name: String,
    pub followers_count: Option<u64>,
}

impl ArtistFixture {
    /// Create an artist fixture
    pub fn new(id: u64, name: &str, followers_count: u64) -> Self {
        Self {
            id,
            name: name.to_string(),
            followers_count: Some(followers_count),
        }
    }

    /// Create an artist fixture that omits `followers_count`
    pub fn without_followers(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            followers_count: None,
        }
    }

    /// Convert to the artist JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let mut artist = json!({
            "id": self.id,
            "name": self.name,
            "url": format!("https://genius.com/artists/{}", self.name.replace(' ', "-")),
            "is_verified": true
        });
        if let Some(followers) = self.followers_count {
            artist["followers_count"] = json!(followers);
        }
        artist
    }

    /// Convert to the full endpoint response envelope
    pub fn to_response(&self) -> serde_json::Value {
        json!({
            "meta": {"status": 200},
            "response": {"artist": self.to_json()}
        })
    }
}
