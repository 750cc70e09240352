//! Genius API client implementation

use std::time::Duration;

use genius_shared_config::GeniusConfig;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::{GeniusError, GeniusResult};
use crate::models::{ArtistEnvelope, ArtistRecord, ErrorResponse, SearchEnvelope, SearchHit};

/// Default number of hits requested per search
pub const DEFAULT_SEARCH_PER_PAGE: u32 = 15;

/// Largest page Genius will serve
const MAX_PER_PAGE: u32 = 50;

/// Maximum search term length
const MAX_SEARCH_TERM_LENGTH: usize = 256;

/// Maximum error body size kept in error messages
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Genius API client
///
/// One client covers both endpoints. Searches are best-effort and never fail;
/// artist lookups report every failure to the caller.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    /// HTTP client with connection pool
    http_client: Client,
    /// Configuration (token redacted in Debug)
    config: GeniusConfig,
}

impl GeniusClient {
    /// Create a new Genius client from configuration
    ///
    /// A configuration without an access token is accepted; the client then
    /// runs in degraded mode.
    pub fn new(config: &GeniusConfig) -> GeniusResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("genius-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Create a client with custom HTTP client (for testing)
    pub fn with_client(config: &GeniusConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: config.clone(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &GeniusConfig {
        &self.config
    }

    /// Check whether requests will carry an access token
    pub fn has_credential(&self) -> bool {
        self.config.has_credential()
    }

    /// Validate search term input
    fn validate_term(term: &str) -> GeniusResult<&str> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return Err(GeniusError::InvalidInput(
                "search term cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > MAX_SEARCH_TERM_LENGTH {
            return Err(GeniusError::InvalidInput(format!(
                "search term too long (max {} characters)",
                MAX_SEARCH_TERM_LENGTH
            )));
        }
        Ok(trimmed)
    }

    /// Validate the requested page size, clamping it to what Genius serves
    fn page_size(per_page: u32) -> GeniusResult<u32> {
        if per_page == 0 {
            return Err(GeniusError::InvalidInput(
                "per_page must be greater than zero".to_string(),
            ));
        }
        if per_page > MAX_PER_PAGE {
            warn!(
                requested = per_page,
                max = MAX_PER_PAGE,
                "Requested page size exceeds the Genius maximum, clamping"
            );
            return Ok(MAX_PER_PAGE);
        }
        Ok(per_page)
    }

    /// Truncate error body to prevent memory exhaustion
    /// Safely handles UTF-8 boundaries to avoid panics on multi-byte characters
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }

        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);

        format!("{}... (truncated)", &body[..truncate_at])
    }

    fn transport_error(&self, e: reqwest::Error) -> GeniusError {
        if e.is_timeout() {
            GeniusError::Timeout(self.config.timeout_secs)
        } else {
            GeniusError::Http(e)
        }
    }

    /// Issue a single GET and return the body of a successful response
    async fn get_text(&self, url: &str, params: &[(&str, &str)]) -> GeniusResult<String> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(ErrorResponse::message)
                .unwrap_or_else(|| Self::truncate_error_body(body));

            return Err(GeniusError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    /// Search and surface every failure; `search` absorbs them
    async fn fetch_hits(&self, term: &str, per_page: u32) -> GeniusResult<Vec<SearchHit>> {
        let token = self
            .config
            .credential()
            .ok_or(GeniusError::MissingCredential)?;
        let term = Self::validate_term(term)?;
        let per_page = Self::page_size(per_page)?;
        let per_page_str = per_page.to_string();

        debug!(term = %term, per_page, "Searching Genius");

        let text = self
            .get_text(
                &self.config.search_url(),
                &[
                    ("q", term),
                    ("per_page", per_page_str.as_str()),
                    ("access_token", token),
                ],
            )
            .await?;

        let envelope: SearchEnvelope = serde_json::from_str(&text)?;

        let hits: Vec<SearchHit> = envelope
            .response
            .hits
            .into_iter()
            .enumerate()
            .filter_map(|(position, raw)| match serde_json::from_value(raw) {
                Ok(hit) => Some(hit),
                Err(e) => {
                    warn!(position, error = %e, "Skipping malformed search hit");
                    None
                }
            })
            .collect();

        debug!(term = %term, hit_count = hits.len(), "Genius search complete");

        Ok(hits)
    }

    /// Search Genius for a free-text term
    ///
    /// Returns the hits in the order Genius ranks them. This never fails: a
    /// missing token, invalid input, transport failure, non-success status or
    /// malformed body all produce an empty vec and a warning in the log.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str, per_page: u32) -> Vec<SearchHit> {
        match self.fetch_hits(term, per_page).await {
            Ok(hits) => hits,
            Err(GeniusError::MissingCredential) => {
                warn!("Genius access token not set, returning empty search result");
                Vec::new()
            }
            Err(e) => {
                warn!(term = %term, error = %e, "Genius search failed, returning empty result");
                Vec::new()
            }
        }
    }

    /// Look up a single artist by Genius ID
    ///
    /// # Errors
    /// - `GeniusError::MissingCredential` - If no access token is configured
    /// - `GeniusError::Remote` - If Genius answers with a non-success status
    /// - `GeniusError::Timeout` / `GeniusError::Http` - If the request fails in transit
    /// - `GeniusError::MalformedResponse` - If the body lacks `response.artist`
    #[instrument(skip(self))]
    pub async fn lookup_artist(&self, artist_id: u64) -> GeniusResult<ArtistRecord> {
        let token = self
            .config
            .credential()
            .ok_or(GeniusError::MissingCredential)?;

        debug!(artist_id, "Fetching artist from Genius");

        let text = self
            .get_text(
                &self.config.artist_url(artist_id),
                &[("access_token", token)],
            )
            .await?;

        let envelope: ArtistEnvelope = serde_json::from_str(&text)?;
        let artist: ArtistRecord = envelope.response.artist.into();

        debug!(
            artist_id,
            name = %artist.name,
            followers = ?artist.followers_count,
            "Fetched artist"
        );

        Ok(artist)
    }
}
