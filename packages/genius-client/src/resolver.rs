//! Resolve a human-supplied artist name to a full artist record

use tracing::{debug, instrument, warn};

use crate::client::{GeniusClient, DEFAULT_SEARCH_PER_PAGE};
use crate::error::{GeniusError, GeniusResult};
use crate::models::ArtistRecord;

/// Supplies a record when a name cannot be resolved against Genius
///
/// Used when no access token is configured, when a search comes back empty,
/// and when an artist lookup returns a body we cannot parse.
pub trait ArtistFallback: Send + Sync {
    /// Produce a record for `name`
    fn fallback(&self, name: &str) -> ArtistRecord;
}

/// Deterministic stub table of well-known artists
///
/// Keys are matched case-insensitively after trimming. Any other name maps to
/// `{ name, id: None, followers_count: Some(0) }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFallback;

/// (aliases, canonical name, id, followers)
const KNOWN_ARTISTS: &[(&[&str], &str, u64, u64)] = &[
    (&["rihanna"], "Rihanna", 89, 5700),
    (&["the beatles", "beatles"], "The Beatles", 586, 3100),
    (&["radiohead"], "Radiohead", 604, 2500),
];

impl StaticFallback {
    /// Look `name` up in the stub table
    pub fn known(name: &str) -> Option<ArtistRecord> {
        let key = name.trim().to_lowercase();
        KNOWN_ARTISTS
            .iter()
            .find(|(aliases, ..)| aliases.contains(&key.as_str()))
            .map(|(_, canonical, id, followers)| ArtistRecord::new(*id, *canonical, *followers))
    }
}

impl ArtistFallback for StaticFallback {
    fn fallback(&self, name: &str) -> ArtistRecord {
        Self::known(name).unwrap_or_else(|| ArtistRecord {
            id: None,
            name: name.to_string(),
            followers_count: Some(0),
        })
    }
}

/// Fallback that leaves unresolved names fully null
///
/// The table builder renders these records as rows with every artist column null.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl ArtistFallback for NoFallback {
    fn fallback(&self, name: &str) -> ArtistRecord {
        ArtistRecord::unresolved(name)
    }
}

/// Resolves artist names through search followed by lookup
#[derive(Debug, Clone)]
pub struct ArtistResolver<F = StaticFallback> {
    client: GeniusClient,
    fallback: F,
    per_page: u32,
}

impl ArtistResolver<StaticFallback> {
    /// Create a resolver backed by the stub table
    pub fn new(client: GeniusClient) -> Self {
        Self::with_fallback(client, StaticFallback)
    }
}

impl<F: ArtistFallback> ArtistResolver<F> {
    /// Create a resolver with a custom fallback
    pub fn with_fallback(client: GeniusClient, fallback: F) -> Self {
        Self {
            client,
            fallback,
            per_page: DEFAULT_SEARCH_PER_PAGE,
        }
    }

    /// Set the page size used for the name search
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Get the underlying client
    pub fn client(&self) -> &GeniusClient {
        &self.client
    }

    /// Page size used for the name search
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Resolve a name to an artist record
    ///
    /// The first hit's primary artist wins; there is no tie-break beyond
    /// Genius' own ranking.
    ///
    /// # Errors
    /// Any lookup failure other than a malformed body propagates unchanged.
    #[instrument(skip(self))]
    pub async fn resolve(&self, name: &str) -> GeniusResult<ArtistRecord> {
        if !self.client.has_credential() {
            debug!(name = %name, "No access token, using fallback record");
            return Ok(self.fallback.fallback(name));
        }

        let hits = self.client.search(name, self.per_page).await;
        let Some(first) = hits.first() else {
            debug!(name = %name, "No search hits, using fallback record");
            return Ok(self.fallback.fallback(name));
        };

        let artist_id = first.primary_artist_id();
        match self.client.lookup_artist(artist_id).await {
            Ok(artist) => Ok(artist),
            Err(GeniusError::MalformedResponse(reason)) => {
                warn!(
                    name = %name,
                    artist_id,
                    reason = %reason,
                    "Artist lookup returned a malformed body, using fallback record"
                );
                Ok(self.fallback.fallback(name))
            }
            Err(e) => Err(e),
        }
    }
}
