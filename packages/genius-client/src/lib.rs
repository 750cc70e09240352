//! Genius API client
//!
//! This crate wraps the two Genius endpoints the artist tools need and the
//! pipelines built on top of them:
//! - Free-text search (best-effort, never fails)
//! - Artist lookup by ID (reports every failure)
//! - Name to artist resolution with a deterministic fallback
//! - Artist summary tables and flattened search exports
//!
//! # Example
//!
//! ```rust,no_run
//! use genius_client::{ArtistResolver, FlatteningExporter, GeniusClient, TableBuilder};
//! use genius_shared_config::GeniusConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeniusConfig::from_env()?;
//! let client = GeniusClient::new(&config)?;
//!
//! // One row per name, in order
//! let builder = TableBuilder::new(ArtistResolver::new(client.clone()));
//! let table = builder.build_table(&["Rihanna", "Radiohead"]).await?;
//! println!("{}", table);
//!
//! // Distinct primary artists across several searches
//! let exporter = FlatteningExporter::new(client);
//! let artists = exporter.distinct_artists(&["Creep", "Umbrella"]).await;
//! println!("{}", artists);
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `GENIUS_ACCESS_TOKEN` (or `ACCESS_TOKEN`): API token. Optional; without
//!   it searches return nothing and names resolve through the fallback table.

mod client;
mod error;
mod flatten;
mod models;
mod resolver;
mod table;

pub use client::{GeniusClient, DEFAULT_SEARCH_PER_PAGE};
pub use error::{GeniusError, GeniusResult};
pub use flatten::{flatten_hit, FlatRecord, FlatTable, FlatteningExporter, EXPORT_SEARCH_PER_PAGE};
pub use models::{ArtistRecord, HitResult, PrimaryArtist, SearchHit};
pub use resolver::{ArtistFallback, ArtistResolver, NoFallback, StaticFallback};
pub use table::{ResultRow, ResultTable, TableBuilder, TABLE_SEARCH_PER_PAGE};
