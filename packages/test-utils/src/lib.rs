//! Shared test utilities for the Genius artist tools
//!
//! This crate provides a mock Genius API for testing without network
//! dependencies, plus fixtures for the JSON it serves.
//!
//! # Mock Services
//!
//! - [`MockGeniusServer`] - Mock search and artist endpoints
//!
//! # Example
//!
//! ```rust,ignore
//! use genius_test_utils::{ArtistFixture, MockGeniusServer, SongHitFixture};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let server = MockGeniusServer::start().await;
//!     server
//!         .mock_search("Radiohead", vec![SongHitFixture::new(1, "Creep", 604, "Radiohead")])
//!         .await;
//!     server.mock_artist(ArtistFixture::new(604, "Radiohead", 2500)).await;
//!
//!     // Build your client from server.config()
//! }
//! ```

mod genius;

pub use genius::{ArtistFixture, MockGeniusServer, SongHitFixture};
