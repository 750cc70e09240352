//! Command execution and output rendering

use anyhow::{Context, Result};
use genius_client::{
    ArtistRecord, ArtistResolver, FlatteningExporter, GeniusClient, SearchHit, TableBuilder,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::Command;

/// Run one command and return what should be printed on stdout
pub async fn run(command: Command, client: GeniusClient, json: bool) -> Result<String> {
    if !client.has_credential() {
        warn!("No Genius access token configured; names resolve through the fallback table");
    }

    match command {
        Command::Table { names } => {
            let builder = TableBuilder::new(ArtistResolver::new(client));
            let table = builder
                .build_table(&names)
                .await
                .context("Failed to build artist table")?;
            if json {
                to_json(&table)
            } else {
                Ok(table.to_string())
            }
        }
        Command::Search { term, per_page } => {
            let hits = client.search(&term, per_page).await;
            debug!(term = %term, hits = hits.len(), "Search finished");
            if json {
                to_json(&hits)
            } else {
                Ok(render_hits(&hits))
            }
        }
        Command::Artist { id } => {
            let artist = client
                .lookup_artist(id)
                .await
                .with_context(|| format!("Failed to look up artist {}", id))?;
            if json {
                to_json(&artist)
            } else {
                Ok(render_artist(&artist))
            }
        }
        Command::Export {
            terms,
            per_page,
            distinct,
        } => {
            let exporter = FlatteningExporter::new(client).with_per_page(per_page);
            let table = if distinct {
                exporter.distinct_artists(&terms).await
            } else {
                exporter.export_batch(&terms).await
            };
            if json {
                to_json(table.rows())
            } else {
                Ok(table.to_string())
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    rendered.push('\n');
    Ok(rendered)
}

/// One line per hit: artist id, artist name, title
fn render_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| {
            format!(
                "{}\t{}\t{}\n",
                hit.primary_artist_id(),
                hit.result.primary_artist.name,
                hit.result.title().unwrap_or("")
            )
        })
        .collect()
}

fn render_artist(artist: &ArtistRecord) -> String {
    let id = artist
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "None".to_string());
    let followers = artist
        .followers_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "None".to_string());
    format!(
        "name: {}\nid: {}\nfollowers_count: {}\n",
        artist.name, id, followers
    )
}
