//! Flatten raw search hits into ragged tables

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::client::GeniusClient;
use crate::models::SearchHit;

/// Page size used by the exporter unless overridden
pub const EXPORT_SEARCH_PER_PAGE: u32 = 10;

/// Prefix applied to flattened `stats` keys
const STAT_PREFIX: &str = "stat_";

/// Prefix applied to flattened `primary_artist` keys
const PRIMARY_ARTIST_PREFIX: &str = "primary_artist_";

static NULL: Value = Value::Null;

/// One flattened record; absent keys read as null
pub type FlatRecord = Map<String, Value>;

/// Table of flattened records with the ordered union of their columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<FlatRecord>,
}

impl FlatTable {
    /// Columns kept by [`FlatTable::distinct_artists`]
    pub const ARTIST_COLUMNS: [&'static str; 3] = [
        "primary_artist_name",
        "primary_artist_id",
        "primary_artist_url",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row given as ordered (column, value) pairs
    ///
    /// Columns not seen before are added in the order they appear.
    pub fn push(&mut self, fields: Vec<(String, Value)>) {
        let mut record = FlatRecord::new();
        for (column, value) in fields {
            if !self.columns.contains(&column) {
                self.columns.push(column.clone());
            }
            record.insert(column, value);
        }
        self.rows.push(record);
    }

    /// Concatenate another table below this one
    pub fn append(&mut self, other: FlatTable) {
        for column in other.columns {
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self.rows.extend(other.rows);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FlatRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at (`row`, `column`)
    ///
    /// `None` when `row` is out of bounds; a row lacking the column reads as null.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).map(|record| value_in(record, column))
    }

    /// Project onto the primary artist columns and drop exact duplicates
    ///
    /// Only the artist columns present in this table are kept. An empty table
    /// projects to an empty table carrying all three column names.
    pub fn distinct_artists(&self) -> FlatTable {
        if self.is_empty() {
            return FlatTable {
                columns: Self::ARTIST_COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows: Vec::new(),
            };
        }

        let columns: Vec<&str> = Self::ARTIST_COLUMNS
            .into_iter()
            .filter(|c| self.columns.iter().any(|existing| existing == c))
            .collect();

        let mut seen = HashSet::new();
        let mut distinct = FlatTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        };

        for record in &self.rows {
            let cells: Vec<&Value> = columns.iter().map(|c| value_in(record, c)).collect();
            let key = Value::Array(cells.iter().map(|v| (*v).clone()).collect()).to_string();
            if seen.insert(key) {
                distinct.rows.push(
                    columns
                        .iter()
                        .zip(cells)
                        .map(|(c, v)| (c.to_string(), v.clone()))
                        .collect(),
                );
            }
        }

        distinct
    }
}

fn value_in<'a>(record: &'a FlatRecord, column: &str) -> &'a Value {
    record.get(column).unwrap_or(&NULL)
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Tab-separated rendering with a header line
impl fmt::Display for FlatTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", self.columns.join("\t"))?;
        for record in &self.rows {
            let line: Vec<String> = self
                .columns
                .iter()
                .map(|c| render_cell(value_in(record, c)))
                .collect();
            writeln!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}

/// Flatten one hit's result into ordered (column, value) pairs
///
/// The result's fields come first in API order with `stats` left in place,
/// then the `primary_artist` object, then `stat_*` and `primary_artist_*`.
/// A `stats` value that is not an object is not expanded.
pub fn flatten_hit(hit: SearchHit) -> Vec<(String, Value)> {
    let result = hit.result;
    let stats = result.stats().cloned();

    let artist = result.primary_artist;
    let mut artist_fields = Map::new();
    artist_fields.insert("id".to_string(), Value::from(artist.id));
    artist_fields.insert("name".to_string(), Value::String(artist.name));
    if let Some(url) = artist.url {
        artist_fields.insert("url".to_string(), Value::String(url));
    }
    artist_fields.extend(artist.extra);

    let mut fields: Vec<(String, Value)> = result.fields.into_iter().collect();
    fields.push((
        "primary_artist".to_string(),
        Value::Object(artist_fields.clone()),
    ));

    if let Some(stats) = stats {
        fields.extend(
            stats
                .into_iter()
                .map(|(key, value)| (format!("{}{}", STAT_PREFIX, key), value)),
        );
    }

    fields.extend(
        artist_fields
            .into_iter()
            .map(|(key, value)| (format!("{}{}", PRIMARY_ARTIST_PREFIX, key), value)),
    );

    fields
}

/// Runs searches and flattens their hits into tables
#[derive(Debug, Clone)]
pub struct FlatteningExporter {
    client: GeniusClient,
    per_page: u32,
}

impl FlatteningExporter {
    pub fn new(client: GeniusClient) -> Self {
        Self {
            client,
            per_page: EXPORT_SEARCH_PER_PAGE,
        }
    }

    /// Set the number of hits requested per term
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Search one term and flatten every hit
    ///
    /// An empty or failed search yields an empty table. Hits without a usable
    /// `primary_artist` are dropped by the search and never reach the table.
    #[instrument(skip(self))]
    pub async fn export(&self, term: &str) -> FlatTable {
        let hits = self.client.search(term, self.per_page).await;
        if hits.is_empty() {
            debug!(term = %term, "No data gathered");
            return FlatTable::new();
        }

        let mut table = FlatTable::new();
        for hit in hits {
            table.push(flatten_hit(hit));
        }

        debug!(term = %term, rows = table.len(), columns = table.columns().len(), "Flattened hits");
        table
    }

    /// Export each term in order and concatenate the results
    ///
    /// Columns are the union across terms. When every term comes back empty
    /// the result has neither rows nor columns.
    #[instrument(skip(self, terms), fields(count = terms.len()))]
    pub async fn export_batch<S: AsRef<str>>(&self, terms: &[S]) -> FlatTable {
        let mut combined = FlatTable::new();
        for term in terms {
            let table = self.export(term.as_ref()).await;
            if !table.is_empty() {
                combined.append(table);
            }
        }

        info!(rows = combined.len(), "Exported search hits");
        combined
    }

    /// Distinct primary artists across all terms, first occurrence first
    pub async fn distinct_artists<S: AsRef<str>>(&self, terms: &[S]) -> FlatTable {
        self.export_batch(terms).await.distinct_artists()
    }
}
