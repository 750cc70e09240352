//! Artist summary table built from a list of names

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::GeniusResult;
use crate::models::ArtistRecord;
use crate::resolver::{ArtistFallback, ArtistResolver, StaticFallback};

/// Page size used when resolving names for a table
pub const TABLE_SEARCH_PER_PAGE: u32 = 10;

/// One row of the artist table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Name as the caller supplied it
    pub search_term: String,
    pub artist_name: Option<String>,
    pub artist_id: Option<u64>,
    pub followers_count: Option<u64>,
}

impl ResultRow {
    /// Project a resolved record into a row
    ///
    /// An unresolved record yields [`ResultRow::empty`].
    pub fn from_record(search_term: impl Into<String>, record: ArtistRecord) -> Self {
        if record.is_unresolved() {
            return Self::empty(search_term);
        }
        Self {
            search_term: search_term.into(),
            artist_name: Some(record.name),
            artist_id: record.id,
            followers_count: record.followers_count,
        }
    }

    /// Row with every artist column null
    pub fn empty(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            artist_name: None,
            artist_id: None,
            followers_count: None,
        }
    }
}

/// Ordered artist table with a fixed column set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Column names, in order
    pub const COLUMNS: [&'static str; 4] =
        ["search_term", "artist_name", "artist_id", "followers_count"];

    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "None".to_string())
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<[String; 4]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.search_term.clone(),
                    cell(&row.artist_name),
                    cell(&row.artist_id),
                    cell(&row.followers_count),
                ]
            })
            .collect();

        let mut widths = Self::COLUMNS.map(str::len);
        for cells in &rendered {
            for (width, value) in widths.iter_mut().zip(cells) {
                *width = (*width).max(value.chars().count());
            }
        }

        let header: Vec<String> = Self::COLUMNS
            .iter()
            .zip(widths)
            .map(|(name, width)| format!("{:<width$}", name, width = width))
            .collect();
        writeln!(f, "{}", header.join("  ").trim_end())?;

        for cells in &rendered {
            let line: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(value, width)| format!("{:<width$}", value, width = width))
                .collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
        }
        Ok(())
    }
}

/// Builds a [`ResultTable`] by resolving names one at a time
#[derive(Debug, Clone)]
pub struct TableBuilder<F = StaticFallback> {
    resolver: ArtistResolver<F>,
}

impl<F: ArtistFallback> TableBuilder<F> {
    /// Wrap a resolver; its search page size is set to the table default
    pub fn new(resolver: ArtistResolver<F>) -> Self {
        Self {
            resolver: resolver.with_per_page(TABLE_SEARCH_PER_PAGE),
        }
    }

    pub fn resolver(&self) -> &ArtistResolver<F> {
        &self.resolver
    }

    /// Resolve every name in order, one row per name
    ///
    /// Duplicate names produce duplicate rows. Requests are issued
    /// sequentially.
    ///
    /// # Errors
    /// The first error from [`ArtistResolver::resolve`] aborts the whole batch.
    #[instrument(skip(self, names), fields(count = names.len()))]
    pub async fn build_table<S: AsRef<str>>(&self, names: &[S]) -> GeniusResult<ResultTable> {
        let mut rows = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let record = self.resolver.resolve(name).await?;
            debug!(name = %name, artist_id = ?record.id, "Resolved table row");
            rows.push(ResultRow::from_record(name, record));
        }

        info!(rows = rows.len(), "Built artist table");
        Ok(ResultTable::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GeniusClient;
    use genius_shared_config::GeniusConfig;

    fn offline_builder() -> TableBuilder {
        let client = GeniusClient::new(&GeniusConfig::with_url("http://127.0.0.1:9")).unwrap();
        TableBuilder::new(ArtistResolver::new(client))
    }

    #[test]
    fn test_builder_uses_table_page_size() {
        assert_eq!(offline_builder().resolver().per_page(), TABLE_SEARCH_PER_PAGE);
    }

    #[tokio::test]
    async fn test_build_table_preserves_order_and_duplicates() {
        let names = ["Rihanna", "Zzyzx", "Rihanna", "Radiohead"];
        let table = offline_builder().build_table(&names).await.unwrap();

        assert_eq!(table.len(), names.len());
        let terms: Vec<&str> = table.rows().iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, names);
        assert_eq!(table.rows()[0], table.rows()[2]);
        assert_eq!(table.rows()[1].artist_id, None);
        assert_eq!(table.rows()[1].followers_count, Some(0));
        assert_eq!(table.rows()[3].artist_id, Some(604));
    }

    #[tokio::test]
    async fn test_build_table_empty_input() {
        let names: [&str; 0] = [];
        let table = offline_builder().build_table(&names).await.unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_record_unresolved_is_empty_row() {
        let row = ResultRow::from_record("Zzyzx", ArtistRecord::unresolved("Zzyzx"));
        assert_eq!(row, ResultRow::empty("Zzyzx"));

        let stub = ResultRow::from_record(
            "Zzyzx",
            ArtistRecord {
                id: None,
                name: "Zzyzx".to_string(),
                followers_count: Some(0),
            },
        );
        assert_eq!(stub.artist_name.as_deref(), Some("Zzyzx"));
        assert_eq!(stub.followers_count, Some(0));
    }

    #[test]
    fn test_display_renders_nulls_as_none() {
        let table = ResultTable::new(vec![
            ResultRow::from_record("rihanna", ArtistRecord::new(89, "Rihanna", 5700)),
            ResultRow::empty("Zzyzx"),
        ]);
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("search_term"));
        assert!(lines[1].contains("Rihanna") && lines[1].contains("5700"));
        assert!(lines[2].starts_with("Zzyzx") && lines[2].ends_with("None"));
    }
}
