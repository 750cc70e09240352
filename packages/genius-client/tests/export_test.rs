//! Integration tests for flattened search exports

use genius_client::{FlatTable, FlatteningExporter, GeniusClient, EXPORT_SEARCH_PER_PAGE};
use genius_test_utils::{MockGeniusServer, SongHitFixture};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn exporter_for(server: &MockGeniusServer) -> FlatteningExporter {
    FlatteningExporter::new(GeniusClient::new(&server.config()).unwrap())
}

#[tokio::test]
async fn test_export_flattens_stats_and_primary_artist() {
    let server = MockGeniusServer::start().await;
    server
        .mock_search(
            "Umbrella",
            vec![
                SongHitFixture::new(1, "Umbrella", 89, "Rihanna"),
                SongHitFixture::new(2, "Umbrella (Cover)", 5, "Someone").without_stats(),
            ],
        )
        .await;

    let table = exporter_for(&server).export("Umbrella").await;

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, "title"), Some(&json!("Umbrella")));
    assert_eq!(table.cell(0, "stat_pageviews"), Some(&json!(1001)));
    assert_eq!(table.cell(0, "stat_hot"), Some(&json!(false)));
    assert_eq!(table.cell(0, "primary_artist_id"), Some(&json!(89)));
    assert_eq!(table.cell(0, "primary_artist_name"), Some(&json!("Rihanna")));
    assert_eq!(
        table.cell(0, "primary_artist_url"),
        Some(&json!("https://genius.com/artists/Rihanna"))
    );
    // Second hit has no stats, so its stat columns read as null
    assert_eq!(table.cell(1, "stat_pageviews"), Some(&Value::Null));
    assert_eq!(table.cell(1, "primary_artist_id"), Some(&json!(5)));
}

#[tokio::test]
async fn test_export_keeps_nested_columns_in_api_order() {
    let server = MockGeniusServer::start().await;
    server
        .mock_search(
            "Umbrella",
            vec![
                SongHitFixture::new(1, "Umbrella", 89, "Rihanna"),
                SongHitFixture::new(2, "Umbrella (Cover)", 5, "Someone").without_stats(),
            ],
        )
        .await;

    let table = exporter_for(&server).export("Umbrella").await;

    assert_eq!(
        &table.columns()[..5],
        ["id", "title", "full_title", "stats", "primary_artist"]
    );
    assert_eq!(
        table.cell(0, "stats"),
        Some(&json!({"unreviewed_annotations": 0, "hot": false, "pageviews": 1001}))
    );
    assert_eq!(table.cell(1, "stats"), Some(&Value::Null));
    assert_eq!(
        table
            .cell(0, "primary_artist")
            .and_then(|artist| artist.get("name")),
        Some(&json!("Rihanna"))
    );
    assert_eq!(table.cell(2, "title"), None);
}

#[tokio::test]
async fn test_export_drops_hits_without_primary_artist() {
    let server = MockGeniusServer::start().await;
    server
        .mock_search_raw(
            "Creep",
            json!({
                "response": {"hits": [
                    {"type": "song", "result": {"id": 1, "title": "Orphan"}},
                    SongHitFixture::new(2, "Creep", 604, "Radiohead").to_json()
                ]}
            }),
        )
        .await;

    let table = exporter_for(&server).export("Creep").await;
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, "title"), Some(&json!("Creep")));
}

#[tokio::test]
async fn test_export_uses_export_page_size() {
    let server = MockGeniusServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("per_page", EXPORT_SEARCH_PER_PAGE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"hits": [SongHitFixture::new(1, "One", 5, "U2").to_json()]}
        })))
        .expect(1)
        .mount(server.inner())
        .await;

    let table = exporter_for(&server).export("U2").await;
    assert_eq!(table.len(), 1);
}

#[tokio::test]
async fn test_export_with_custom_page_size() {
    let server = MockGeniusServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("per_page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"hits": []}
        })))
        .expect(1)
        .mount(server.inner())
        .await;

    let table = exporter_for(&server).with_per_page(3).export("U2").await;
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_export_empty_search_has_zero_rows() {
    let server = MockGeniusServer::start().await;
    server.mock_search_empty("Zzyzx").await;

    let table = exporter_for(&server).export("Zzyzx").await;
    assert_eq!(table.len(), 0);
    assert!(table.columns().is_empty());
}

#[tokio::test]
async fn test_export_without_token_is_empty() {
    let server = MockGeniusServer::start().await;
    let exporter =
        FlatteningExporter::new(GeniusClient::new(&server.config_without_token()).unwrap());

    let table = exporter.export("Rihanna").await;
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_export_batch_concatenates_in_term_order() {
    let server = MockGeniusServer::start().await;
    server
        .mock_search("Creep", vec![SongHitFixture::new(1, "Creep", 604, "Radiohead")])
        .await;
    server.mock_search_empty("Zzyzx").await;
    server
        .mock_search(
            "Crazy",
            vec![SongHitFixture::new(2, "Crazy", 9, "Seal").without_stats()],
        )
        .await;

    let table = exporter_for(&server)
        .export_batch(&["Creep", "Zzyzx", "Crazy"])
        .await;

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, "primary_artist_name"), Some(&json!("Radiohead")));
    assert_eq!(table.cell(1, "primary_artist_name"), Some(&json!("Seal")));
    // Column union: stats columns from the first term survive
    assert!(table.columns().iter().any(|c| c == "stat_pageviews"));
    assert_eq!(table.cell(1, "stat_pageviews"), Some(&Value::Null));
}

#[tokio::test]
async fn test_export_batch_all_empty_has_no_columns() {
    let server = MockGeniusServer::start().await;
    server.mock_search_empty("A").await;
    server.mock_search_empty("B").await;

    let table = exporter_for(&server).export_batch(&["A", "B"]).await;
    assert_eq!(table, FlatTable::new());
}

#[tokio::test]
async fn test_distinct_artists_across_terms() {
    let server = MockGeniusServer::start().await;
    server
        .mock_search(
            "Creep",
            vec![
                SongHitFixture::new(1, "Creep", 604, "Radiohead"),
                SongHitFixture::new(2, "Creep", 111, "TLC"),
            ],
        )
        .await;
    server
        .mock_search(
            "Karma Police",
            vec![
                SongHitFixture::new(3, "Karma Police", 604, "Radiohead"),
                SongHitFixture::new(4, "Karma Police (Live)", 604, "Radiohead"),
            ],
        )
        .await;

    let distinct = exporter_for(&server)
        .distinct_artists(&["Creep", "Karma Police"])
        .await;

    assert_eq!(distinct.columns(), FlatTable::ARTIST_COLUMNS);
    assert_eq!(distinct.len(), 2);
    assert_eq!(distinct.cell(0, "primary_artist_id"), Some(&json!(604)));
    assert_eq!(distinct.cell(1, "primary_artist_id"), Some(&json!(111)));
    assert_eq!(distinct.cell(0, "title"), Some(&Value::Null));
}

#[tokio::test]
async fn test_distinct_artists_with_no_results() {
    let server = MockGeniusServer::start().await;
    server.mock_search_empty("Zzyzx").await;

    let distinct = exporter_for(&server).distinct_artists(&["Zzyzx"]).await;
    assert!(distinct.is_empty());
    assert_eq!(distinct.columns(), FlatTable::ARTIST_COLUMNS);
}
