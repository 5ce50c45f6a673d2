// Integration tests against real SQLite databases.
use serde_json::json;
use tempfile::tempdir;

use dv_datasource::backends::SqliteBackend;
use dv_datasource::{ClientConfig, ClientError, DataClient, FilterSpec, FilterType};

fn seed_events(path: &std::path::Path) {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE events (
            id INTEGER PRIMARY KEY,
            created_at TEXT NOT NULL
        );
        INSERT INTO events (id, created_at) VALUES
            (1, '2023-01-01'),
            (2, '2023-01-01'),
            (3, '2023-01-02');
        "#,
    )
    .unwrap();
}

fn client_for(path: &std::path::Path) -> DataClient<SqliteBackend> {
    let config = ClientConfig::new().with("path", path.to_string_lossy().to_string());
    DataClient::connect(SqliteBackend, config).unwrap()
}

#[test]
fn read_and_read_tabular_see_the_same_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.db");
    seed_events(&path);

    let mut client = client_for(&path);
    let records = client.read("SELECT id FROM events ORDER BY id").unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], json!(1));

    let table = client
        .read_tabular("SELECT id FROM events ORDER BY id")
        .unwrap();
    assert_eq!(table.num_rows(), 3);
    assert_eq!(table.to_records(), records);
}

#[test]
fn count_returns_rows_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.db");
    seed_events(&path);

    let mut client = client_for(&path);
    let record = client.count("main", "events", &[], &[]).unwrap();
    assert_eq!(record["rows"], json!(3));
}

#[test]
fn count_with_filters_and_aggregates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.db");
    seed_events(&path);

    let mut client = client_for(&path);
    let filters = vec![
        FilterSpec::new(FilterType::Date, "created_at", ">=", "2023-01-01"),
        FilterSpec::new(FilterType::Int, "id", "<", 3),
    ];
    let record = client
        .count("main", "events", &["MAX(\"id\") \"max_id\""], &filters)
        .unwrap();
    assert_eq!(record["rows"], json!(2));
    assert_eq!(record["max_id"], json!(2));
}

#[test]
fn count_by_date_partition_buckets_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.db");
    seed_events(&path);

    let mut client = client_for(&path);
    let mut records = client
        .count_by_partition("main", "events", "created_at", "DATE", &[])
        .unwrap();
    records.sort_by_key(|r| r["partition_column"].as_str().map(str::to_string));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["partition_column"], json!("2023-01-01"));
    assert_eq!(records[0]["rows"], json!(2));
    assert_eq!(records[1]["partition_column"], json!("2023-01-02"));
    assert_eq!(records[1]["rows"], json!(1));
}

#[test]
fn count_by_int_partition_buckets_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.db");
    seed_events(&path);

    let mut client = client_for(&path);
    let records = client
        .count_by_partition("main", "events", "id", "INT", &[])
        .unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn bogus_partition_type_is_rejected_before_execution() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.db");
    seed_events(&path);

    let mut client = client_for(&path);
    assert!(matches!(
        client.count_by_partition("main", "events", "id", "BOGUS", &[]),
        Err(ClientError::UnsupportedPartitionType(_))
    ));
}

#[test]
fn sqlite_syntax_error_surfaces_as_driver_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.db");
    seed_events(&path);

    let mut client = client_for(&path);
    assert!(matches!(
        client.read("SELEC id FROM events"),
        Err(ClientError::Driver(_))
    ));
}

#[test]
fn empty_sql_is_rejected() {
    let mut client = DataClient::connect(SqliteBackend, ClientConfig::new()).unwrap();
    assert!(matches!(client.read(""), Err(ClientError::InvalidQuery)));
}

#[test]
fn in_memory_default_works_end_to_end() {
    let mut client = DataClient::connect(SqliteBackend, ClientConfig::new()).unwrap();
    let rows = client.read("SELECT 1 AS one").unwrap();
    assert_eq!(rows[0]["one"], json!(1));
}
