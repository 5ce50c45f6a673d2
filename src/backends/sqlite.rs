use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::{json, Value};

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::table::{QueryOutput, Record};

/// SQLite-backed variant over the bundled `rusqlite` driver.
///
/// Config keys: `path` (file path, `:memory:` for in-memory), or `url`
/// in `sqlite:./file.db` / `sqlite://file.db` form. Defaults to in-memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteBackend;

impl SqliteBackend {
    fn resolve_path(config: &ClientConfig) -> String {
        if let Some(path) = config.get_str("path") {
            return path.to_string();
        }
        if let Some(url) = config.get_str("url") {
            // Handle SQLite URL format (sqlite:./path or sqlite://path)
            let mut cleaned = url.trim_start_matches("sqlite:");
            cleaned = cleaned.trim_start_matches("//");
            return cleaned.to_string();
        }
        ":memory:".to_string()
    }

    fn value_to_json(value: ValueRef<'_>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => json!(i),
            ValueRef::Real(f) => json!(f),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                match std::str::from_utf8(bytes) {
                    Ok(s) => json!(s),
                    Err(_) => Value::Null,
                }
            }
        }
    }
}

impl Backend for SqliteBackend {
    type Conn = Connection;
    type Error = rusqlite::Error;

    fn source_type(&self) -> &'static str {
        "sqlite"
    }

    fn connect(&self, config: &ClientConfig) -> Result<Connection, rusqlite::Error> {
        let path = Self::resolve_path(config);
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(&path)?
        };
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        Ok(conn)
    }

    fn is_connected(&self, conn: &mut Connection) -> bool {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }

    fn execute(&self, conn: &mut Connection, sql: &str) -> Result<QueryOutput, rusqlite::Error> {
        let mut stmt = conn.prepare(sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::new();
            for (idx, name) in column_names.iter().enumerate() {
                record.insert(name.clone(), Self::value_to_json(row.get_ref(idx)?));
            }
            records.push(record);
        }
        Ok(QueryOutput::Records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_prefers_explicit_path() {
        let config = ClientConfig::new()
            .with("path", "./data.db")
            .with("url", "sqlite:./other.db");
        assert_eq!(SqliteBackend::resolve_path(&config), "./data.db");
    }

    #[test]
    fn test_resolve_path_strips_sqlite_url_prefix() {
        let config = ClientConfig::new().with("url", "sqlite://app.db");
        assert_eq!(SqliteBackend::resolve_path(&config), "app.db");
    }

    #[test]
    fn test_resolve_path_defaults_to_memory() {
        assert_eq!(SqliteBackend::resolve_path(&ClientConfig::new()), ":memory:");
    }

    #[test]
    fn test_execute_maps_sqlite_values() {
        let backend = SqliteBackend;
        let mut conn = backend.connect(&ClientConfig::new()).unwrap();
        let output = backend
            .execute(&mut conn, "SELECT 1 AS n, 1.5 AS f, 'x' AS s, NULL AS missing")
            .unwrap();
        let records = output.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["n"], json!(1));
        assert_eq!(records[0]["f"], json!(1.5));
        assert_eq!(records[0]["s"], json!("x"));
        assert_eq!(records[0]["missing"], Value::Null);
    }

    #[test]
    fn test_is_connected_on_fresh_connection() {
        let backend = SqliteBackend;
        let mut conn = backend.connect(&ClientConfig::new()).unwrap();
        assert!(backend.is_connected(&mut conn));
    }
}
