use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::filter::FilterSpec;
use crate::table::{DataTable, QueryOutput, Record};
use crate::templates::SqlTemplates;

/// Uniform data-access client over one backend variant.
///
/// Owns its configuration and a single live connection. Operations take
/// `&mut self` and block for the duration of the round trip; callers that
/// need parallelism use one client per concurrent unit of work.
pub struct DataClient<B: Backend> {
    id: String,
    backend: B,
    config: ClientConfig,
    templates: SqlTemplates,
    conn: Option<B::Conn>,
}

impl<B: Backend> DataClient<B> {
    /// Connect and return a client holding a healthy connection, or fail
    /// with [`ClientError::Connection`]. A client is never constructed
    /// around a dead handle.
    pub fn connect(backend: B, config: ClientConfig) -> Result<Self> {
        let id = Uuid::new_v4().to_string();
        debug!(
            client_id = %id,
            source = backend.source_type(),
            url = config.masked_url().as_deref(),
            "establishing connection"
        );
        let mut conn = backend
            .connect(&config)
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        if !backend.is_connected(&mut conn) {
            return Err(ClientError::Connection(
                "backend returned an unhealthy connection".to_string(),
            ));
        }
        let templates = backend.templates();
        info!(client_id = %id, source = backend.source_type(), "connected");
        Ok(Self {
            id,
            backend,
            config,
            templates,
            conn: Some(conn),
        })
    }

    /// Instance id used for log correlation.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_type(&self) -> &'static str {
        self.backend.source_type()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The dialect templates this client renders SQL with.
    pub fn templates(&self) -> &SqlTemplates {
        &self.templates
    }

    /// Probe the current connection. A missing or broken handle reports
    /// `false`; the probe itself never errors.
    pub fn is_connected(&mut self) -> bool {
        match self.conn.as_mut() {
            Some(conn) => self.backend.is_connected(conn),
            None => false,
        }
    }

    /// Ensure the connection is usable. Healthy: no-op. Unhealthy with
    /// `allow_reload`: one reconnect attempt, no retry loop. Unhealthy
    /// otherwise: [`ClientError::Disconnected`], connection left unchanged.
    pub fn validate_connection(&mut self, allow_reload: bool) -> Result<()> {
        if self.is_connected() {
            return Ok(());
        }
        if allow_reload {
            warn!(client_id = %self.id, "connection unhealthy, reloading");
            self.reload()
        } else {
            Err(ClientError::Disconnected)
        }
    }

    /// Abandon the current handle and acquire a fresh connection from the
    /// stored configuration.
    pub fn reload(&mut self) -> Result<()> {
        let conn = self
            .backend
            .connect(&self.config)
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        self.conn = Some(conn);
        info!(client_id = %self.id, source = self.backend.source_type(), "connection reloaded");
        Ok(())
    }

    /// Single execution path shared by every read entry point: empty-SQL
    /// check before any connection use, then validation, then one driver
    /// execution. Shape conversion happens in the callers, after the fact.
    fn query(&mut self, sql: &str, allow_reload: bool) -> Result<QueryOutput> {
        if sql.trim().is_empty() {
            return Err(ClientError::InvalidQuery);
        }
        self.validate_connection(allow_reload)?;
        let conn = self.conn.as_mut().ok_or(ClientError::Disconnected)?;
        debug!(client_id = %self.id, sql, "executing query");
        let output = self
            .backend
            .execute(conn, sql)
            .map_err(ClientError::driver)?;
        debug!(client_id = %self.id, rows = output.num_rows(), "query returned");
        Ok(output)
    }

    /// Run SQL and return record-oriented rows, reconnecting first if the
    /// connection went stale.
    pub fn read(&mut self, sql: &str) -> Result<Vec<Record>> {
        self.read_with_reload(sql, true)
    }

    pub fn read_with_reload(&mut self, sql: &str, allow_reload: bool) -> Result<Vec<Record>> {
        Ok(self.query(sql, allow_reload)?.into_records())
    }

    /// Run SQL and return the tabular shape. Same execution path as
    /// [`DataClient::read`]; only the result shape differs.
    pub fn read_tabular(&mut self, sql: &str) -> Result<DataTable> {
        self.read_tabular_with_reload(sql, true)
    }

    pub fn read_tabular_with_reload(&mut self, sql: &str, allow_reload: bool) -> Result<DataTable> {
        Ok(self.query(sql, allow_reload)?.into_table())
    }

    /// Count rows in a table, optionally with extra aggregate expressions
    /// (pre-rendered SQL, e.g. `MAX("id") "max_id"`) and filters. Returns
    /// the single result record; backends that upcase unquoted aliases get
    /// their `ROWS` key normalized to `rows`.
    pub fn count(
        &mut self,
        schema: &str,
        table: &str,
        aggregate_cols: &[&str],
        filters: &[FilterSpec],
    ) -> Result<Record> {
        let where_clause = self.templates.where_clause(filters)?;
        let aggregate_cols = aggregate_cols.join(", ");
        let sql = self
            .templates
            .count_query(schema, table, &aggregate_cols, &where_clause);
        let records = self.read(&sql)?;
        let mut record = records.into_iter().next().unwrap_or_default();
        if let Some(rows) = record.get("ROWS").cloned() {
            record.entry("rows").or_insert(rows);
        }
        Ok(record)
    }

    /// Count rows bucketed by a partition column. `partition_column_type`
    /// must be `DATE` or `INT`; see
    /// [`SqlTemplates::partition_column_sql`](crate::templates::SqlTemplates::partition_column_sql).
    pub fn count_by_partition(
        &mut self,
        schema: &str,
        table: &str,
        partition_column: &str,
        partition_column_type: &str,
        filters: &[FilterSpec],
    ) -> Result<Vec<Record>> {
        let partition_sql = self
            .templates
            .partition_column_sql(partition_column, partition_column_type)?;
        let where_clause = self.templates.where_clause(filters)?;
        let sql =
            self.templates
                .partition_count_query(schema, table, &partition_sql, &where_clause);
        self.read(&sql)
    }

    /// Deterministic teardown. Dropping the client does the same.
    pub fn close(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            if self.backend.is_connected(&mut conn) {
                debug!(client_id = %self.id, "closing connection");
                self.backend.close(conn);
            }
        }
    }
}

impl<B: Backend> Drop for DataClient<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
