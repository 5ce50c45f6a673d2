use crate::config::ClientConfig;
use crate::table::QueryOutput;
use crate::templates::SqlTemplates;

/// Driver boundary, implemented once per backend variant.
///
/// Only connection acquisition and the liveness probe are genuinely
/// backend-specific; everything else the client builds generically on top.
/// The contract is synchronous and blocking: a hang in the underlying
/// driver propagates as a hang to the caller, and timeouts are the
/// backend's own concern.
pub trait Backend {
    /// Live connection handle owned by exactly one client.
    type Conn;
    /// Driver-native error type, surfaced to callers unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short name of the backing technology, for logs.
    fn source_type(&self) -> &'static str;

    /// Establish a fresh connection from the given parameters.
    fn connect(&self, config: &ClientConfig) -> Result<Self::Conn, Self::Error>;

    /// Liveness probe. Must not error: a provably broken handle reports
    /// `false` rather than propagating.
    fn is_connected(&self, conn: &mut Self::Conn) -> bool;

    /// Release a handle. Safe on handles that are already dead; most
    /// drivers close on drop, which the default relies on.
    fn close(&self, conn: Self::Conn) {
        drop(conn);
    }

    /// Run SQL and return the result in whichever shape the driver
    /// produced naturally.
    fn execute(&self, conn: &mut Self::Conn, sql: &str) -> Result<QueryOutput, Self::Error>;

    /// Dialect template registry for this variant. Override to change the
    /// quote character or individual template entries.
    fn templates(&self) -> SqlTemplates {
        SqlTemplates::default()
    }
}
