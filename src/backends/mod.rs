// Concrete backend variants. Each one supplies the driver-specific pieces
// of the Backend contract; everything else lives in the generic client.
pub mod sqlite;

pub use sqlite::SqliteBackend;
