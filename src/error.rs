use thiserror::Error;

/// Error type covering the full client surface.
///
/// Driver-level execution failures are carried as-is in [`ClientError::Driver`];
/// the client never rewords or reinterprets them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A new connection could not be established (unreachable host,
    /// rejected credentials, bad parameters).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The connection is unhealthy and the caller disallowed reloading.
    #[error("client disconnected; reload not allowed")]
    Disconnected,

    /// Empty or blank SQL text. Raised before any connection use.
    #[error("invalid query: sql text is empty")]
    InvalidQuery,

    /// Filter type outside the supported set (DATE, INT, OTHER).
    #[error("unsupported filter type: {0}")]
    UnsupportedFilterType(String),

    /// Partition column type outside the supported set (DATE, INT).
    #[error("unsupported partition column type: {0}")]
    UnsupportedPartitionType(String),

    /// A filter value that cannot be rendered as a SQL literal for its
    /// declared type (e.g. a DATE filter with a non-date value).
    #[error("invalid filter value for column {column}: {reason}")]
    InvalidFilterValue { column: String, reason: String },

    /// A failure reported by the underlying driver while executing SQL,
    /// propagated unmodified.
    #[error(transparent)]
    Driver(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ClientError {
    pub fn driver<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ClientError::Driver(Box::new(err))
    }

    pub fn invalid_filter_value(column: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::InvalidFilterValue {
            column: column.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
