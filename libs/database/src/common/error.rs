/// Connector-level error type.
///
/// Driver errors raised while serving requests are mapped by each domain crate;
/// this type covers connection management and health probes only.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver error while building or using the client
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Server did not answer the initial ping
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health probe failed on an established client
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for connector operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
