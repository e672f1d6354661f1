//! Error types for namedq

use thiserror::Error;

/// Result type alias for namedq operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for compiling, binding and executing catalog statements
#[derive(Debug, Error)]
pub enum DbError {
    /// A template has an unescaped `:` inside a parameter name
    #[error("unexpected `:` while reading named parameter at {index}")]
    MalformedTemplate { index: usize },

    /// Flat key/value argument list with an unpaired element
    #[error("odd number of arguments: {0} (expected key/value pairs)")]
    OddArgumentCount(usize),

    /// The statement catalog has no entry for the requested id
    #[error("unknown statement: {0}")]
    UnknownStatement(String),

    /// Postgres rejected the statement
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// SQLite rejected the statement
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Any other store rejected the statement
    #[error("Store error: {0}")]
    Store(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Catalog file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl DbError {
    /// Create a malformed-template error at a char index
    pub fn malformed_template(index: usize) -> Self {
        Self::MalformedTemplate { index }
    }

    /// Create an unknown-statement error
    pub fn unknown_statement(statement: impl Into<String>) -> Self {
        Self::UnknownStatement(statement.into())
    }

    /// Create a generic store execution error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Check if the underlying store rejected the statement.
    ///
    /// Everything else is raised before the store is reached.
    pub fn is_store_error(&self) -> bool {
        match self {
            Self::Query(_) | Self::Store(_) => true,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => true,
            _ => false,
        }
    }

    /// Check if this is a malformed template error
    pub fn is_malformed_template(&self) -> bool {
        matches!(self, Self::MalformedTemplate { .. })
    }

    /// Check if this is an unknown statement error
    pub fn is_unknown_statement(&self) -> bool {
        matches!(self, Self::UnknownStatement(_))
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for DbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
