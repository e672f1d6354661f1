//! Convenient imports for typical `namedq` usage.
//!
//! ```ignore
//! use namedq::prelude::*;
//! ```

pub use crate::args;
pub use crate::{
    BindStyle, CatalogClient, ClientConfig, Cursor, DbError, DbResult, StatementCatalog, Store,
    Value,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};

#[cfg(feature = "sqlite")]
pub use crate::{SqliteRow, SqliteStore};
