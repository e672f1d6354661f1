//! # namedq
//!
//! Driver-neutral named SQL for Rust.
//!
//! Statements are written once with `:name` placeholders and kept in a
//! [`StatementCatalog`]. At execution time they are compiled for the store's
//! placeholder dialect (`?`, `$n`, `@pn` or `:name`) and the caller's flat
//! key/value arguments are projected into positional parameters.
//!
//! ## Features
//!
//! - **One placeholder syntax**: `:name`, with `::` for a literal colon
//! - **Dialect resolution**: driver name → [`BindStyle`]
//! - **Catalog-driven execution**: [`CatalogClient::query`] / [`CatalogClient::execute`]
//! - **Stores**: `tokio-postgres` (and `deadpool-postgres` with `pool`), SQLite with `sqlite`
//! - **Logging**: `tracing` events under the `namedq.sql` target
//!
//! ```ignore
//! use namedq::{BindStyle, compile};
//!
//! let q = compile("SELECT content FROM records WHERE type=:qtype and name=:qname", BindStyle::Question)?;
//! assert_eq!(q.sql(), "SELECT content FROM records WHERE type=? and name=?");
//! assert_eq!(q.names(), ["qtype", "qname"]);
//! ```

pub mod args;
pub mod bind_style;
mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod named;
pub mod postgres;
pub mod prelude;
pub mod store;
pub mod value;

pub use args::{ArgumentMap, bind, project};
pub use bind_style::{BindStyle, bind_style, known_drivers};
pub use catalog::{CatalogFile, StatementCatalog};
pub use client::CatalogClient;
pub use config::ClientConfig;
pub use error::{DbError, DbResult};
pub use named::{CompiledQuery, compile};
pub use store::{Cursor, Store};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteRow, SqliteStore};
