//! Catalog-driven execution.
//!
//! `CatalogClient` ties a [`StatementCatalog`] to a [`Store`]: callers name a
//! statement and pass flat key/value arguments, the client compiles the
//! template for the store's dialect, orders the arguments and executes.
//!
//! # Example
//!
//! ```ignore
//! use namedq::{CatalogClient, SqliteStore, StatementCatalog, args};
//!
//! let catalog = StatementCatalog::new()
//!     .with("basic-query", "SELECT content FROM records WHERE type=:qtype and name=:qname")
//!     .with("update-serial-query", "update domains set notified_serial=:serial where id=:domain_id");
//!
//! let client = CatalogClient::new(SqliteStore::open("pdns.db")?, catalog);
//!
//! let rows = client
//!     .fetch_all("basic-query", args!["qtype", "A", "qname", "x.example."])
//!     .await?;
//!
//! let changed = client
//!     .execute("update-serial-query", args!["serial", 2024010101, "domain_id", 1])
//!     .await?;
//! ```

use crate::args::{bind, project};
use crate::bind_style::BindStyle;
use crate::cache::CompiledCache;
use crate::catalog::StatementCatalog;
use crate::config::ClientConfig;
use crate::error::{DbError, DbResult};
use crate::named::{CompiledQuery, compile};
use crate::store::{Cursor, Store};
use crate::value::Value;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Executes catalog statements against a store.
///
/// The dialect is fixed at construction. With a statement cache configured,
/// each statement is compiled once and reused.
pub struct CatalogClient<S> {
    store: S,
    catalog: Arc<StatementCatalog>,
    style: BindStyle,
    cache: Option<CompiledCache>,
    config: ClientConfig,
}

impl<S: Store> CatalogClient<S> {
    /// Create a client; the dialect is resolved from `store.driver_name()`.
    pub fn new(store: S, catalog: impl Into<Arc<StatementCatalog>>) -> Self {
        Self::with_config(store, catalog, ClientConfig::default())
    }

    pub fn with_config(
        store: S,
        catalog: impl Into<Arc<StatementCatalog>>,
        config: ClientConfig,
    ) -> Self {
        let style = config
            .bind_style
            .unwrap_or_else(|| BindStyle::for_driver(store.driver_name()));
        let cache = (config.statement_cache > 0).then(|| CompiledCache::new(config.statement_cache));
        Self {
            store,
            catalog: catalog.into(),
            style,
            cache,
            config,
        }
    }

    pub fn bind_style(&self) -> BindStyle {
        self.style
    }

    pub fn catalog(&self) -> &StatementCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Compile a catalog statement for this client's dialect without running it.
    pub fn prepare(&self, statement: &str) -> DbResult<Arc<CompiledQuery>> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(statement)) {
            return Ok(hit);
        }

        let template = self
            .catalog
            .get(statement)
            .ok_or_else(|| DbError::unknown_statement(statement))?;
        let compiled = Arc::new(compile(template, self.style)?);

        Ok(match &self.cache {
            Some(cache) => cache.insert_if_absent(statement.to_string(), compiled),
            None => compiled,
        })
    }

    /// Compile every catalog statement; the first malformed one is returned.
    pub fn validate_catalog(&self) -> DbResult<()> {
        self.catalog.validate(self.style).map_err(|(id, err)| {
            if self.config.logging_enabled {
                tracing::error!(target: "namedq.sql", statement = %id, error = %err, "malformed catalog statement");
            }
            err
        })
    }

    /// Drop every cached compiled statement.
    pub fn clear_statement_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Compile, bind and project: the positional parameters for one call.
    pub fn bind_call(
        &self,
        statement: &str,
        args: Vec<Value>,
    ) -> DbResult<(Arc<CompiledQuery>, Vec<Value>)> {
        let compiled = self.prepare(statement)?;
        let bound = bind(args)?;
        let params = project(compiled.names(), &bound);
        Ok((compiled, params))
    }

    /// Run a catalog query and return a cursor over its rows.
    pub async fn query(&self, statement: &str, args: Vec<Value>) -> DbResult<Cursor<S::Row>> {
        let (compiled, params) = self
            .bind_call(statement, args)
            .inspect_err(|e| self.log_rejected(statement, e))?;

        self.log_start("query", statement, &compiled);
        let start = Instant::now();
        let result = self.store.query(compiled.sql(), &params).await;
        self.log_outcome(statement, start.elapsed(), result.as_ref().err());
        result
    }

    /// Run a mutating catalog statement and return the number of affected rows.
    pub async fn execute(&self, statement: &str, args: Vec<Value>) -> DbResult<u64> {
        let (compiled, params) = self
            .bind_call(statement, args)
            .inspect_err(|e| self.log_rejected(statement, e))?;

        self.log_start("execute", statement, &compiled);
        let start = Instant::now();
        let result = self.store.execute(compiled.sql(), &params).await;
        self.log_outcome(statement, start.elapsed(), result.as_ref().err());
        result
    }

    /// Run a catalog query and collect every row.
    pub async fn fetch_all(&self, statement: &str, args: Vec<Value>) -> DbResult<Vec<S::Row>> {
        self.query(statement, args).await?.try_collect().await
    }

    /// Run a catalog query and return the first row, if any.
    pub async fn fetch_opt(&self, statement: &str, args: Vec<Value>) -> DbResult<Option<S::Row>> {
        let mut cursor = self.query(statement, args).await?;
        cursor.next_row().await.transpose()
    }

    fn display_sql<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        match self.config.max_sql_length {
            Some(max) if sql.len() > max => {
                Cow::Owned(format!("{}...", truncate_sql_bytes(sql, max)))
            }
            _ => Cow::Borrowed(sql),
        }
    }

    fn log_start(&self, kind: &'static str, statement: &str, compiled: &CompiledQuery) {
        if !self.config.logging_enabled {
            return;
        }
        let sql = self.display_sql(compiled.sql());
        tracing::debug!(
            target: "namedq.sql",
            kind,
            statement,
            bind_style = %self.style,
            param_count = compiled.placeholder_count(),
            sql = %sql,
            "executing catalog statement"
        );
    }

    fn log_rejected(&self, statement: &str, err: &DbError) {
        if self.config.logging_enabled {
            tracing::warn!(target: "namedq.sql", statement, error = %err, "catalog statement rejected");
        }
    }

    fn log_outcome(&self, statement: &str, elapsed: Duration, err: Option<&DbError>) {
        if !self.config.logging_enabled {
            return;
        }
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        if let Some(err) = err {
            tracing::warn!(target: "namedq.sql", statement, elapsed_ms, error = %err, "catalog statement failed");
            return;
        }
        match self.config.slow_query_threshold {
            Some(threshold) if elapsed >= threshold => {
                tracing::warn!(target: "namedq.sql", statement, elapsed_ms, "slow catalog statement");
            }
            _ => {
                tracing::trace!(target: "namedq.sql", statement, elapsed_ms, "catalog statement done");
            }
        }
    }
}

impl<S> std::fmt::Debug for CatalogClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("bind_style", &self.style)
            .field("statements", &self.catalog.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
