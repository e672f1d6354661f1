//! The seam between the catalog client and a relational engine.

use crate::error::DbResult;
use crate::value::Value;
use futures_core::Stream;
use futures_util::{StreamExt, TryStreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A relational store that executes already-compiled SQL.
///
/// `params` are positional and line up one-to-one with the placeholders in
/// `sql`. Implementations decide how [`Value`]s map onto driver types.
pub trait Store: Send + Sync {
    /// Row type yielded by [`Store::query`].
    type Row: Send + 'static;

    /// Driver identity, resolved once to a [`crate::BindStyle`].
    fn driver_name(&self) -> &str;

    /// Execute a query and return a forward-only cursor over its rows.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<Cursor<Self::Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<u64>> + Send;
}

impl<S: Store> Store for &S {
    type Row = S::Row;

    fn driver_name(&self) -> &str {
        (**self).driver_name()
    }

    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Cursor<Self::Row>> {
        (**self).query(sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> DbResult<u64> {
        (**self).execute(sql, params).await
    }
}

/// A forward-only, single-pass stream of rows.
///
/// Dropping the cursor releases it, whether or not every row was read.
#[must_use]
pub struct Cursor<R> {
    inner: Pin<Box<dyn Stream<Item = DbResult<R>> + Send>>,
}

impl<R> Cursor<R> {
    /// Wrap any compatible stream.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = DbResult<R>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// A cursor over rows that are already in memory.
    pub fn from_rows(rows: Vec<R>) -> Self
    where
        R: Send + 'static,
    {
        Self::new(futures_util::stream::iter(rows.into_iter().map(Ok)))
    }

    pub fn empty() -> Self
    where
        R: Send + 'static,
    {
        Self::from_rows(Vec::new())
    }

    /// Next row, or `None` once the cursor is exhausted.
    pub async fn next_row(&mut self) -> Option<DbResult<R>> {
        self.inner.next().await
    }

    /// Drain the remaining rows.
    pub async fn try_collect(self) -> DbResult<Vec<R>> {
        TryStreamExt::try_collect(self.inner).await
    }

    /// Release the cursor without reading further.
    pub fn close(self) {}
}

impl<R> Stream for Cursor<R> {
    type Item = DbResult<R>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl<R> std::fmt::Debug for Cursor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").finish_non_exhaustive()
    }
}
