//! [`Store`] for `tokio-postgres` clients, transactions and pooled clients.
//!
//! Postgres resolves to [`crate::BindStyle::Dollar`]; [`Value`]s are encoded for
//! whatever parameter type the server inferred for each `$n`.

use crate::error::{DbError, DbResult};
use crate::store::{Cursor, Store};
use crate::value::Value;
use bytes::BytesMut;
use futures_core::Stream;
use std::error::Error;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_postgres::Row;
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType, to_sql_checked};

/// Driver name reported by every Postgres store.
pub const POSTGRES_DRIVER: &str = "postgres";

type EncodeResult = Result<IsNull, Box<dyn Error + Sync + Send>>;

/// Largest integer magnitude an `f32` / `f64` represents exactly.
const F32_EXACT: u64 = 1 << 24;
const F64_EXACT: u64 = 1 << 53;

fn is_textual(ty: &Type) -> bool {
    <String as ToSql>::accepts(ty)
}

fn wrong_type<T>(ty: &Type) -> EncodeResult {
    Err(Box::new(WrongType::new::<T>(ty.clone())))
}

/// Encode through `T`'s own codec, rejecting types `T` does not accept.
fn encode<T: ToSql>(value: T, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    if !T::accepts(ty) {
        return wrong_type::<T>(ty);
    }
    value.to_sql(ty, out)
}

fn encode_int(v: i64, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    match *ty {
        Type::INT2 => encode(i16::try_from(v)?, ty, out),
        Type::INT4 => encode(i32::try_from(v)?, ty, out),
        Type::INT8 => encode(v, ty, out),
        Type::FLOAT4 if v.unsigned_abs() <= F32_EXACT => encode(v as f32, ty, out),
        Type::FLOAT8 if v.unsigned_abs() <= F64_EXACT => encode(v as f64, ty, out),
        Type::FLOAT4 | Type::FLOAT8 => {
            Err(format!("integer {v} is not exactly representable as {ty}").into())
        }
        Type::BOOL => match v {
            0 => encode(false, ty, out),
            1 => encode(true, ty, out),
            _ => Err(format!("integer {v} is not a boolean").into()),
        },
        _ if is_textual(ty) => encode(v.to_string(), ty, out),
        _ => wrong_type::<i64>(ty),
    }
}

fn encode_bool(v: bool, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    match *ty {
        Type::BOOL => encode(v, ty, out),
        Type::INT2 => encode(i16::from(v), ty, out),
        Type::INT4 => encode(i32::from(v), ty, out),
        Type::INT8 => encode(i64::from(v), ty, out),
        _ if is_textual(ty) => encode(v.to_string(), ty, out),
        _ => wrong_type::<bool>(ty),
    }
}

fn encode_float(v: f64, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    match *ty {
        Type::FLOAT8 => encode(v, ty, out),
        // REAL columns round like SQL's own float8 -> float4 cast
        Type::FLOAT4 => encode(v as f32, ty, out),
        _ if is_textual(ty) => encode(v.to_string(), ty, out),
        _ => wrong_type::<f64>(ty),
    }
}

/// Each variant is checked against the type the server inferred for its `$n`.
/// Lossless conversions are applied; anything else fails with [`WrongType`]
/// before a byte is sent.
impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> EncodeResult {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => encode_bool(*v, ty, out),
            Value::Int(v) => encode_int(*v, ty, out),
            Value::Float(v) => encode_float(*v, ty, out),
            Value::Text(v) => encode(v.as_str(), ty, out),
            Value::Bytes(v) => encode(v.as_slice(), ty, out),
            Value::Json(v) => encode(v, ty, out),
        }
    }

    /// Every type is accepted here; NULL binds anywhere and `to_sql` checks
    /// the concrete value.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn param_refs(params: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

struct MapDbRowStream<S> {
    inner: Pin<Box<S>>,
}

impl<S> MapDbRowStream<S> {
    fn new(stream: S) -> Self {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl<S> Stream for MapDbRowStream<S>
where
    S: Stream<Item = Result<Row, tokio_postgres::Error>> + Send + 'static,
{
    type Item = DbResult<Row>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(row))) => Poll::Ready(Some(Ok(row))),
            Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(DbError::Query(e)))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Store for tokio_postgres::Client {
    type Row = Row;

    fn driver_name(&self) -> &str {
        POSTGRES_DRIVER
    }

    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Cursor<Row>> {
        let stream = tokio_postgres::Client::query_raw(self, sql, param_refs(params)).await?;
        Ok(Cursor::new(MapDbRowStream::new(stream)))
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> DbResult<u64> {
        Ok(tokio_postgres::Client::execute(self, sql, &param_refs(params)).await?)
    }
}

impl Store for tokio_postgres::Transaction<'_> {
    type Row = Row;

    fn driver_name(&self) -> &str {
        POSTGRES_DRIVER
    }

    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Cursor<Row>> {
        let stream = tokio_postgres::Transaction::query_raw(self, sql, param_refs(params)).await?;
        Ok(Cursor::new(MapDbRowStream::new(stream)))
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> DbResult<u64> {
        Ok(tokio_postgres::Transaction::execute(self, sql, &param_refs(params)).await?)
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl Store for deadpool_postgres::Client {
    type Row = Row;

    fn driver_name(&self) -> &str {
        POSTGRES_DRIVER
    }

    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Cursor<Row>> {
        // Delegate to the deref target (ClientWrapper / tokio_postgres::Client).
        let client: &tokio_postgres::Client = self;
        Store::query(client, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> DbResult<u64> {
        let client: &tokio_postgres::Client = self;
        Store::execute(client, sql, params).await
    }
}
