use crate::cli::RunArgs;
use anyhow::Context;
use futures_util::TryStreamExt;
use namedq::{CatalogClient, SqliteRow, SqliteStore, StatementCatalog, Value};

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let catalog = StatementCatalog::load(&args.catalog)?;
    let store = SqliteStore::open(&args.database)?;
    if let Some(schema) = &args.schema {
        let sql = std::fs::read_to_string(schema)
            .with_context(|| format!("failed to read schema {}", schema.display()))?;
        store
            .execute_batch(&sql)
            .with_context(|| format!("failed to apply schema {}", schema.display()))?;
    }

    let client = CatalogClient::new(store, catalog);
    let compiled = client.prepare(&args.statement)?;
    let flat = flat_args(&args.params);

    if returns_rows(compiled.sql()) {
        let mut cursor = client.query(&args.statement, flat).await?;
        let mut printed_header = false;
        while let Some(row) = cursor.try_next().await? {
            if !printed_header {
                println!("{}", row.columns().join("\t"));
                printed_header = true;
            }
            println!("{}", format_row(&row));
        }
    } else {
        let affected = client.execute(&args.statement, flat).await?;
        println!("{affected} row(s) affected");
    }
    Ok(())
}

/// `key=value` pairs as the flat alternating list the binder expects.
fn flat_args(params: &[(String, String)]) -> Vec<Value> {
    params
        .iter()
        .flat_map(|(key, raw)| [Value::from(key.as_str()), parse_value(raw)])
        .collect()
}

fn parse_value(raw: &str) -> Value {
    if raw == "null" {
        return Value::Null;
    }
    match raw.parse::<i64>() {
        Ok(v) => Value::Int(v),
        Err(_) => Value::from(raw),
    }
}

fn returns_rows(sql: &str) -> bool {
    let keyword = sql
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_start_matches('(');
    ["select", "with", "pragma", "values"]
        .iter()
        .any(|k| keyword.eq_ignore_ascii_case(k))
}

fn format_row(row: &SqliteRow) -> String {
    row.values()
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\t")
}
