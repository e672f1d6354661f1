//! Catalog-driven access to an in-memory SQLite database
//!
//! Run with: cargo run --example sqlite_catalog -p namedq

use namedq::{CatalogClient, DbError, SqliteStore, StatementCatalog, Value, args};

#[tokio::main]
async fn main() -> Result<(), DbError> {
    let store = SqliteStore::open_in_memory()?;
    store.execute_batch(
        "CREATE TABLE domains (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE, type TEXT NOT NULL, notified_serial INTEGER);
         CREATE TABLE records (id INTEGER PRIMARY KEY, domain_id INTEGER, name TEXT, type TEXT, content TEXT, ttl INTEGER);",
    )?;

    let catalog = StatementCatalog::new()
        .with("insert-zone-query", "insert into domains (type,name) values(:type, :domain)")
        .with("get-domain-id", "select id from domains where name=:domain")
        .with(
            "insert-record-query",
            "insert into records (content,ttl,type,domain_id,name) values (:content,:ttl,:qtype,:domain_id,:qname)",
        )
        .with(
            "basic-query",
            "SELECT content,ttl FROM records WHERE type=:qtype and name=:qname",
        )
        .with(
            "update-serial-query",
            "update domains set notified_serial=:serial where id=:domain_id",
        );

    let client = CatalogClient::new(store, catalog);
    client.validate_catalog()?;
    println!("dialect: {}", client.bind_style());

    client
        .execute("insert-zone-query", args!["type", "NATIVE", "domain", "example.com"])
        .await?;
    let domain_id = client
        .fetch_opt("get-domain-id", args!["domain", "example.com"])
        .await?
        .and_then(|row| row.get(0).and_then(Value::as_i64))
        .ok_or_else(|| DbError::store("zone was not created"))?;

    for content in ["192.0.2.1", "192.0.2.2"] {
        client
            .execute(
                "insert-record-query",
                args![
                    "qname", "www.example.com", "qtype", "A", "content", content,
                    "ttl", 3600, "domain_id", domain_id,
                ],
            )
            .await?;
    }

    // Argument order is irrelevant; the compiled statement decides it.
    let compiled = client.prepare("basic-query")?;
    println!("{} <- {:?}", compiled.sql(), compiled.names());

    for row in client
        .fetch_all("basic-query", args!["qname", "www.example.com", "qtype", "A"])
        .await?
    {
        println!("  {} ttl={}", row.values()[0], row.values()[1]);
    }

    let changed = client
        .execute("update-serial-query", args!["domain_id", domain_id, "serial", 2024010101])
        .await?;
    println!("serial updated on {changed} zone(s)");

    // Missing arguments bind NULL.
    client
        .execute("update-serial-query", args!["domain_id", domain_id])
        .await?;

    Ok(())
}
