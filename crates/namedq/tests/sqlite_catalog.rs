#![cfg(feature = "sqlite")]

use namedq::{
    BindStyle, CatalogClient, CatalogFile, ClientConfig, DbResult, SqliteStore, StatementCatalog,
    Value, args,
};

const CATALOG: &str = include_str!("fixtures/gsqlite3.toml");
const SCHEMA: &str = include_str!("fixtures/schema.sql");

fn client() -> DbResult<CatalogClient<SqliteStore>> {
    let store = SqliteStore::open_in_memory()?;
    store.execute_batch(SCHEMA)?;
    let catalog = StatementCatalog::from_toml_str(CATALOG)?;
    Ok(CatalogClient::with_config(
        store,
        catalog,
        ClientConfig::new().statement_cache(16),
    ))
}

async fn create_zone(client: &CatalogClient<SqliteStore>, domain: &str) -> DbResult<i64> {
    client
        .execute(
            "insert-zone-query",
            args!["type", "NATIVE", "domain", domain, "masters", "", "account", ""],
        )
        .await?;
    let row = client
        .fetch_opt("get-domain-id", args!["domain", domain])
        .await?
        .expect("zone row");
    Ok(row.get_by_name("id").and_then(Value::as_i64).expect("zone id"))
}

async fn add_record(
    client: &CatalogClient<SqliteStore>,
    domain_id: i64,
    qname: &str,
    qtype: &str,
    content: &str,
) -> DbResult<u64> {
    client
        .execute(
            "insert-record-query",
            args![
                "content", content, "ttl", 3600, "priority", 0, "qtype", qtype,
                "domain_id", domain_id, "disabled", false, "qname", qname,
                "ordername", Value::Null, "auth", true,
            ],
        )
        .await
}

#[test]
fn fixture_catalog_declares_sqlite() {
    let file = CatalogFile::from_toml_str(CATALOG).unwrap();
    assert_eq!(file.driver.as_deref(), Some("sqlite3"));
    assert_eq!(file.declared_style(), Some(BindStyle::Question));
    assert_eq!(file.into_catalog().len(), 62);
}

#[test]
fn fixture_catalog_compiles_for_every_style() {
    let catalog = StatementCatalog::from_toml_str(CATALOG).unwrap();
    for style in BindStyle::all() {
        catalog.validate(style).unwrap();
    }

    let q = catalog
        .compile("insert-record-query", BindStyle::Dollar)
        .unwrap();
    assert_eq!(
        q.names(),
        [
            "content", "ttl", "priority", "qtype", "domain_id", "disabled", "qname", "ordername",
            "auth"
        ]
    );
    assert!(q.sql().ends_with("values ($1,$2,$3,$4,$5,$6,$7,$8,$9)"));
}

#[tokio::test]
async fn zone_and_record_lifecycle() -> DbResult<()> {
    let client = client()?;
    assert_eq!(client.bind_style(), BindStyle::Question);
    client.validate_catalog()?;

    let domain_id = create_zone(&client, "example.com").await?;
    assert_eq!(
        add_record(&client, domain_id, "www.example.com", "A", "192.0.2.1").await?,
        1
    );
    add_record(&client, domain_id, "www.example.com", "A", "192.0.2.2").await?;
    add_record(&client, domain_id, "example.com", "MX", "mail.example.com").await?;

    let rows = client
        .fetch_all("basic-query", args!["qname", "www.example.com", "qtype", "A"])
        .await?;
    let mut contents: Vec<_> = rows
        .iter()
        .filter_map(|r| r.get_by_name("content").and_then(Value::as_str))
        .collect();
    contents.sort_unstable();
    assert_eq!(contents, ["192.0.2.1", "192.0.2.2"]);

    let listed = client
        .fetch_all(
            "list-query",
            args!["domain_id", domain_id, "include_disabled", false],
        )
        .await?;
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].get_by_name("name"), Some(&Value::from("example.com")));

    let removed = client
        .execute(
            "delete-rrset-query",
            args!["domain_id", domain_id, "qname", "www.example.com", "qtype", "A"],
        )
        .await?;
    assert_eq!(removed, 2);

    let any = client
        .fetch_all("any-query", args!["qname", "www.example.com"])
        .await?;
    assert!(any.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_serial_binds_by_name() -> DbResult<()> {
    let client = client()?;
    let domain_id = create_zone(&client, "example.org").await?;

    let changed = client
        .execute(
            "update-serial-query",
            args!["domain_id", domain_id, "serial", 2024010101],
        )
        .await?;
    assert_eq!(changed, 1);

    let info = client
        .fetch_opt("info-zone-query", args!["domain", "example.org"])
        .await?
        .expect("zone info");
    assert_eq!(info.get_by_name("notified_serial"), Some(&Value::Int(2024010101)));
    assert_eq!(info.get_by_name("type"), Some(&Value::from("NATIVE")));
    Ok(())
}

#[tokio::test]
async fn missing_arguments_bind_null() -> DbResult<()> {
    let client = client()?;
    let domain_id = create_zone(&client, "example.net").await?;

    // no "ordername": the column stays NULL
    client
        .execute(
            "insert-empty-non-terminal-order-query",
            args!["domain_id", domain_id, "qname", "a.example.net", "auth", true],
        )
        .await?;

    let first = client
        .fetch_opt("get-order-first-query", args!["domain_id", domain_id])
        .await?;
    assert!(first.is_none());

    let removed = client
        .execute(
            "remove-empty-non-terminals-from-zone-query",
            args!["domain_id", domain_id],
        )
        .await?;
    assert_eq!(removed, 1);
    Ok(())
}

#[tokio::test]
async fn comments_round_trip() -> DbResult<()> {
    let client = client()?;
    let domain_id = create_zone(&client, "example.edu").await?;

    client
        .execute(
            "insert-comment-query",
            args![
                "domain_id", domain_id, "qname", "example.edu", "qtype", "SOA",
                "modified_at", 1_700_000_000, "account", "ops", "content", "serial bumped",
            ],
        )
        .await?;

    let mut cursor = client
        .query("list-comments-query", args!["domain_id", domain_id])
        .await?;
    let row = cursor.next_row().await.expect("one comment")?;
    assert_eq!(row.get_by_name("comment"), Some(&Value::from("serial bumped")));
    assert_eq!(row.get_by_name("account"), Some(&Value::from("ops")));
    assert!(cursor.next_row().await.is_none());
    Ok(())
}

#[tokio::test]
async fn engine_errors_surface_as_store_errors() -> DbResult<()> {
    let client = client()?;
    let domain_id = create_zone(&client, "dup.example").await?;
    assert!(domain_id > 0);

    // unique index on domains(name)
    let err = client
        .execute(
            "insert-zone-query",
            args!["type", "NATIVE", "domain", "dup.example"],
        )
        .await
        .unwrap_err();
    assert!(err.is_store_error());
    Ok(())
}
