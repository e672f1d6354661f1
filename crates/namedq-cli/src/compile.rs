use crate::cli::{CompileArgs, StyleSource};
use anyhow::Context;
use namedq::{BindStyle, CatalogFile, StatementCatalog};
use std::fmt::Write as _;

pub fn run(args: CompileArgs) -> anyhow::Result<()> {
    let file = CatalogFile::load(&args.catalog)?;
    let style = resolve_style(&args.style, &file);
    let catalog = file.into_catalog();
    print!("{}", render(&catalog, style, &args.statements)?);
    Ok(())
}

fn resolve_style(source: &StyleSource, file: &CatalogFile) -> BindStyle {
    match source {
        StyleSource::Style(style) => *style,
        StyleSource::Driver(driver) => BindStyle::for_driver(driver),
        StyleSource::Catalog => file.declared_style().unwrap_or_default(),
    }
}

fn render(
    catalog: &StatementCatalog,
    style: BindStyle,
    statements: &[String],
) -> anyhow::Result<String> {
    let ids: Vec<&str> = if statements.is_empty() {
        catalog.iter().map(|(id, _)| id).collect()
    } else {
        statements.iter().map(String::as_str).collect()
    };

    let mut out = String::new();
    for id in ids {
        let compiled = catalog
            .compile(id, style)
            .with_context(|| format!("failed to compile {id}"))?;
        writeln!(out, "-- {id} ({style})")?;
        writeln!(out, "{}", compiled.sql())?;
        if !compiled.names().is_empty() {
            writeln!(out, "-- params: {}", compiled.names().join(", "))?;
        }
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(raw: &str) -> CatalogFile {
        CatalogFile::from_toml_str(raw).unwrap()
    }

    #[test]
    fn style_precedence() {
        let f = file("driver = \"sqlite3\"\nbind_style = \"at\"\n");
        assert_eq!(resolve_style(&StyleSource::Catalog, &f), BindStyle::At);
        assert_eq!(
            resolve_style(&StyleSource::Driver("postgres".into()), &f),
            BindStyle::Dollar
        );
        assert_eq!(
            resolve_style(&StyleSource::Style(BindStyle::Named), &f),
            BindStyle::Named
        );

        let bare = file("");
        assert_eq!(resolve_style(&StyleSource::Catalog, &bare), BindStyle::Unknown);
    }

    #[test]
    fn renders_selected_statements() {
        let catalog = StatementCatalog::new()
            .with(
                "basic-query",
                "SELECT content FROM records WHERE type=:qtype and name=:qname",
            )
            .with("list-autoprimaries", "select ip,nameserver,account from supermasters");

        let out = render(&catalog, BindStyle::Dollar, &["basic-query".to_string()]).unwrap();
        assert_eq!(
            out,
            "-- basic-query (dollar)\n\
             SELECT content FROM records WHERE type=$1 and name=$2\n\
             -- params: qtype, qname\n\n"
        );

        let all = render(&catalog, BindStyle::Question, &[]).unwrap();
        assert!(all.contains("-- list-autoprimaries (question)\nselect ip,nameserver,account from supermasters\n\n"));
    }

    #[test]
    fn unknown_statement_is_an_error() {
        let err = render(&StatementCatalog::new(), BindStyle::Question, &["nope".to_string()])
            .unwrap_err();
        assert!(format!("{err:#}").contains("unknown statement"), "{err:#}");
    }
}
