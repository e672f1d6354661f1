use crate::cli::CheckArgs;
use namedq::{BindStyle, StatementCatalog};

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let catalog = StatementCatalog::load(&args.catalog)?;
    check(&catalog)?;
    println!(
        "{}: {} statements ok",
        args.catalog.display(),
        catalog.len()
    );
    Ok(())
}

/// Compile every statement under every dialect; the first failure wins.
fn check(catalog: &StatementCatalog) -> anyhow::Result<()> {
    for style in BindStyle::all() {
        catalog
            .validate(style)
            .map_err(|(id, e)| anyhow::anyhow!("{id} ({style}): {e}"))?;
    }
    Ok(())
}
