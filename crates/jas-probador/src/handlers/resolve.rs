//! Resolve command handler

use jas_probar::{Locator, LocatorCatalog};

use crate::commands::ResolveArgs;
use crate::error::CliResult;

/// Resolve the key named by `args` against its catalog
pub fn resolve_locator(args: &ResolveArgs) -> CliResult<Locator> {
    let catalog = LocatorCatalog::load(&args.file)?;
    let values: Vec<&str> = args.args.iter().map(String::as_str).collect();
    Ok(catalog.resolve(args.kind.into(), &args.key, &values)?)
}

/// Execute the resolve command
pub fn execute_resolve(args: &ResolveArgs) -> CliResult<()> {
    let locator = resolve_locator(args)?;
    tracing::debug!(key = %args.key, strategy = locator.strategy(), "resolved");
    println!("{locator}");
    Ok(())
}
