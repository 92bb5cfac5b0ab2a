//! Catalog command handler

use jas_probar::LocatorCatalog;

use crate::commands::{CatalogArgs, OutputFormat};
use crate::error::CliResult;
use crate::output::{render_catalog, CatalogListing};

/// Execute the catalog command
pub fn execute_catalog(args: &CatalogArgs) -> CliResult<()> {
    let catalog = LocatorCatalog::load(&args.file)?;
    match args.format {
        OutputFormat::Text => print!("{}", render_catalog(&catalog)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&CatalogListing::new(&catalog))?
            );
        }
    }
    Ok(())
}
