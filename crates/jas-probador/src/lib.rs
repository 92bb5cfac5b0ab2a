//! JAS Probador CLI Library
//!
//! Command-line interface for the JAS Probar test automation library.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod error;
pub mod handlers;
mod logging;
mod output;

pub use commands::{
    CatalogArgs, Cli, Commands, KindArg, LogFormat, OutputFormat, ResolveArgs, RunArgs,
};
pub use error::{CliError, CliResult};
pub use logging::{filter_directive, init_logging};
pub use output::{render_catalog, render_report, CatalogListing};
