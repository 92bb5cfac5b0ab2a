//! Run command handler

use jas_probar::appium::AppiumDriver;
use jas_probar::{run_settings_scenario, ScenarioConfig, ScenarioReport, SessionGuard};

use crate::commands::{OutputFormat, RunArgs};
use crate::error::{CliError, CliResult};
use crate::output::render_report;

/// Scenario configuration from the config file, environment and flags.
///
/// Flags win over the environment, which wins over the file.
pub fn build_config(args: &RunArgs) -> CliResult<ScenarioConfig> {
    let mut config = match &args.config {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::new(),
    }
    .with_env();

    if let Some(url) = &args.url {
        config = config.with_server_url(url.as_str());
    }
    if let Some(path) = &args.main_catalog {
        config = config.with_main_catalog(path.as_path());
    }
    if let Some(path) = &args.settings_catalog {
        config = config.with_settings_catalog(path.as_path());
    }
    if let Some(secs) = args.timeout {
        config = config.with_request_timeout_secs(secs);
    }
    Ok(config)
}

/// Execute the run command
pub fn execute_run(args: &RunArgs) -> CliResult<()> {
    let config = build_config(args)?;
    let url = config.require_server_url()?;

    // Catalog problems are reported before a device session is opened.
    let _ = config.main_locators()?;
    let _ = config.settings_locators()?;

    let driver = AppiumDriver::connect(url, &config.capabilities, config.request_timeout())?;
    let session = SessionGuard::new(driver);
    let report = run_settings_scenario(session.driver(), &config);
    if let Err(e) = session.close() {
        if report.passed() {
            return Err(e.into());
        }
        tracing::warn!(error = %e, "session close failed after scenario failure");
    }

    print_report(&report, args.format)?;
    outcome(&report)
}

fn print_report(report: &ScenarioReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Text => print!("{}", render_report(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn outcome(report: &ScenarioReport) -> CliResult<()> {
    match &report.failure {
        None => Ok(()),
        Some(message) => Err(CliError::ScenarioFailed {
            checks_passed: report.checks_passed,
            checks_total: report.checks_total,
            message: message.clone(),
        }),
    }
}
