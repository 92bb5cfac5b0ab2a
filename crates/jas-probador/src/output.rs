//! Output formatting

use console::style;
use jas_probar::{LocatorCatalog, LocatorKind, ScenarioReport, StepRecord, StepStatus};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Catalog contents with keys in sorted order
#[derive(Debug, Serialize)]
pub struct CatalogListing<'a> {
    /// XPath templates
    pub xpaths: BTreeMap<&'a str, &'a str>,
    /// Resource-id templates
    #[serde(rename = "resource-ids")]
    pub resource_ids: BTreeMap<&'a str, &'a str>,
}

impl<'a> CatalogListing<'a> {
    /// Build a listing of `catalog`
    #[must_use]
    pub fn new(catalog: &'a LocatorCatalog) -> Self {
        let sorted = |kind| {
            catalog
                .templates(kind)
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect()
        };
        Self {
            xpaths: sorted(LocatorKind::Structural),
            resource_ids: sorted(LocatorKind::Id),
        }
    }
}

/// Render a catalog as text
#[must_use]
pub fn render_catalog(catalog: &LocatorCatalog) -> String {
    let mut out = String::new();
    for kind in LocatorKind::ALL {
        let _ = writeln!(out, "{} ({})", style(kind).bold(), catalog.len(kind));
        for key in catalog.keys(kind) {
            let template = catalog.template(kind, key).unwrap_or_default();
            let _ = writeln!(out, "  {key} = {template}");
        }
    }
    out
}

fn render_step(out: &mut String, step: &StepRecord) {
    let indent = "  ".repeat(step.depth + 1);
    match step.status {
        StepStatus::Passed => {
            let _ = writeln!(
                out,
                "{indent}{} {} ({}ms)",
                style("✓").green(),
                step.name,
                step.duration_ms
            );
        }
        StepStatus::Failed => {
            let _ = writeln!(
                out,
                "{indent}{} {}: {}",
                style("✗").red(),
                step.name,
                step.error.as_deref().unwrap_or("failed")
            );
        }
        StepStatus::Running => {
            let _ = writeln!(out, "{indent}{} {}", style("…").yellow(), step.name);
        }
    }
}

/// Render a scenario report as text
#[must_use]
pub fn render_report(report: &ScenarioReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        render_step(&mut out, step);
    }
    let verdict = if report.passed() {
        style("PASSED").green().bold()
    } else {
        style("FAILED").red().bold()
    };
    let _ = writeln!(
        out,
        "{verdict} {}/{} checks in {}ms",
        report.checks_passed, report.checks_total, report.duration_ms
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jas_probar::{run_settings_scenario, MockDriver, ScenarioConfig};

    const CATALOG: &str = r#"{
        "xpaths": {"Switch": "//s[@text='%s']", "Element": "//e[@text='%s']"},
        "resource-ids": {"SeekBarDialog OK button": "android:id/button1"}
    }"#;

    #[test]
    fn test_catalog_text_lists_sorted_keys() {
        let catalog = LocatorCatalog::from_json_str(CATALOG).unwrap();
        let text = render_catalog(&catalog);
        let element = text.find("Element = //e[@text='%s']").unwrap();
        let switch = text.find("Switch = //s[@text='%s']").unwrap();
        assert!(element < switch);
        assert!(text.contains("SeekBarDialog OK button = android:id/button1"));
    }

    #[test]
    fn test_catalog_listing_json_uses_file_field_names() {
        let catalog = LocatorCatalog::from_json_str(CATALOG).unwrap();
        let json = serde_json::to_value(CatalogListing::new(&catalog)).unwrap();
        assert_eq!(json["resource-ids"]["SeekBarDialog OK button"], "android:id/button1");
        assert_eq!(json["xpaths"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_report_text() {
        let driver = MockDriver::new();
        let config = ScenarioConfig::new().with_main_catalog("/nonexistent/main.json");
        let report = run_settings_scenario(&driver, &config);
        let text = render_report(&report);
        assert!(text.contains("FAILED"));
        assert!(text.contains("0/7 checks"));
    }
}
