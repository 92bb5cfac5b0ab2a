//! JAS Probar: UI test automation for the JAS Android app
//!
//! Page objects over an automation driver, with element locators kept out
//! of code in per-page JSON catalogs of templated XPaths and resource ids.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌──────────┐   ┌──────────────────┐
//! │ Scenario │──►│ Page objects │──►│ Resolver │──►│ AutomationDriver │
//! └──────────┘   └──────┬───────┘   └────┬─────┘   │  Mock / Appium   │
//!                       │                │         └──────────────────┘
//!                ┌──────▼───────┐   ┌────▼─────┐
//!                │ Widget procs │   │ Catalog  │
//!                └──────────────┘   └──────────┘
//! ```
//!
//! Every page action runs as a recorded step in a shared [`StepLog`].
//!
//! # Example
//!
//! ```
//! use jas_probar::{LocatorCatalog, Locator, MockDriver, MockElement, Resolver};
//!
//! let catalog = LocatorCatalog::from_json_str(
//!     r#"{"xpaths": {"Element": "//android.widget.TextView[@text='%s']"}, "resource-ids": {}}"#,
//! )?;
//! let driver = MockDriver::new();
//! driver.add_element(
//!     Locator::xpath("//android.widget.TextView[@text='Enable scrobbling']"),
//!     MockElement::new("row"),
//! );
//!
//! let resolver = Resolver::new(&driver, catalog);
//! resolver.find_structural("Element", &["Enable scrobbling"])?.click()?;
//! assert!(driver.was_called("click:row"));
//! # Ok::<(), jas_probar::ProbeError>(())
//! ```

#![warn(missing_docs)]

mod assertion;
mod catalog;
mod config;
mod driver;
mod locator;
mod resolver;
mod result;
mod session;
mod step;
mod template;
mod touch;
mod widget;

/// W3C WebDriver client for an Appium server
#[cfg(feature = "appium")]
pub mod appium;

/// In-memory driver for unit tests
pub mod mock;

/// Page objects
pub mod pages;

/// End-to-end settings scenario
pub mod scenario;

pub use assertion::{Assertion, AssertionResult};
pub use catalog::{LocatorCatalog, LocatorKind};
pub use config::{
    ScenarioConfig, BUNDLED_MAIN_CATALOG, BUNDLED_SETTINGS_CATALOG, SERVER_URL_ENV,
};
pub use driver::{AutomationDriver, Element, ElementHandle};
pub use locator::{ElementRect, Locator, Position, Size};
pub use mock::{MockDriver, MockElement};
pub use pages::{MainPage, SettingsPage};
pub use resolver::Resolver;
pub use result::{ProbeError, ProbeResult};
pub use scenario::{run_settings_scenario, PreferenceCheck, ScenarioReport};
pub use session::{with_session, Capabilities, SessionGuard};
pub use step::{StepLog, StepRecord, StepStatus};
pub use template::{format_template, Template, TemplateError};
pub use touch::{TouchAction, TouchStep};
pub use widget::{
    drag_offset, percent_to_value, seek_bar_gesture, test_seek_bar_dialog, test_switch,
    SeekBarDialogSpec, SettingsScreen, SwitchSpec, SEEK_BAR_TARGET_PERCENT,
};

#[cfg(feature = "appium")]
pub use appium::AppiumDriver;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::pages::*;
    pub use super::{
        with_session, Assertion, AutomationDriver, Capabilities, Locator, LocatorCatalog,
        LocatorKind, MockDriver, MockElement, ProbeError, ProbeResult, Resolver,
        ScenarioConfig, SeekBarDialogSpec, SettingsScreen, StepLog, SwitchSpec, TouchAction,
    };
}
