//! Main screen.

use crate::catalog::LocatorCatalog;
use crate::driver::AutomationDriver;
use crate::resolver::Resolver;
use crate::result::ProbeResult;
use crate::step::StepLog;

const I_SETTINGS_BUTTON: &str = "Settings button";

/// Page object for the main screen
#[derive(Debug)]
pub struct MainPage<'d, D: AutomationDriver + ?Sized> {
    resolver: Resolver<'d, D>,
    steps: StepLog,
}

impl<'d, D: AutomationDriver + ?Sized> MainPage<'d, D> {
    /// Create the page over an already loaded catalog
    pub fn new(driver: &'d D, catalog: LocatorCatalog, steps: StepLog) -> Self {
        Self {
            resolver: Resolver::new(driver, catalog),
            steps,
        }
    }

    /// Locator resolver for this page
    #[must_use]
    pub const fn resolver(&self) -> &Resolver<'d, D> {
        &self.resolver
    }

    /// Open the settings screen from the toolbar
    pub fn go_to_settings_screen(&self) -> ProbeResult<()> {
        self.steps.run("Select \"Settings\" menu item", || {
            self.resolver.find_id(I_SETTINGS_BUTTON, &[])?.click()
        })
    }
}
