//! Settings screen and its seek bar dialog.

use crate::catalog::LocatorCatalog;
use crate::driver::AutomationDriver;
use crate::resolver::Resolver;
use crate::result::ProbeResult;
use crate::step::StepLog;
use crate::widget::{self, SeekBarDialogSpec, SettingsScreen, SwitchSpec};

const X_ELEMENT: &str = "Element";
const X_ELEMENT_SUMMARY: &str = "Element summary";
const X_ELEMENT_SWITCH: &str = "Switch";
const X_UP_BUTTON: &str = "Navigate up button";

const I_SB_TITLE: &str = "SeekBarDialog title";
const I_SB_SEEKBAR: &str = "SeekBarDialog seekbar";
const I_SB_HINT: &str = "SeekBarDialog summary";
const I_SB_CANCEL: &str = "SeekBarDialog Cancel button";
const I_SB_OK: &str = "SeekBarDialog OK button";

/// Page object for the settings screen
#[derive(Debug)]
pub struct SettingsPage<'d, D: AutomationDriver + ?Sized> {
    resolver: Resolver<'d, D>,
    steps: StepLog,
}

impl<'d, D: AutomationDriver + ?Sized> SettingsPage<'d, D> {
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

    /// Summary text shown under the `name` setting
    pub fn get_summary(&self, name: &str) -> ProbeResult<String> {
        self.steps
            .run(format!("Getting summary text for \"{name}\" setting"), || {
                self.resolver.find_structural(X_ELEMENT_SUMMARY, &[name])?.text()
            })
    }

    /// Click the `name` setting
    pub fn click_element(&self, name: &str) -> ProbeResult<()> {
        self.steps.run(format!("Click on \"{name}\" setting"), || {
            self.resolver.find_structural(X_ELEMENT, &[name])?.click()
        })
    }

    /// Whether the `name` switch is checked
    ///
    /// Only the exact attribute value `"true"` counts as checked.
    pub fn get_switch_value(&self, name: &str) -> ProbeResult<bool> {
        self.steps
            .run(format!("Getting switch value for \"{name}\" setting"), || {
                let checked = self
                    .resolver
                    .find_structural(X_ELEMENT_SWITCH, &[name])?
                    .attribute("checked")?;
                Ok(checked.as_deref() == Some("true"))
            })
    }

    /// Leave the settings screen through the toolbar's up button
    pub fn back_to_main_screen(&self) -> ProbeResult<()> {
        self.steps.run("Click back button", || {
            self.resolver.find_structural(X_UP_BUTTON, &[])?.click()
        })
    }

    /// Drag the dialog's seek bar to `percent` of its width
    pub fn move_seek_bar_to(&self, percent: i32) -> ProbeResult<()> {
        self.steps
            .run(format!("Move SeekBarDialogHint slider to {percent}%"), || {
                let seekbar = self.resolver.find_id(I_SB_SEEKBAR, &[])?;
                let gesture =
                    widget::seek_bar_gesture(seekbar.location()?, seekbar.size()?, percent);
                tracing::debug!(percent, end = ?gesture.end_point(), "dragging seek bar");
                self.resolver.driver().perform(&gesture)
            })
    }

    /// Run the switch round trip for one preference
    pub fn test_switch(&self, spec: &SwitchSpec) -> ProbeResult<()> {
        widget::test_switch(self, spec)
    }

    /// Run the seek bar dialog round trip for one preference
    pub fn test_seek_bar_dialog(&self, spec: &SeekBarDialogSpec) -> ProbeResult<()> {
        widget::test_seek_bar_dialog(self, spec)
    }

    fn sb_text(&self, step: &str, key: &str) -> ProbeResult<String> {
        self.steps
            .run(step, || self.resolver.find_id(key, &[])?.text())
    }

    fn sb_present(&self, step: &str, key: &str) -> ProbeResult<bool> {
        self.steps.run(step, || self.resolver.exists_id(key, &[]))
    }

    fn sb_click(&self, step: &str, key: &str) -> ProbeResult<()> {
        self.steps
            .run(step, || self.resolver.find_id(key, &[])?.click())
    }
}

impl<D: AutomationDriver + ?Sized> SettingsScreen for SettingsPage<'_, D> {
    fn summary(&self, name: &str) -> ProbeResult<String> {
        self.get_summary(name)
    }

    fn switch_value(&self, name: &str) -> ProbeResult<bool> {
        self.get_switch_value(name)
    }

    fn click_element(&self, name: &str) -> ProbeResult<()> {
        SettingsPage::click_element(self, name)
    }

    fn dialog_title(&self) -> ProbeResult<String> {
        self.sb_text("Getting SeekBarDialog title", I_SB_TITLE)
    }

    fn dialog_hint(&self) -> ProbeResult<String> {
        self.sb_text("Getting SeekBarDialog summary", I_SB_HINT)
    }

    fn is_ok_present(&self) -> ProbeResult<bool> {
        self.sb_present("OK button existence check", I_SB_OK)
    }

    fn is_cancel_present(&self) -> ProbeResult<bool> {
        self.sb_present("Cancel button existence check", I_SB_CANCEL)
    }

    fn click_ok(&self) -> ProbeResult<()> {
        self.sb_click("SeekBarDialog OK button click", I_SB_OK)
    }

    fn click_cancel(&self) -> ProbeResult<()> {
        self.sb_click("SeekBarDialog Cancel button click", I_SB_CANCEL)
    }

    fn move_seek_bar_to(&self, percent: i32) -> ProbeResult<()> {
        SettingsPage::move_seek_bar_to(self, percent)
    }

    fn steps(&self) -> &StepLog {
        &self.steps
    }
}
