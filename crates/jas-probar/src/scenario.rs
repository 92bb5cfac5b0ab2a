//! End-to-end settings scenario.
//!
//! Open the settings screen from the main screen, run the fixed list of
//! preference checks in order, then go back. The run stops at the first
//! failure; every step taken up to that point is kept in the report.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::driver::AutomationDriver;
use crate::pages::{MainPage, SettingsPage};
use crate::result::{ProbeError, ProbeResult};
use crate::step::{StepLog, StepRecord};
use crate::widget::{self, SeekBarDialogSpec, SettingsScreen, SwitchSpec};

/// "Enable scrobbling" switch
pub const ENABLE_SCROBBLING: &str = "Enable scrobbling";
/// "Minimum play time to scrobble" seek bar
pub const MIN_PLAY_TIME: &str = "Minimum play time to scrobble";
/// "Minimum percent of track duration to scrobble" seek bar
pub const MIN_PERCENT: &str = "Minimum percent of track duration to scrobble";
/// "Minimum track duration" seek bar
pub const MIN_TRACK_DURATION: &str = "Minimum track duration";
/// "Enable notifications" switch
pub const ENABLE_NOTIFICATIONS: &str = "Enable notifications";
/// "Minimum priority notifications" switch
pub const MIN_PRIORITY_NOTIFICATIONS: &str = "Minimum priority notifications";
/// "Enable toast message on scrobble" switch
pub const ENABLE_TOAST: &str = "Enable toast message on scrobble";

/// One preference check of the scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum PreferenceCheck {
    /// Switch round trip
    Switch(SwitchSpec),
    /// Seek bar dialog round trip
    SeekBarDialog(SeekBarDialogSpec),
}

impl PreferenceCheck {
    /// Preference title
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Switch(spec) => &spec.name,
            Self::SeekBarDialog(spec) => &spec.name,
        }
    }

    /// Run the check against `screen`
    pub fn run<S: SettingsScreen + ?Sized>(&self, screen: &S) -> ProbeResult<()> {
        match self {
            Self::Switch(spec) => widget::test_switch(screen, spec),
            Self::SeekBarDialog(spec) => widget::test_seek_bar_dialog(screen, spec),
        }
    }
}

/// The settings checks, in run order
#[must_use]
pub fn settings_checks() -> Vec<PreferenceCheck> {
    vec![
        PreferenceCheck::Switch(SwitchSpec::new(
            ENABLE_SCROBBLING,
            true,
            "Scrobbling enabled",
            "Scrobbling disabled",
        )),
        PreferenceCheck::SeekBarDialog(SeekBarDialogSpec::new(
            MIN_PLAY_TIME,
            1,
            60,
            30,
            "%s seconds",
            "Minimum time set to %s seconds",
        )),
        PreferenceCheck::SeekBarDialog(SeekBarDialogSpec::new(
            MIN_PERCENT,
            50,
            100,
            50,
            "%s percents",
            "Minimum percent set to %s percents",
        )),
        PreferenceCheck::SeekBarDialog(SeekBarDialogSpec::new(
            MIN_TRACK_DURATION,
            1,
            60,
            30,
            "%s seconds",
            "Minimum track duration set to %s seconds",
        )),
        PreferenceCheck::Switch(SwitchSpec::new(
            ENABLE_NOTIFICATIONS,
            true,
            "Notifications enabled",
            "Notifications disabled",
        )),
        PreferenceCheck::Switch(SwitchSpec::new(
            MIN_PRIORITY_NOTIFICATIONS,
            true,
            "Minimum priority set",
            "Default priority set",
        )),
        PreferenceCheck::Switch(SwitchSpec::new(
            ENABLE_TOAST,
            false,
            "Toast message enabled",
            "Toast message disabled",
        )),
    ]
}

/// Outcome of a scenario run
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    /// Every step taken, in start order
    pub steps: Vec<StepRecord>,
    /// Number of preference checks that passed
    pub checks_passed: usize,
    /// Number of preference checks in the scenario
    pub checks_total: usize,
    /// Wall time of the run in milliseconds
    pub duration_ms: u64,
    /// Failure text, if the run stopped early
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(skip)]
    error: Option<ProbeError>,
}

impl ScenarioReport {
    /// Whether the whole scenario passed
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }

    /// The error that stopped the run
    #[must_use]
    pub const fn error(&self) -> Option<&ProbeError> {
        self.error.as_ref()
    }

    /// Turn the report into its error, if any
    pub fn into_result(self) -> ProbeResult<Vec<StepRecord>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.steps),
        }
    }
}

/// Run the settings scenario against `driver`.
///
/// Both catalogs are loaded before the driver is touched, so a broken
/// catalog aborts the run without any element lookup.
pub fn run_settings_scenario<D: AutomationDriver + ?Sized>(
    driver: &D,
    config: &ScenarioConfig,
) -> ScenarioReport {
    run_checks(driver, config, &settings_checks())
}

/// Run an arbitrary list of checks through the settings scenario flow
pub fn run_checks<D: AutomationDriver + ?Sized>(
    driver: &D,
    config: &ScenarioConfig,
    checks: &[PreferenceCheck],
) -> ScenarioReport {
    let start = Instant::now();
    let steps = StepLog::new();
    let mut checks_passed = 0;

    tracing::info!(checks = checks.len(), "starting settings scenario");
    let outcome = (|| -> ProbeResult<()> {
        let main = MainPage::new(driver, config.main_locators()?, steps.clone());
        let settings = SettingsPage::new(driver, config.settings_locators()?, steps.clone());

        main.go_to_settings_screen()?;
        for check in checks {
            check.run(&settings)?;
            checks_passed += 1;
        }
        settings.back_to_main_screen()
    })();

    let duration_ms = start.elapsed().as_millis() as u64;
    match &outcome {
        Ok(()) => tracing::info!(duration_ms, "settings scenario passed"),
        Err(e) => tracing::warn!(
            duration_ms,
            checks_passed,
            error = %e,
            "settings scenario failed"
        ),
    }

    let error = outcome.err();
    ScenarioReport {
        steps: steps.records(),
        checks_passed,
        checks_total: checks.len(),
        duration_ms,
        failure: error.as_ref().map(ToString::to_string),
        error,
    }
}
