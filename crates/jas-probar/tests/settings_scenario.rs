//! End-to-end settings scenario against a simulated app.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{bundled_config, data_path, Screen, SimulatedApp};
use jas_probar::scenario::{
    settings_checks, ENABLE_NOTIFICATIONS, ENABLE_SCROBBLING, ENABLE_TOAST, MIN_PERCENT,
    MIN_PLAY_TIME, MIN_PRIORITY_NOTIFICATIONS, MIN_TRACK_DURATION,
};
use jas_probar::{
    run_settings_scenario, with_session, LocatorCatalog, LocatorKind, ProbeError,
    ScenarioConfig, SettingsPage, SettingsScreen, StepLog, StepStatus,
};
use std::io::Write;

#[test]
fn test_full_scenario_passes() {
    let app = SimulatedApp::new();
    let report = run_settings_scenario(&app, &bundled_config());

    assert!(report.passed(), "scenario failed: {:?}", report.failure);
    assert_eq!(report.checks_passed, 7);
    assert_eq!(report.checks_total, 7);
    assert!(report.steps.iter().all(|s| s.status == StepStatus::Passed));

    let first = report.steps.first().unwrap();
    let last = report.steps.last().unwrap();
    assert_eq!(first.name, "Select \"Settings\" menu item");
    assert_eq!(last.name, "Click back button");
    assert_eq!(app.screen(), Screen::Main);
}

#[test]
fn test_scenario_leaves_every_preference_changed() {
    let app = SimulatedApp::new();
    assert!(run_settings_scenario(&app, &bundled_config()).passed());

    assert!(!app.switch_on(ENABLE_SCROBBLING));
    assert!(!app.switch_on(ENABLE_NOTIFICATIONS));
    assert!(!app.switch_on(MIN_PRIORITY_NOTIFICATIONS));
    assert!(app.switch_on(ENABLE_TOAST));
    assert_eq!(app.seek_value(MIN_PLAY_TIME), 60);
    assert_eq!(app.seek_value(MIN_PERCENT), 100);
    assert_eq!(app.seek_value(MIN_TRACK_DURATION), 60);
}

#[test]
fn test_second_run_fails_on_first_switch() {
    let app = SimulatedApp::new();
    assert!(run_settings_scenario(&app, &bundled_config()).passed());

    let report = run_settings_scenario(&app, &bundled_config());
    assert!(!report.passed());
    assert_eq!(report.checks_passed, 0);
}

#[test]
fn test_corrupted_switch_default_fails_with_assertion() {
    let app = SimulatedApp::new();
    app.set_switch(ENABLE_NOTIFICATIONS, false);

    let report = run_settings_scenario(&app, &bundled_config());

    match report.error() {
        Some(ProbeError::AssertionFailed {
            step,
            expected,
            actual,
        }) => {
            assert_eq!(step, "summary of \"Enable notifications\"");
            assert_eq!(expected, "Notifications enabled");
            assert_eq!(actual, "Notifications disabled");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(report.checks_passed, 4);
    assert!(report
        .steps
        .iter()
        .any(|s| s.name == "Checking \"Enable notifications\" switch"
            && s.status == StepStatus::Failed));
    assert!(report.steps.iter().all(|s| s.name != "Click back button"));
    assert_eq!(app.screen(), Screen::Settings);
}

#[test]
fn test_corrupted_seek_bar_default_fails() {
    let app = SimulatedApp::new();
    app.set_seek_value(MIN_PLAY_TIME, 45);

    let report = run_settings_scenario(&app, &bundled_config());
    let err = report.into_result().unwrap_err();
    assert!(err.is_assertion());
    assert!(err
        .to_string()
        .contains("expected \"Minimum time set to 30 seconds\""));
}

#[test]
fn test_missing_cancel_button_fails_presence_check() {
    let app = SimulatedApp::new();
    app.hide("android:id/button2");

    let report = run_settings_scenario(&app, &bundled_config());
    match report.error() {
        Some(ProbeError::AssertionFailed { step, .. }) => {
            assert_eq!(step, "Cancel button present");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(report.checks_passed, 1);
}

#[test]
fn test_catalog_missing_key_surfaces_unknown_key() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"xpaths": {{}}, "resource-ids": {{"Settings button": "com.demets.jas:id/action_settings"}}}}"#
    )
    .unwrap();
    let app = SimulatedApp::new();
    let config = bundled_config().with_settings_catalog(file.path());

    let report = run_settings_scenario(&app, &config);
    match report.error() {
        Some(ProbeError::UnknownKey { key, kind }) => {
            assert_eq!(key, "Element summary");
            assert_eq!(*kind, LocatorKind::Structural);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(app.screen(), Screen::Settings);
}

#[test]
fn test_session_is_closed_once_after_failure() {
    let app = SimulatedApp::new();
    app.set_switch(ENABLE_SCROBBLING, false);

    let report = with_session(&app, |driver| {
        Ok(run_settings_scenario(driver, &bundled_config()))
    })
    .unwrap();

    assert!(!report.passed());
    assert_eq!(app.quit_count(), 1);
}

#[test]
fn test_default_config_runs_on_embedded_catalogs() {
    let app = SimulatedApp::new();
    let report = run_settings_scenario(&app, &ScenarioConfig::new());
    assert!(report.passed(), "scenario failed: {:?}", report.failure);
}

#[test]
fn test_bundled_catalogs_cover_page_keys() {
    let main = LocatorCatalog::load(data_path("main_xpaths.json")).unwrap();
    assert!(main.contains(LocatorKind::Id, "Settings button"));

    let settings = LocatorCatalog::load(data_path("settings_xpaths.json")).unwrap();
    for key in ["Element", "Element summary", "Switch", "Navigate up button"] {
        assert!(settings.contains(LocatorKind::Structural, key), "{key}");
    }
    for key in [
        "SeekBarDialog title",
        "SeekBarDialog seekbar",
        "SeekBarDialog summary",
        "SeekBarDialog Cancel button",
        "SeekBarDialog OK button",
    ] {
        assert!(settings.contains(LocatorKind::Id, key), "{key}");
    }
}

#[test]
fn test_single_check_through_settings_page() {
    let app = SimulatedApp::new();
    let steps = StepLog::new();
    let main_catalog = LocatorCatalog::load(data_path("main_xpaths.json")).unwrap();
    let settings_catalog = LocatorCatalog::load(data_path("settings_xpaths.json")).unwrap();
    let main = jas_probar::MainPage::new(&app, main_catalog, steps.clone());
    let settings = SettingsPage::new(&app, settings_catalog, steps.clone());

    main.go_to_settings_screen().unwrap();
    settings.click_element(MIN_TRACK_DURATION).unwrap();
    settings.move_seek_bar_to(50).unwrap();
    assert_eq!(settings.dialog_hint().unwrap(), "30 seconds");
    settings.click_cancel().unwrap();

    for check in settings_checks().iter().filter(|c| c.name() == MIN_PERCENT) {
        check.run(&settings).unwrap();
    }
    assert_eq!(app.seek_value(MIN_PERCENT), 100);
    assert_eq!(steps.failed(), 0);
}
