//! Simulated JAS app for integration tests.
//!
//! Reacts to clicks and drags the way the real settings screen does: switches
//! toggle, seek bar preferences open a dialog whose value follows the drag
//! and is committed on OK. XPaths are matched by reversing the templates of
//! the bundled settings catalog.

#![allow(dead_code, clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use jas_probar::{
    AutomationDriver, ElementHandle, ElementRect, Locator, LocatorCatalog, LocatorKind,
    ProbeError, ProbeResult, ScenarioConfig, TouchAction,
};

/// Path of a bundled data file
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Config pointing at the bundled catalogs
pub fn bundled_config() -> ScenarioConfig {
    ScenarioConfig::new()
        .with_main_catalog(data_path("main_xpaths.json"))
        .with_settings_catalog(data_path("settings_xpaths.json"))
}

const SETTINGS_BUTTON: &str = "com.demets.jas:id/action_settings";
const DIALOG_TITLE: &str = "android:id/alertTitle";
const DIALOG_SEEKBAR: &str = "com.demets.jas:id/seekbar";
const DIALOG_HINT: &str = "com.demets.jas:id/seekbar_value";
const DIALOG_CANCEL: &str = "android:id/button2";
const DIALOG_OK: &str = "android:id/button1";

const SEEKBAR_RECT: ElementRect = ElementRect::new(56, 1100, 968, 48);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Settings,
}

#[derive(Debug, Clone)]
struct SwitchPref {
    on: bool,
    enabled: &'static str,
    disabled: &'static str,
}

#[derive(Debug, Clone)]
struct SeekPref {
    min: i32,
    max: i32,
    value: i32,
    unit: &'static str,
    summary_prefix: &'static str,
}

#[derive(Debug, Clone)]
struct Dialog {
    pref: String,
    pending: i32,
}

#[derive(Debug)]
struct AppState {
    screen: Screen,
    switches: HashMap<String, SwitchPref>,
    seekbars: HashMap<String, SeekPref>,
    dialog: Option<Dialog>,
    hidden: Vec<String>,
    quit_count: usize,
}

/// Row element kinds matched through XPath templates
#[derive(Debug, Clone, Copy)]
enum Row {
    Title,
    Summary,
    Switch,
}

/// In-memory JAS app
#[derive(Debug)]
pub struct SimulatedApp {
    state: RefCell<AppState>,
    rows: Vec<(Row, String, String)>,
    up_button: String,
}

impl SimulatedApp {
    /// App on its main screen with every preference at its default
    pub fn new() -> Self {
        let catalog = LocatorCatalog::load(data_path("settings_xpaths.json")).unwrap();
        let split = |key: &str| {
            let template = catalog.template(LocatorKind::Structural, key).unwrap();
            let (prefix, suffix) = template.split_once("%s").unwrap();
            (prefix.to_string(), suffix.to_string())
        };
        // Longest suffix first: the title template is a prefix of the others.
        let mut rows = Vec::new();
        for (row, key) in [
            (Row::Switch, "Switch"),
            (Row::Summary, "Element summary"),
            (Row::Title, "Element"),
        ] {
            let (prefix, suffix) = split(key);
            rows.push((row, prefix, suffix));
        }
        let up_button = catalog
            .template(LocatorKind::Structural, "Navigate up button")
            .unwrap()
            .to_string();

        let mut switches = HashMap::new();
        for (name, on, enabled, disabled) in [
            (
                "Enable scrobbling",
                true,
                "Scrobbling enabled",
                "Scrobbling disabled",
            ),
            (
                "Enable notifications",
                true,
                "Notifications enabled",
                "Notifications disabled",
            ),
            (
                "Minimum priority notifications",
                true,
                "Minimum priority set",
                "Default priority set",
            ),
            (
                "Enable toast message on scrobble",
                false,
                "Toast message enabled",
                "Toast message disabled",
            ),
        ] {
            let _ = switches.insert(
                name.to_string(),
                SwitchPref {
                    on,
                    enabled,
                    disabled,
                },
            );
        }

        let mut seekbars = HashMap::new();
        for (name, min, max, value, unit, summary_prefix) in [
            (
                "Minimum play time to scrobble",
                1,
                60,
                30,
                "seconds",
                "Minimum time set to",
            ),
            (
                "Minimum percent of track duration to scrobble",
                50,
                100,
                50,
                "percents",
                "Minimum percent set to",
            ),
            (
                "Minimum track duration",
                1,
                60,
                30,
                "seconds",
                "Minimum track duration set to",
            ),
        ] {
            let _ = seekbars.insert(
                name.to_string(),
                SeekPref {
                    min,
                    max,
                    value,
                    unit,
                    summary_prefix,
                },
            );
        }

        Self {
            state: RefCell::new(AppState {
                screen: Screen::Main,
                switches,
                seekbars,
                dialog: None,
                hidden: Vec::new(),
                quit_count: 0,
            }),
            rows,
            up_button,
        }
    }

    pub fn screen(&self) -> Screen {
        self.state.borrow().screen
    }

    pub fn switch_on(&self, name: &str) -> bool {
        self.state.borrow().switches[name].on
    }

    pub fn seek_value(&self, name: &str) -> i32 {
        self.state.borrow().seekbars[name].value
    }

    pub fn set_switch(&self, name: &str, on: bool) {
        self.state.borrow_mut().switches.get_mut(name).unwrap().on = on;
    }

    pub fn set_seek_value(&self, name: &str, value: i32) {
        self.state.borrow_mut().seekbars.get_mut(name).unwrap().value = value;
    }

    /// Make a resource id unfindable
    pub fn hide(&self, resource_id: &str) {
        self.state.borrow_mut().hidden.push(resource_id.to_string());
    }

    pub fn quit_count(&self) -> usize {
        self.state.borrow().quit_count
    }

    fn row_name<'a>(&self, xpath: &'a str) -> Option<(Row, &'a str)> {
        self.rows.iter().find_map(|(row, prefix, suffix)| {
            let name = xpath.strip_prefix(prefix.as_str())?.strip_suffix(suffix.as_str())?;
            (!name.contains('\'')).then_some((*row, name))
        })
    }

    /// Element id visible for `locator`, if any
    fn lookup(&self, locator: &Locator) -> Option<String> {
        let state = self.state.borrow();
        let on_settings = state.screen == Screen::Settings;
        match locator {
            Locator::ResourceId(id) => {
                if state.hidden.contains(id) {
                    return None;
                }
                let dialog_open = on_settings && state.dialog.is_some();
                match id.as_str() {
                    SETTINGS_BUTTON if state.screen == Screen::Main => Some(id.clone()),
                    DIALOG_TITLE | DIALOG_SEEKBAR | DIALOG_HINT | DIALOG_CANCEL | DIALOG_OK
                        if dialog_open =>
                    {
                        Some(id.clone())
                    }
                    _ => None,
                }
            }
            Locator::XPath(xpath) => {
                if !on_settings || state.dialog.is_some() {
                    return None;
                }
                if *xpath == self.up_button {
                    return Some("up".to_string());
                }
                let (row, name) = self.row_name(xpath)?;
                let known_switch = state.switches.contains_key(name);
                let known = known_switch || state.seekbars.contains_key(name);
                match row {
                    Row::Title if known => Some(format!("title:{name}")),
                    Row::Summary if known => Some(format!("summary:{name}")),
                    Row::Switch if known_switch => Some(format!("switch:{name}")),
                    _ => None,
                }
            }
        }
    }

    fn visible(&self, element: &ElementHandle) -> ProbeResult<()> {
        let state = self.state.borrow();
        let on_settings = state.screen == Screen::Settings;
        let ok = match element.id.as_str() {
            SETTINGS_BUTTON => state.screen == Screen::Main,
            DIALOG_TITLE | DIALOG_SEEKBAR | DIALOG_HINT | DIALOG_CANCEL | DIALOG_OK => {
                on_settings && state.dialog.is_some()
            }
            _ => on_settings && state.dialog.is_none(),
        };
        if ok {
            Ok(())
        } else {
            Err(ProbeError::driver(format!(
                "stale element reference: {}",
                element.id
            )))
        }
    }
}

impl AutomationDriver for SimulatedApp {
    fn find_element(&self, locator: &Locator) -> ProbeResult<ElementHandle> {
        self.lookup(locator)
            .map(ElementHandle::new)
            .ok_or_else(|| ProbeError::ElementLookup {
                locator: locator.clone(),
                message: "An element could not be located on the page".to_string(),
            })
    }

    fn find_elements(&self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        Ok(self.lookup(locator).map(ElementHandle::new).into_iter().collect())
    }

    fn click(&self, element: &ElementHandle) -> ProbeResult<()> {
        self.visible(element)?;
        let mut state = self.state.borrow_mut();
        let id = element.id.as_str();
        match id {
            SETTINGS_BUTTON => state.screen = Screen::Settings,
            "up" => state.screen = Screen::Main,
            DIALOG_OK => {
                if let Some(dialog) = state.dialog.take() {
                    state.seekbars.get_mut(&dialog.pref).unwrap().value = dialog.pending;
                }
            }
            DIALOG_CANCEL => state.dialog = None,
            _ => {
                let name = id
                    .strip_prefix("title:")
                    .or_else(|| id.strip_prefix("summary:"))
                    .or_else(|| id.strip_prefix("switch:"))
                    .ok_or_else(|| ProbeError::driver(format!("not clickable: {id}")))?
                    .to_string();
                if let Some(switch) = state.switches.get_mut(&name) {
                    switch.on = !switch.on;
                } else if let Some(seek) = state.seekbars.get(&name) {
                    let pending = seek.value;
                    state.dialog = Some(Dialog {
                        pref: name,
                        pending,
                    });
                }
            }
        }
        Ok(())
    }

    fn text(&self, element: &ElementHandle) -> ProbeResult<String> {
        self.visible(element)?;
        let state = self.state.borrow();
        let id = element.id.as_str();
        if let Some(name) = id.strip_prefix("summary:") {
            if let Some(switch) = state.switches.get(name) {
                let text = if switch.on { switch.enabled } else { switch.disabled };
                return Ok(text.to_string());
            }
            let seek = &state.seekbars[name];
            return Ok(format!("{} {} {}", seek.summary_prefix, seek.value, seek.unit));
        }
        if let Some(name) = id.strip_prefix("title:") {
            return Ok(name.to_string());
        }
        let dialog = state
            .dialog
            .as_ref()
            .ok_or_else(|| ProbeError::driver("no dialog"))?;
        match id {
            DIALOG_TITLE => Ok(dialog.pref.clone()),
            DIALOG_HINT => Ok(format!(
                "{} {}",
                dialog.pending, state.seekbars[&dialog.pref].unit
            )),
            DIALOG_OK => Ok("OK".to_string()),
            DIALOG_CANCEL => Ok("Cancel".to_string()),
            _ => Ok(String::new()),
        }
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        self.visible(element)?;
        let state = self.state.borrow();
        Ok(element
            .id
            .strip_prefix("switch:")
            .filter(|_| name == "checked")
            .and_then(|pref| state.switches.get(pref))
            .map(|switch| switch.on.to_string()))
    }

    fn rect(&self, element: &ElementHandle) -> ProbeResult<ElementRect> {
        self.visible(element)?;
        Ok(if element.id == DIALOG_SEEKBAR {
            SEEKBAR_RECT
        } else {
            ElementRect::new(0, 0, 1080, 144)
        })
    }

    fn perform(&self, action: &TouchAction) -> ProbeResult<()> {
        let (Some(start), Some(end)) = (action.start_point(), action.end_point()) else {
            return Err(ProbeError::driver("incomplete gesture"));
        };
        let mut state = self.state.borrow_mut();
        if !SEEKBAR_RECT.contains(start.x, start.y) {
            return Ok(());
        }
        let Some(dialog) = state.dialog.as_ref() else {
            return Ok(());
        };
        let seek = &state.seekbars[&dialog.pref];
        let percent = ((end.x - SEEKBAR_RECT.x) * 100 / SEEKBAR_RECT.width).clamp(0, 100);
        let pending = seek.min + (seek.max - seek.min) * percent / 100;
        if let Some(dialog) = state.dialog.as_mut() {
            dialog.pending = pending;
        }
        Ok(())
    }

    fn quit(&self) -> ProbeResult<()> {
        self.state.borrow_mut().quit_count += 1;
        Ok(())
    }
}
