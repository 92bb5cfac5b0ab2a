//! Widget test procedures.
//!
//! Two recurring preference widgets on the settings screen get a scripted
//! round trip each:
//!
//! - **Switch**: check the default summary and state, toggle once, check the
//!   opposite summary and state. Running it twice on the same switch fails
//!   the second time, because the first run leaves the switch flipped.
//! - **Seek bar dialog**: check the summary, open the dialog, check title,
//!   hint and buttons, drag to 100 % and cancel (value unchanged), reopen,
//!   drag to 100 % and confirm (value becomes `max`).
//!
//! The procedures only need the actions in [`SettingsScreen`]; the UI is
//! assumed to start in its default state.

use serde::{Deserialize, Serialize};

use crate::assertion::Assertion;
use crate::locator::{Position, Size};
use crate::result::{ProbeError, ProbeResult};
use crate::step::StepLog;
use crate::template::format_template;
use crate::touch::TouchAction;

/// Drag target used by the seek bar round trip
pub const SEEK_BAR_TARGET_PERCENT: i32 = 100;

/// Actions the widget procedures perform on a settings screen
pub trait SettingsScreen {
    /// Summary line shown under a preference
    fn summary(&self, name: &str) -> ProbeResult<String>;

    /// Checked state of a switch preference
    fn switch_value(&self, name: &str) -> ProbeResult<bool>;

    /// Click a preference row
    fn click_element(&self, name: &str) -> ProbeResult<()>;

    /// Seek bar dialog title
    fn dialog_title(&self) -> ProbeResult<String>;

    /// Seek bar dialog hint (the current value line)
    fn dialog_hint(&self) -> ProbeResult<String>;

    /// Whether the dialog's OK button is present
    fn is_ok_present(&self) -> ProbeResult<bool>;

    /// Whether the dialog's Cancel button is present
    fn is_cancel_present(&self) -> ProbeResult<bool>;

    /// Confirm the dialog
    fn click_ok(&self) -> ProbeResult<()>;

    /// Dismiss the dialog
    fn click_cancel(&self) -> ProbeResult<()>;

    /// Drag the dialog's seek bar to `percent` of its track
    fn move_seek_bar_to(&self, percent: i32) -> ProbeResult<()>;

    /// Step log the procedures report into
    fn steps(&self) -> &StepLog;
}

/// Parameters of a switch round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSpec {
    /// Preference title
    pub name: String,
    /// State the switch starts in
    pub default_value: bool,
    /// Summary shown while on
    pub enabled_summary: String,
    /// Summary shown while off
    pub disabled_summary: String,
}

impl SwitchSpec {
    /// Create a switch spec
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        default_value: bool,
        enabled_summary: impl Into<String>,
        disabled_summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_value,
            enabled_summary: enabled_summary.into(),
            disabled_summary: disabled_summary.into(),
        }
    }

    /// Summary expected for `state`
    #[must_use]
    pub fn summary_for(&self, state: bool) -> &str {
        if state {
            &self.enabled_summary
        } else {
            &self.disabled_summary
        }
    }
}

/// Parameters of a seek bar dialog round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekBarDialogSpec {
    /// Preference title, also the dialog title
    pub name: String,
    /// Value at 0 %
    pub min: i32,
    /// Value at 100 %
    pub max: i32,
    /// Value the preference starts with
    pub default_value: i32,
    /// Dialog hint template, one `%s` slot for the value
    pub hint_template: String,
    /// Preference summary template, one `%s` slot for the value
    pub summary_template: String,
}

impl SeekBarDialogSpec {
    /// Create a seek bar dialog spec
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        min: i32,
        max: i32,
        default_value: i32,
        hint_template: impl Into<String>,
        summary_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            default_value,
            hint_template: hint_template.into(),
            summary_template: summary_template.into(),
        }
    }

    /// Hint text for `value`
    pub fn hint(&self, value: i32) -> ProbeResult<String> {
        self.render("hint_template", &self.hint_template, value)
    }

    /// Summary text for `value`
    pub fn summary(&self, value: i32) -> ProbeResult<String> {
        self.render("summary_template", &self.summary_template, value)
    }

    fn render(&self, field: &'static str, template: &str, value: i32) -> ProbeResult<String> {
        let value = value.to_string();
        format_template(template, &[value.as_str()]).map_err(|source| {
            ProbeError::SettingTemplate {
                setting: self.name.clone(),
                field,
                source,
            }
        })
    }

    /// Value the seek bar shows at `percent`
    #[must_use]
    pub fn value_at(&self, percent: i32) -> i32 {
        percent_to_value(self.min, self.max, percent)
    }
}

/// Value shown at `percent` of a `min..=max` seek bar.
///
/// Integer arithmetic, truncating toward zero.
#[must_use]
pub fn percent_to_value(min: i32, max: i32, percent: i32) -> i32 {
    let (min, max, percent) = (i64::from(min), i64::from(max), i64::from(percent));
    (min + (max - min) * percent / 100) as i32
}

/// Horizontal drag distance for `percent` of a track `width` pixels wide
#[must_use]
pub fn drag_offset(width: i32, percent: i32) -> i32 {
    (i64::from(width) * i64::from(percent) / 100) as i32
}

/// Gesture that drags a seek bar from its left edge to `percent`.
///
/// The finger goes down at `(x0, y)` and is moved by
/// `(width * percent / 100, y)` relative to that point before release.
#[must_use]
pub fn seek_bar_gesture(location: Position, size: Size, percent: i32) -> TouchAction {
    TouchAction::new()
        .press(location.x, location.y)
        .move_by(drag_offset(size.width, percent), location.y)
        .release()
}

/// Toggle round trip for one switch preference
pub fn test_switch<S: SettingsScreen + ?Sized>(screen: &S, spec: &SwitchSpec) -> ProbeResult<()> {
    let name = spec.name.as_str();
    screen
        .steps()
        .run(format!("Checking \"{name}\" switch"), || {
            let initial = spec.default_value;
            let summary_check = format!("summary of \"{name}\"");
            let state_check = format!("switch state of \"{name}\"");

            Assertion::equals(spec.summary_for(initial), screen.summary(name)?.as_str())
                .check(&summary_check)?;
            Assertion::equals(&initial, &screen.switch_value(name)?).check(&state_check)?;

            screen.click_element(name)?;

            Assertion::equals(spec.summary_for(!initial), screen.summary(name)?.as_str())
                .check(&summary_check)?;
            Assertion::equals(&!initial, &screen.switch_value(name)?).check(&state_check)
        })
}

/// Open / drag / cancel / reopen / drag / confirm round trip for one seek bar dialog
pub fn test_seek_bar_dialog<S: SettingsScreen + ?Sized>(
    screen: &S,
    spec: &SeekBarDialogSpec,
) -> ProbeResult<()> {
    let name = spec.name.as_str();
    screen
        .steps()
        .run(format!("Checking \"{name}\" seekbar"), || {
            let summary_check = format!("summary of \"{name}\"");
            let default_summary = spec.summary(spec.default_value)?;
            let default_hint = spec.hint(spec.default_value)?;

            Assertion::equals(default_summary.as_str(), screen.summary(name)?.as_str())
                .check(&summary_check)?;

            screen.click_element(name)?;
            Assertion::equals(name, screen.dialog_title()?.as_str()).check("dialog title")?;
            Assertion::equals(default_hint.as_str(), screen.dialog_hint()?.as_str())
                .check("dialog hint")?;
            Assertion::is_true(screen.is_ok_present()?).check("OK button present")?;
            Assertion::is_true(screen.is_cancel_present()?).check("Cancel button present")?;

            screen.move_seek_bar_to(SEEK_BAR_TARGET_PERCENT)?;
            check_hint_after_move(screen, spec, SEEK_BAR_TARGET_PERCENT)?;
            screen.click_cancel()?;
            Assertion::equals(default_summary.as_str(), screen.summary(name)?.as_str())
                .check(&summary_check)?;

            screen.click_element(name)?;
            Assertion::equals(default_hint.as_str(), screen.dialog_hint()?.as_str())
                .check("dialog hint")?;
            screen.move_seek_bar_to(SEEK_BAR_TARGET_PERCENT)?;
            check_hint_after_move(screen, spec, SEEK_BAR_TARGET_PERCENT)?;
            screen.click_ok()?;

            let committed = spec.summary(spec.max)?;
            Assertion::equals(committed.as_str(), screen.summary(name)?.as_str())
                .check(&summary_check)
        })
}

fn check_hint_after_move<S: SettingsScreen + ?Sized>(
    screen: &S,
    spec: &SeekBarDialogSpec,
    percent: i32,
) -> ProbeResult<()> {
    screen.steps().run(
        format!("Check SeekBarDialog hint after move to {percent}%"),
        || {
            let expected = spec.hint(spec.value_at(percent))?;
            Assertion::equals(expected.as_str(), screen.dialog_hint()?.as_str())
                .check("dialog hint after move")
        },
    )
}
