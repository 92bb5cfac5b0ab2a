//! Touch gestures.
//!
//! Gestures are built as an ordered list of steps and handed to the driver
//! in one call. Moves are relative to the current touch point, so
//! `press(x, y).move_by(dx, dy)` lands at `(x + dx, y + dy)`.

use serde::{Deserialize, Serialize};

use crate::locator::Position;

/// One step of a touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TouchStep {
    /// Put a finger down at an absolute point
    Press {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },
    /// Move the finger by an offset from its current point
    MoveBy {
        /// Horizontal offset
        dx: i32,
        /// Vertical offset
        dy: i32,
    },
    /// Lift the finger
    Release,
}

/// Touch gesture builder
///
/// ```
/// use jas_probar::TouchAction;
///
/// let drag = TouchAction::new().press(40, 900).move_by(1000, 900).release();
/// assert_eq!(drag.steps().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchAction {
    steps: Vec<TouchStep>,
}

impl TouchAction {
    /// Create an empty gesture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Press at an absolute point
    #[must_use]
    pub fn press(mut self, x: i32, y: i32) -> Self {
        self.steps.push(TouchStep::Press { x, y });
        self
    }

    /// Move relative to the current touch point
    #[must_use]
    pub fn move_by(mut self, dx: i32, dy: i32) -> Self {
        self.steps.push(TouchStep::MoveBy { dx, dy });
        self
    }

    /// Lift the finger
    #[must_use]
    pub fn release(mut self) -> Self {
        self.steps.push(TouchStep::Release);
        self
    }

    /// Steps in order
    #[must_use]
    pub fn steps(&self) -> &[TouchStep] {
        &self.steps
    }

    /// Where the finger was first put down
    #[must_use]
    pub fn start_point(&self) -> Option<Position> {
        self.steps.iter().find_map(|step| match step {
            TouchStep::Press { x, y } => Some(Position::new(*x, *y)),
            _ => None,
        })
    }

    /// Absolute point at which the finger is lifted
    #[must_use]
    pub fn end_point(&self) -> Option<Position> {
        let mut current: Option<Position> = None;
        for step in &self.steps {
            match *step {
                TouchStep::Press { x, y } => current = Some(Position::new(x, y)),
                TouchStep::MoveBy { dx, dy } => {
                    current = current.map(|p| Position::new(p.x + dx, p.y + dy));
                }
                TouchStep::Release => {}
            }
        }
        current
    }
}
