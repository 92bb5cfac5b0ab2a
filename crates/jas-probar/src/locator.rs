//! Resolved locators and element geometry.
//!
//! A [`Locator`] is the concrete, fully substituted string handed to the
//! driver. It remembers which catalog mapping it came from so the driver
//! knows which query strategy to use. Locators are built per lookup and
//! dropped once the driver has answered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::LocatorKind;

/// A concrete locator, tagged with the catalog it was resolved from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "using", content = "value")]
pub enum Locator {
    /// XPath expression
    #[serde(rename = "xpath")]
    XPath(String),
    /// Android resource-id
    #[serde(rename = "id")]
    ResourceId(String),
}

impl Locator {
    /// Create an XPath locator
    #[must_use]
    pub fn xpath(path: impl Into<String>) -> Self {
        Self::XPath(path.into())
    }

    /// Create a resource-id locator
    #[must_use]
    pub fn resource_id(id: impl Into<String>) -> Self {
        Self::ResourceId(id.into())
    }

    /// Build a locator of the given kind
    #[must_use]
    pub fn of_kind(kind: LocatorKind, value: impl Into<String>) -> Self {
        match kind {
            LocatorKind::Structural => Self::XPath(value.into()),
            LocatorKind::Id => Self::ResourceId(value.into()),
        }
    }

    /// Catalog mapping this locator came from
    #[must_use]
    pub const fn kind(&self) -> LocatorKind {
        match self {
            Self::XPath(_) => LocatorKind::Structural,
            Self::ResourceId(_) => LocatorKind::Id,
        }
    }

    /// The locator string
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::XPath(v) | Self::ResourceId(v) => v,
        }
    }

    /// WebDriver location strategy name
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::XPath(_) => "xpath",
            Self::ResourceId(_) => "id",
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind(), self.value())
    }
}

/// Top-left corner of an element, in device pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Element dimensions, in device pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Size {
    /// Create a new size
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Element bounding rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRect {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl ElementRect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Width and height
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a point lies inside the rectangle
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}
