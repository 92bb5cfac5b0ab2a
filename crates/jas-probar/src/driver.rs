//! Driver collaborator.
//!
//! [`AutomationDriver`] is everything the page objects need from a live
//! automation session: find one or all elements for a [`Locator`], read and
//! click them, ask for their geometry, perform a touch gesture and end the
//! session. Every call is synchronous and may be slow; failures come back
//! as errors and are never retried here.
//!
//! # Implementations
//!
//! - [`crate::MockDriver`] - in-memory element table with call history
//! - `AppiumDriver` - W3C WebDriver over HTTP (feature `appium`)

use serde::{Deserialize, Serialize};

use crate::locator::{ElementRect, Locator, Position, Size};
use crate::result::ProbeResult;
use crate::touch::TouchAction;

/// Opaque reference to an element, owned by the driver session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned element id
    pub id: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Abstract automation session
pub trait AutomationDriver {
    /// Find exactly one element; fails with `ElementLookup` when none match
    fn find_element(&self, locator: &Locator) -> ProbeResult<ElementHandle>;

    /// Find all matching elements; an empty list is not an error
    fn find_elements(&self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>>;

    /// Click an element
    fn click(&self, element: &ElementHandle) -> ProbeResult<()>;

    /// Visible text of an element
    fn text(&self, element: &ElementHandle) -> ProbeResult<String>;

    /// Attribute value, `None` when the attribute is absent
    fn attribute(&self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>>;

    /// Bounding rectangle of an element
    fn rect(&self, element: &ElementHandle) -> ProbeResult<ElementRect>;

    /// Top-left corner of an element
    fn location(&self, element: &ElementHandle) -> ProbeResult<Position> {
        Ok(self.rect(element)?.position())
    }

    /// Width and height of an element
    fn size(&self, element: &ElementHandle) -> ProbeResult<Size> {
        Ok(self.rect(element)?.size())
    }

    /// Perform a touch gesture
    fn perform(&self, action: &TouchAction) -> ProbeResult<()>;

    /// Terminate the session
    fn quit(&self) -> ProbeResult<()>;
}

impl<D: AutomationDriver + ?Sized> AutomationDriver for &D {
    fn find_element(&self, locator: &Locator) -> ProbeResult<ElementHandle> {
        (**self).find_element(locator)
    }

    fn find_elements(&self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        (**self).find_elements(locator)
    }

    fn click(&self, element: &ElementHandle) -> ProbeResult<()> {
        (**self).click(element)
    }

    fn text(&self, element: &ElementHandle) -> ProbeResult<String> {
        (**self).text(element)
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        (**self).attribute(element, name)
    }

    fn rect(&self, element: &ElementHandle) -> ProbeResult<ElementRect> {
        (**self).rect(element)
    }

    fn location(&self, element: &ElementHandle) -> ProbeResult<Position> {
        (**self).location(element)
    }

    fn size(&self, element: &ElementHandle) -> ProbeResult<Size> {
        (**self).size(element)
    }

    fn perform(&self, action: &TouchAction) -> ProbeResult<()> {
        (**self).perform(action)
    }

    fn quit(&self) -> ProbeResult<()> {
        (**self).quit()
    }
}

/// An element found through a driver, valid for the current operation only
#[derive(Debug)]
pub struct Element<'d, D: AutomationDriver + ?Sized> {
    driver: &'d D,
    handle: ElementHandle,
    locator: Locator,
}

impl<'d, D: AutomationDriver + ?Sized> Element<'d, D> {
    /// Pair a handle with the driver that produced it
    pub fn new(driver: &'d D, handle: ElementHandle, locator: Locator) -> Self {
        Self {
            driver,
            handle,
            locator,
        }
    }

    /// Driver handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Locator the element was found with
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Click the element
    pub fn click(&self) -> ProbeResult<()> {
        self.driver.click(&self.handle)
    }

    /// Visible text
    pub fn text(&self) -> ProbeResult<String> {
        self.driver.text(&self.handle)
    }

    /// Attribute value
    pub fn attribute(&self, name: &str) -> ProbeResult<Option<String>> {
        self.driver.attribute(&self.handle, name)
    }

    /// Top-left corner
    pub fn location(&self) -> ProbeResult<Position> {
        self.driver.location(&self.handle)
    }

    /// Width and height
    pub fn size(&self) -> ProbeResult<Size> {
        self.driver.size(&self.handle)
    }
}
