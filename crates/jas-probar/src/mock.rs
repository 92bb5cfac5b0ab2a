//! Mock driver for unit testing.
//!
//! [`MockDriver`] answers lookups from an in-memory table of locators to
//! elements and records every call it receives, so tests can check both
//! results and how many times the driver was queried. Clicks and gestures
//! are recorded but have no effect on the table.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::driver::{AutomationDriver, ElementHandle};
use crate::locator::{ElementRect, Locator};
use crate::result::{ProbeError, ProbeResult};
use crate::touch::TouchAction;

/// An element held by [`MockDriver`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    /// Element id
    pub id: String,
    /// Visible text
    pub text: String,
    /// Attributes
    pub attributes: HashMap<String, String>,
    /// Bounding rectangle
    pub rect: ElementRect,
}

impl MockElement {
    /// Create an element with an id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the bounding rectangle
    #[must_use]
    pub const fn with_rect(mut self, rect: ElementRect) -> Self {
        self.rect = rect;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    elements: HashMap<Locator, Vec<MockElement>>,
    call_history: Vec<String>,
    gestures: Vec<TouchAction>,
    quit_count: usize,
}

impl MockState {
    fn element(&self, id: &str) -> ProbeResult<&MockElement> {
        self.elements
            .values()
            .flatten()
            .find(|e| e.id == id)
            .ok_or_else(|| ProbeError::driver(format!("stale element reference: {id}")))
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut MockElement> {
        self.elements.values_mut().flatten().find(|e| e.id == id)
    }
}

/// Mock driver for unit testing
#[derive(Debug, Default)]
pub struct MockDriver {
    state: RefCell<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element matched by `locator`
    pub fn add_element(&self, locator: Locator, element: MockElement) {
        self.state
            .borrow_mut()
            .elements
            .entry(locator)
            .or_default()
            .push(element);
    }

    /// Remove every element matched by `locator`
    pub fn remove_elements(&self, locator: &Locator) {
        let _ = self.state.borrow_mut().elements.remove(locator);
    }

    /// Change the text of an element
    pub fn set_text(&self, id: &str, text: impl Into<String>) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            element.text = text.into();
        }
    }

    /// Change an attribute of an element
    pub fn set_attribute(&self, id: &str, name: impl Into<String>, value: impl Into<String>) {
        if let Some(element) = self.state.borrow_mut().element_mut(id) {
            let _ = element.attributes.insert(name.into(), value.into());
        }
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.borrow().call_history.clone()
    }

    /// Check if a call starting with `method` was made
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state
            .borrow()
            .call_history
            .iter()
            .any(|c| c.starts_with(method))
    }

    /// Number of `find_element`/`find_elements` calls
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.state
            .borrow()
            .call_history
            .iter()
            .filter(|c| c.starts_with("find_"))
            .count()
    }

    /// Gestures performed so far
    #[must_use]
    pub fn gestures(&self) -> Vec<TouchAction> {
        self.state.borrow().gestures.clone()
    }

    /// How many times `quit` was called
    #[must_use]
    pub fn quit_count(&self) -> usize {
        self.state.borrow().quit_count
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().call_history.push(call);
    }
}

impl AutomationDriver for MockDriver {
    fn find_element(&self, locator: &Locator) -> ProbeResult<ElementHandle> {
        self.record(format!("find_element:{locator}"));
        self.state
            .borrow()
            .elements
            .get(locator)
            .and_then(|found| found.first())
            .map(|e| ElementHandle::new(e.id.clone()))
            .ok_or_else(|| ProbeError::ElementLookup {
                locator: locator.clone(),
                message: "no such element".to_string(),
            })
    }

    fn find_elements(&self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        self.record(format!("find_elements:{locator}"));
        Ok(self
            .state
            .borrow()
            .elements
            .get(locator)
            .map(|found| {
                found
                    .iter()
                    .map(|e| ElementHandle::new(e.id.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn click(&self, element: &ElementHandle) -> ProbeResult<()> {
        self.record(format!("click:{}", element.id));
        self.state.borrow().element(&element.id).map(|_| ())
    }

    fn text(&self, element: &ElementHandle) -> ProbeResult<String> {
        self.record(format!("text:{}", element.id));
        self.state
            .borrow()
            .element(&element.id)
            .map(|e| e.text.clone())
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        self.record(format!("attribute:{}:{name}", element.id));
        self.state
            .borrow()
            .element(&element.id)
            .map(|e| e.attributes.get(name).cloned())
    }

    fn rect(&self, element: &ElementHandle) -> ProbeResult<ElementRect> {
        self.record(format!("rect:{}", element.id));
        self.state.borrow().element(&element.id).map(|e| e.rect)
    }

    fn perform(&self, action: &TouchAction) -> ProbeResult<()> {
        self.record("perform".to_string());
        self.state.borrow_mut().gestures.push(action.clone());
        Ok(())
    }

    fn quit(&self) -> ProbeResult<()> {
        self.record("quit".to_string());
        self.state.borrow_mut().quit_count += 1;
        Ok(())
    }
}
