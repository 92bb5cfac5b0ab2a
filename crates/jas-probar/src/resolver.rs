//! Locator resolution.
//!
//! The resolver turns a symbolic key plus positional arguments into a
//! concrete [`Locator`] using one page object's catalog, then asks the
//! driver for the element. Nothing is cached: each call re-reads the
//! catalog and re-queries the driver.

use crate::catalog::{LocatorCatalog, LocatorKind};
use crate::driver::{AutomationDriver, Element};
use crate::locator::Locator;
use crate::result::ProbeResult;

/// Resolves catalog keys against a driver
#[derive(Debug)]
pub struct Resolver<'d, D: AutomationDriver + ?Sized> {
    driver: &'d D,
    catalog: LocatorCatalog,
}

impl<'d, D: AutomationDriver + ?Sized> Resolver<'d, D> {
    /// Create a resolver over an already loaded catalog
    pub fn new(driver: &'d D, catalog: LocatorCatalog) -> Self {
        Self { driver, catalog }
    }

    /// The catalog
    #[must_use]
    pub const fn catalog(&self) -> &LocatorCatalog {
        &self.catalog
    }

    /// The driver
    #[must_use]
    pub const fn driver(&self) -> &'d D {
        self.driver
    }

    /// Resolve `key` in the `kind` mapping
    pub fn resolve(&self, kind: LocatorKind, key: &str, args: &[&str]) -> ProbeResult<Locator> {
        let locator = self.catalog.resolve(kind, key, args)?;
        tracing::trace!(key, %locator, "resolved locator");
        Ok(locator)
    }

    /// Resolve `key` in the XPath mapping
    pub fn resolve_structural(&self, key: &str, args: &[&str]) -> ProbeResult<Locator> {
        self.resolve(LocatorKind::Structural, key, args)
    }

    /// Resolve `key` in the resource-id mapping
    pub fn resolve_id(&self, key: &str, args: &[&str]) -> ProbeResult<Locator> {
        self.resolve(LocatorKind::Id, key, args)
    }

    /// Resolve `key` and find the single element it names
    pub fn find(&self, kind: LocatorKind, key: &str, args: &[&str]) -> ProbeResult<Element<'d, D>> {
        let locator = self.resolve(kind, key, args)?;
        let handle = self.driver.find_element(&locator)?;
        Ok(Element::new(self.driver, handle, locator))
    }

    /// Find an element by XPath key
    pub fn find_structural(&self, key: &str, args: &[&str]) -> ProbeResult<Element<'d, D>> {
        self.find(LocatorKind::Structural, key, args)
    }

    /// Find an element by resource-id key
    pub fn find_id(&self, key: &str, args: &[&str]) -> ProbeResult<Element<'d, D>> {
        self.find(LocatorKind::Id, key, args)
    }

    /// Whether any element matches the resource-id key.
    ///
    /// An unknown key answers `false` without touching the driver, exactly
    /// like a known key that matches nothing.
    pub fn exists_id(&self, key: &str, args: &[&str]) -> ProbeResult<bool> {
        if !self.catalog.contains(LocatorKind::Id, key) {
            tracing::debug!(key, "presence check on unknown resource-id key");
            return Ok(false);
        }
        let locator = self.resolve_id(key, args)?;
        Ok(!self.driver.find_elements(&locator)?.is_empty())
    }
}
