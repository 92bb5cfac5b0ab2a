//! Locator catalogs.
//!
//! A catalog is the hand-authored JSON resource that maps symbolic element
//! keys to locator templates for one page object:
//!
//! ```json
//! {
//!   "xpaths": { "Element": "//android.widget.TextView[@text='%s']" },
//!   "resource-ids": { "SeekBarDialog OK button": "android:id/button1" }
//! }
//! ```
//!
//! Both fields are required. The catalog is read once and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::locator::Locator;
use crate::result::{ProbeError, ProbeResult};
use crate::template::Template;

/// Which mapping of a catalog a key lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocatorKind {
    /// Structural path (XPath) templates
    #[serde(rename = "xpath")]
    Structural,
    /// Platform resource-id templates
    #[serde(rename = "resource-id")]
    Id,
}

impl LocatorKind {
    /// All kinds, in catalog order
    pub const ALL: [Self; 2] = [Self::Structural, Self::Id];

    /// Name used on the wire and in messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "xpath",
            Self::Id => "resource-id",
        }
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable key → template mappings for one page object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocatorCatalog {
    xpaths: HashMap<String, String>,
    #[serde(rename = "resource-ids")]
    resource_ids: HashMap<String, String>,
}

impl LocatorCatalog {
    /// Build a catalog from in-memory mappings
    #[must_use]
    pub fn new(xpaths: HashMap<String, String>, resource_ids: HashMap<String, String>) -> Self {
        Self {
            xpaths,
            resource_ids,
        }
    }

    /// Load a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        let resource = path.display().to_string();
        let file = File::open(path).map_err(|e| ProbeError::Load {
            resource: resource.clone(),
            message: e.to_string(),
        })?;
        let catalog = Self::read(BufReader::new(file), &resource)?;
        tracing::debug!(
            resource = %resource,
            xpaths = catalog.xpaths.len(),
            resource_ids = catalog.resource_ids.len(),
            "loaded locator catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog from any reader
    pub fn from_reader(reader: impl Read) -> ProbeResult<Self> {
        Self::read(reader, "<reader>")
    }

    /// Load a catalog from a JSON string
    pub fn from_json_str(json: &str) -> ProbeResult<Self> {
        serde_json::from_str(json).map_err(|e| ProbeError::Load {
            resource: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn read(reader: impl Read, resource: &str) -> ProbeResult<Self> {
        serde_json::from_reader(reader).map_err(|e| ProbeError::Load {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }

    /// The mapping for `kind`
    #[must_use]
    pub fn templates(&self, kind: LocatorKind) -> &HashMap<String, String> {
        match kind {
            LocatorKind::Structural => &self.xpaths,
            LocatorKind::Id => &self.resource_ids,
        }
    }

    /// Template stored under `key`, if any
    #[must_use]
    pub fn template(&self, kind: LocatorKind, key: &str) -> Option<&str> {
        self.templates(kind).get(key).map(String::as_str)
    }

    /// Substitute `args` into the template under `key`
    pub fn resolve(&self, kind: LocatorKind, key: &str, args: &[&str]) -> ProbeResult<Locator> {
        let template = self
            .template(kind, key)
            .ok_or_else(|| ProbeError::UnknownKey {
                key: key.to_string(),
                kind,
            })?;
        let value = Template::parse(template)
            .and_then(|t| t.render(args))
            .map_err(|source| ProbeError::Template {
                key: key.to_string(),
                source,
            })?;
        Ok(Locator::of_kind(kind, value))
    }

    /// Whether `key` exists in the `kind` mapping
    #[must_use]
    pub fn contains(&self, kind: LocatorKind, key: &str) -> bool {
        self.templates(kind).contains_key(key)
    }

    /// Keys of the `kind` mapping, sorted
    #[must_use]
    pub fn keys(&self, kind: LocatorKind) -> Vec<&str> {
        let mut keys: Vec<&str> = self.templates(kind).keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of entries in the `kind` mapping
    #[must_use]
    pub fn len(&self, kind: LocatorKind) -> usize {
        self.templates(kind).len()
    }

    /// Whether both mappings are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xpaths.is_empty() && self.resource_ids.is_empty()
    }
}
