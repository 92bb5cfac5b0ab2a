//! Session scoping.
//!
//! A session is acquired before the scenario and released on every exit
//! path. [`SessionGuard`] ends the session when dropped; [`with_session`]
//! wraps a closure in a guard and reports the closure's failure ahead of a
//! failure to quit.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::driver::AutomationDriver;
use crate::result::ProbeResult;

/// Desired capabilities for a new automation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    /// Target platform
    pub platform_name: String,
    /// Automation backend
    pub automation_name: String,
    /// Platform version
    pub platform_version: String,
    /// Device name
    pub device_name: String,
    /// Activity launched at session start
    pub app_activity: String,
    /// Application package under test
    pub app_package: String,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            platform_name: "Android".to_string(),
            automation_name: "Appium".to_string(),
            platform_version: "8.1".to_string(),
            device_name: "Android Emulator".to_string(),
            app_activity: ".MainActivity".to_string(),
            app_package: "com.demets.jas".to_string(),
        }
    }
}

impl Capabilities {
    /// Set the platform version
    #[must_use]
    pub fn with_platform_version(mut self, version: impl Into<String>) -> Self {
        self.platform_version = version.into();
        self
    }

    /// Set the device name
    #[must_use]
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Capabilities as `(name, value)` pairs, in declaration order
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("platformName", self.platform_name.as_str()),
            ("automationName", self.automation_name.as_str()),
            ("platformVersion", self.platform_version.as_str()),
            ("deviceName", self.device_name.as_str()),
            ("appActivity", self.app_activity.as_str()),
            ("appPackage", self.app_package.as_str()),
        ]
    }
}

/// Owns a driver and ends its session exactly once
#[derive(Debug)]
pub struct SessionGuard<D: AutomationDriver> {
    driver: D,
    closed: bool,
}

impl<D: AutomationDriver> SessionGuard<D> {
    /// Take ownership of a live session
    pub fn new(driver: D) -> Self {
        tracing::info!("session opened");
        Self {
            driver,
            closed: false,
        }
    }

    /// The guarded driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// End the session now and report the outcome
    pub fn close(mut self) -> ProbeResult<()> {
        self.quit()
    }

    fn quit(&mut self) -> ProbeResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.driver.quit();
        match &result {
            Ok(()) => tracing::info!("session closed"),
            Err(e) => tracing::warn!(error = %e, "failed to close session"),
        }
        result
    }
}

impl<D: AutomationDriver> Deref for SessionGuard<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.driver
    }
}

impl<D: AutomationDriver> Drop for SessionGuard<D> {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}

/// Run `f` against `driver`, then end the session whatever happened.
///
/// An error from `f` wins over an error from quitting.
pub fn with_session<D, T, F>(driver: D, f: F) -> ProbeResult<T>
where
    D: AutomationDriver,
    F: FnOnce(&D) -> ProbeResult<T>,
{
    let guard = SessionGuard::new(driver);
    let result = f(guard.driver());
    let closed = guard.close();
    match (result, closed) {
        (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        (Ok(value), Ok(())) => Ok(value),
    }
}
