//! Page objects for the JAS app.
//!
//! Each page owns a [`Resolver`](crate::Resolver) over its own locator
//! catalog and borrows the shared driver. Every public action runs as a
//! recorded step in the page's [`StepLog`](crate::StepLog).

mod main_page;
mod settings_page;

pub use main_page::MainPage;
pub use settings_page::SettingsPage;
