//! Browser test harness for the paper trading web application.
//!
//! Layers, bottom to top:
//! - [`browser`] / [`driver`]: one Chromium session per test and the
//!   typed page operations (navigate, click, fill, wait, assert) built
//!   on CDP evaluation.
//! - [`dom`]: the locator language the drivers resolve in-page.
//! - [`pages`]: page objects for each screen of the application.
//! - [`fixture`] / [`runner`] / [`report`]: per-case provisioning, the
//!   suite executor, and the JSON run artifact.

pub mod browser;
pub mod capability;
pub mod dom;
pub mod driver;
pub mod error;
pub mod fixture;
pub mod models;
pub mod pages;
pub mod preflight;
pub mod report;
pub mod runner;
pub mod settings;
pub mod testdata;

pub use capability::Capability;
pub use error::{HarnessError, HarnessResult};
pub use fixture::TestContext;
pub use models::{Stock, Trade, TradeType, User};
pub use report::{CaseOutcome, SuiteReport};
pub use runner::{AuthMode, CaseFuture, Runner, Tag, TestCase};
pub use settings::Settings;
