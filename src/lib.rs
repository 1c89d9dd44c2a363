//! pagekit - Page-interaction and session-lifecycle layer for WebDriver tests.
//!
//! This library is the base layer for browser-driven UI test suites built on
//! [`thirtyfour`]. It wraps a WebDriver session in two facades:
//!
//! - [`Page`] - one receiver for everything a test does to a page: explicit
//!   waits, clicks and typing, dropdowns, frames, windows, alerts, cookies,
//!   and a JavaScript escape hatch
//! - [`Session`] - the setup/teardown bracket around a test run, with
//!   teardown that never fails the run
//!
//! Elements are addressed with [`Locator`] values: XPath templates holding
//! `{}` placeholders that are resolved positionally at the call site, so one
//! locator constant serves a whole family of elements.
//!
//! # Quick Start
//!
//! ```no_run
//! use pagekit::{BrowserKind, Locator, Session};
//!
//! const MENU_ITEM: Locator = Locator::xpath("//nav//a[text()='{}']");
//!
//! #[tokio::main]
//! async fn main() -> pagekit::Result<()> {
//!     let mut session = Session::builder(BrowserKind::Chrome)
//!         .headless()
//!         .start_url("https://example.com")
//!         .start()
//!         .await?;
//!
//!     let page = session.page()?;
//!     page.click(&MENU_ITEM.with(["Products"])?).await?;
//!     assert!(page.is_displayed(&Locator::xpath("//h1")).await?);
//!
//!     session.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Timeouts, project paths, environment base URLs |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`locator`] | XPath templates with positional placeholders |
//! | [`page`] | The page-interaction facade |
//! | [`session`] | Browser session lifecycle and teardown |

// ============================================================================
// Modules
// ============================================================================

/// Timeouts, project paths, and environment base URLs.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// XPath templates with positional placeholders.
///
/// Declare locators as constants with [`Locator::xpath`] and resolve them
/// with [`Locator::with`].
pub mod locator;

/// The page-interaction facade.
///
/// One [`Page`] value per driver handle; every interaction waits for its
/// element first.
pub mod page;

/// Browser session lifecycle.
///
/// Use [`Session::builder`] to start a session; [`Session::close`] tears it
/// down without ever failing the run.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Facade types
pub use page::{Alert, Page};

// Session types
pub use session::{BrowserKind, ProcessReaper, Session, SessionBuilder, SystemReaper};

// Locator types
pub use locator::Locator;

// Error types
pub use error::{Error, Result};

// Driver types tests commonly need alongside the facade
pub use thirtyfour::{By, Cookie, Key, WebDriver, WebElement, WindowHandle};
