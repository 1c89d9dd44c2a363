//! Browser session lifecycle module.
//!
//! This module owns the setup and teardown bracket around a test run:
//! pick a browser, start a driver session with sensible defaults, and
//! tear everything down without ever failing the run.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Session`] | An owned WebDriver session with teardown hygiene |
//! | [`SessionBuilder`] | Fluent configuration builder |
//! | [`BrowserKind`] | Supported browsers and their defaults |
//! | [`ProcessReaper`] | Strategy for killing leftover driver processes |
//! | [`SystemReaper`] | Platform kill-command reaper |
//!
//! # Example
//!
//! ```no_run
//! use pagekit::{BrowserKind, Session};
//!
//! # async fn example() -> pagekit::Result<()> {
//! let mut session = Session::builder(BrowserKind::Chrome)
//!     .headless()
//!     .start_url("https://example.com")
//!     .start()
//!     .await?;
//!
//! let page = session.page()?;
//! page.wait_for_document_ready().await?;
//!
//! session.close().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Browser selection and per-browser defaults.
pub mod browser;

/// Fluent builder pattern for session configuration.
pub mod builder;

/// Core session implementation.
pub mod core;

/// Leftover driver process cleanup.
pub mod reaper;

// ============================================================================
// Re-exports
// ============================================================================

pub use browser::BrowserKind;
pub use builder::SessionBuilder;
pub use core::Session;
pub use reaper::{ProcessReaper, SystemReaper};
