//! Browser session lifecycle.
//!
//! A [`Session`] owns one WebDriver session from creation to teardown.
//! Teardown is deliberately forgiving: every step of [`Session::close`] is
//! attempted, failures are logged and swallowed, and calling it twice is
//! harmless. A test that passed must never fail in cleanup.
//!
//! # Example
//!
//! ```no_run
//! use pagekit::{BrowserKind, Session};
//!
//! # async fn example() -> pagekit::Result<()> {
//! let mut session = Session::builder(BrowserKind::Chrome)
//!     .start_url("https://example.com")
//!     .start()
//!     .await?;
//!
//! let page = session.page()?;
//! assert_eq!(page.get_title().await?, "Example Domain");
//!
//! session.close().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use thirtyfour::WebDriver;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::page::Page;

use super::browser::BrowserKind;
use super::builder::SessionBuilder;
use super::reaper::ProcessReaper;

// ============================================================================
// Session
// ============================================================================

/// An owned WebDriver session with teardown hygiene.
///
/// Created through [`Session::builder`]. Hand out [`Page`] facades with
/// [`Session::page`]; they share the underlying driver handle and stop
/// working once the session is closed.
pub struct Session {
    /// The driver handle, taken on close.
    driver: Option<WebDriver>,
    /// Which browser this session drives.
    kind: BrowserKind,
    /// Implicit wait applied at startup, restored by facade predicates.
    implicit_wait: Duration,
    /// Cleanup strategy for leftover driver processes.
    reaper: Box<dyn ProcessReaper>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("kind", &self.kind)
            .field("open", &self.driver.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session - Public API
// ============================================================================

impl Session {
    /// Creates a configuration builder for a session against `kind`.
    #[inline]
    #[must_use]
    pub fn builder(kind: BrowserKind) -> SessionBuilder {
        SessionBuilder::new(kind)
    }

    /// Returns a [`Page`] facade over this session's driver.
    ///
    /// # Errors
    ///
    /// Returns a config error if the session has been closed.
    pub fn page(&self) -> Result<Page> {
        let driver = self.driver()?;
        Ok(Page::new(driver.clone()).with_implicit_wait(self.implicit_wait))
    }

    /// Returns the underlying driver handle.
    ///
    /// # Errors
    ///
    /// Returns a config error if the session has been closed.
    pub fn driver(&self) -> Result<&WebDriver> {
        self.driver
            .as_ref()
            .ok_or_else(|| Error::invalid_config("session is already closed"))
    }

    /// Returns the browser this session drives.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> BrowserKind {
        self.kind
    }

    /// Returns `true` while the session has not been closed.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.driver.is_some()
    }

    /// Tears the session down: clears cookies, quits the driver session,
    /// then reaps leftover driver processes.
    ///
    /// Every step is best-effort; failures are logged at `warn` and
    /// swallowed. Calling this on an already closed session does nothing.
    pub async fn close(&mut self) {
        let Some(driver) = self.driver.take() else {
            debug!("Session already closed");
            return;
        };

        info!(browser = %self.kind, "Closing session");

        if let Err(err) = driver.delete_all_cookies().await {
            warn!(error = %err, "Failed to clear cookies during teardown");
        }
        if let Err(err) = driver.quit().await {
            warn!(error = %err, "Failed to quit driver session");
        }
        if let Err(err) = self.reaper.reap(self.kind).await {
            warn!(error = %err, "Failed to reap driver processes");
        }
    }
}

// ============================================================================
// Session - Internal API
// ============================================================================

impl Session {
    /// Assembles a started session. Called by [`SessionBuilder::start`].
    pub(crate) fn new(
        driver: WebDriver,
        kind: BrowserKind,
        implicit_wait: Duration,
        reaper: Box<dyn ProcessReaper>,
    ) -> Self {
        Self {
            driver: Some(driver),
            kind,
            implicit_wait,
            reaper,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.driver.is_some() {
            warn!(
                browser = %self.kind,
                "Session dropped while open; call close() to quit the driver session"
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
