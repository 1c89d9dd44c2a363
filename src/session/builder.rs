//! Builder pattern for session configuration.
//!
//! Provides a fluent API for configuring and starting [`Session`]s.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use pagekit::{BrowserKind, Session};
//!
//! # async fn example() -> pagekit::Result<()> {
//! let session = Session::builder(BrowserKind::Firefox)
//!     .server_url("http://localhost:4444")
//!     .start_url("https://example.com/login")
//!     .headless()
//!     .implicit_wait(Duration::from_secs(10))
//!     .start()
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use thirtyfour::WebDriver;
use tracing::{debug, info};
use url::Url;

use crate::config;
use crate::error::{Error, Result};

use super::browser::BrowserKind;
use super::core::Session;
use super::reaper::{ProcessReaper, SystemReaper};

// ============================================================================
// SessionBuilder
// ============================================================================

/// Builder for configuring a [`Session`].
///
/// Use [`Session::builder`] to create one. Unset options fall back to the
/// browser's defaults: the kind's own WebDriver server address, a
/// maximized window, [`config::IMPLICIT_WAIT`], no start page, and the
/// [`SystemReaper`].
pub struct SessionBuilder {
    /// Browser to drive.
    kind: BrowserKind,
    /// WebDriver server address override.
    server_url: Option<String>,
    /// Page opened once the session is up.
    start_url: Option<String>,
    /// Whether to launch the browser headless.
    headless: bool,
    /// Implicit wait applied at startup.
    implicit_wait: Duration,
    /// Whether to maximize the window at startup.
    maximize: bool,
    /// Process cleanup override.
    reaper: Option<Box<dyn ProcessReaper>>,
}

// ============================================================================
// SessionBuilder Implementation
// ============================================================================

impl SessionBuilder {
    /// Creates a builder with the defaults for `kind`.
    #[inline]
    #[must_use]
    pub fn new(kind: BrowserKind) -> Self {
        Self {
            kind,
            server_url: None,
            start_url: None,
            headless: false,
            implicit_wait: config::IMPLICIT_WAIT,
            maximize: true,
            reaper: None,
        }
    }

    /// Overrides the WebDriver server address.
    #[inline]
    #[must_use]
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Sets the page to open once the session is up.
    #[inline]
    #[must_use]
    pub fn start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = Some(url.into());
        self
    }

    /// Launches the browser without a visible window.
    #[inline]
    #[must_use]
    pub fn headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Sets the implicit wait applied at startup.
    #[inline]
    #[must_use]
    pub fn implicit_wait(mut self, timeout: Duration) -> Self {
        self.implicit_wait = timeout;
        self
    }

    /// Controls whether the window is maximized at startup. Defaults to
    /// `true`; headless CI runs may want this off.
    #[inline]
    #[must_use]
    pub fn maximize(mut self, enabled: bool) -> Self {
        self.maximize = enabled;
        self
    }

    /// Replaces the process reaper invoked during teardown.
    ///
    /// Useful when a shared driver service must outlive the session.
    #[inline]
    #[must_use]
    pub fn reaper(mut self, reaper: impl ProcessReaper + 'static) -> Self {
        self.reaper = Some(Box::new(reaper));
        self
    }

    /// Starts the session: creates the driver session, applies the implicit
    /// wait and window defaults, then opens the start page if one is set.
    ///
    /// # Errors
    ///
    /// - Config error if the server or start URL does not parse
    /// - Driver error if the WebDriver server is unreachable or refuses
    ///   the session
    pub async fn start(self) -> Result<Session> {
        let server_url = self.validate_server_url()?;
        let start_url = self.validate_start_url()?;
        let capabilities = self.kind.capabilities(self.headless)?;

        info!(
            browser = %self.kind,
            server_url = %server_url,
            headless = self.headless,
            "Starting session"
        );
        let driver = WebDriver::new(&server_url, capabilities).await?;

        if let Err(err) = self.apply_startup(&driver, start_url.as_deref()).await {
            // Do not leak the half-configured session.
            let _ = driver.quit().await;
            return Err(err);
        }

        info!(browser = %self.kind, "Session started");
        Ok(Session::new(
            driver,
            self.kind,
            self.implicit_wait,
            self.reaper.unwrap_or_else(|| Box::new(SystemReaper)),
        ))
    }

    /// Applies implicit wait, window state, and the start page.
    async fn apply_startup(&self, driver: &WebDriver, start_url: Option<&str>) -> Result<()> {
        driver.set_implicit_wait_timeout(self.implicit_wait).await?;
        debug!(
            implicit_wait_ms = self.implicit_wait.as_millis(),
            "Applied implicit wait"
        );

        if self.maximize {
            driver.maximize_window().await?;
        }
        if let Some(url) = start_url {
            debug!(url = %url, "Opening start page");
            driver.goto(url).await?;
        }
        Ok(())
    }
}

// ============================================================================
// Validation
// ============================================================================

impl SessionBuilder {
    /// Resolves the server address, validating any override.
    fn validate_server_url(&self) -> Result<String> {
        match &self.server_url {
            Some(raw) => {
                Url::parse(raw).map_err(|err| {
                    Error::invalid_config(format!("invalid server URL '{raw}': {err}"))
                })?;
                Ok(raw.clone())
            }
            None => Ok(self.kind.default_server_url().to_string()),
        }
    }

    /// Validates the start page, when one is configured.
    fn validate_start_url(&self) -> Result<Option<String>> {
        match &self.start_url {
            Some(raw) => {
                Url::parse(raw).map_err(|err| {
                    Error::invalid_config(format!("invalid start URL '{raw}': {err}"))
                })?;
                Ok(Some(raw.clone()))
            }
            None => Ok(None),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
