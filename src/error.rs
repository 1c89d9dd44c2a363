//! Error types for pagekit.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```no_run
//! use pagekit::{Locator, Page, Result};
//!
//! async fn example(page: &Page) -> Result<()> {
//!     let field = Locator::xpath("//*[@id='{}']").with(["username"])?;
//!     page.type_text(&field, "quality").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Locator | [`Error::LocatorFormat`] |
//! | Element | [`Error::ElementNotFound`], [`Error::OptionNotFound`] |
//! | Wait | [`Error::WaitTimeout`] |
//! | Configuration | [`Error::UnsupportedBrowser`], [`Error::InvalidConfig`] |
//! | Driver | [`Error::Driver`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;
use std::time::Duration;

use thirtyfour::error::WebDriverError;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Locator Errors
    // ========================================================================
    /// Locator template and arguments do not line up.
    ///
    /// Returned when placeholder substitution fails, or when an unresolved
    /// template is handed to a facade operation.
    #[error("Locator format error in `{template}`: {message}")]
    LocatorFormat {
        /// The offending locator template.
        template: String,
        /// Description of the mismatch.
        message: String,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// Locator matched zero elements.
    ///
    /// Returned by single-element lookup; list lookups return an empty
    /// vec instead.
    #[error("Element not found: locator={locator}")]
    ElementNotFound {
        /// Resolved locator used for the query.
        locator: String,
    },

    /// Dropdown has no option with the requested visible text.
    ///
    /// Returned by native and custom dropdown selection.
    #[error("Option not found: text={text}, locator={locator}")]
    OptionNotFound {
        /// Resolved locator of the dropdown.
        locator: String,
        /// Visible text that was requested.
        text: String,
    },

    // ========================================================================
    // Wait Errors
    // ========================================================================
    /// Explicit wait expired before its predicate held.
    ///
    /// Returned by every `wait_until_*` operation.
    #[error("Timeout after {timeout_ms}ms waiting for {condition}")]
    WaitTimeout {
        /// Description of the awaited condition.
        condition: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Browser name does not map to a known kind.
    ///
    /// Returned when parsing a browser name from configuration.
    #[error("Unsupported browser: {name}")]
    UnsupportedBrowser {
        /// The unrecognized browser name.
        name: String,
    },

    /// Session configuration is invalid.
    ///
    /// Returned when builder validation fails.
    #[error("Configuration error: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Driver Errors
    // ========================================================================
    /// Error surfaced by the underlying WebDriver client.
    #[error("WebDriver error: {0}")]
    Driver(#[from] WebDriverError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a locator format error.
    #[inline]
    pub fn locator_format(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LocatorFormat {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            locator: locator.into(),
        }
    }

    /// Creates an option not found error.
    #[inline]
    pub fn option_not_found(locator: impl Into<String>, text: impl Into<String>) -> Self {
        Self::OptionNotFound {
            locator: locator.into(),
            text: text.into(),
        }
    }

    /// Creates a wait timeout error.
    #[inline]
    pub fn wait_timeout(condition: impl Into<String>, timeout: Duration) -> Self {
        Self::WaitTimeout {
            condition: condition.into(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Creates an unsupported browser error.
    #[inline]
    pub fn unsupported_browser(name: impl Into<String>) -> Self {
        Self::UnsupportedBrowser { name: name.into() }
    }

    /// Creates an invalid configuration error.
    #[inline]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a locator format error.
    #[inline]
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::LocatorFormat { .. })
    }

    /// Returns `true` if this is an element or option lookup miss.
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::OptionNotFound { .. }
        )
    }

    /// Returns `true` if this is an expired explicit wait.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedBrowser { .. } | Self::InvalidConfig { .. }
        )
    }

    /// Returns `true` if this error came from the WebDriver client.
    #[inline]
    #[must_use]
    pub fn is_driver_error(&self) -> bool {
        matches!(self, Self::Driver(_))
    }
}

// ============================================================================
// Driver Error Classification
// ============================================================================

/// Returns `true` when the driver reports that the element is simply absent
/// (missing or detached), as opposed to a broken session or transport.
///
/// Point-in-time predicates fold these into a boolean; everything else
/// propagates.
pub(crate) fn driver_reports_absence(err: &WebDriverError) -> bool {
    matches!(
        err,
        WebDriverError::NoSuchElement(_) | WebDriverError::StaleElementReference(_)
    )
}

/// Returns `true` when a driver error from a poll means the wait expired
/// rather than the session failing.
pub(crate) fn driver_reports_wait_expiry(err: &WebDriverError) -> bool {
    matches!(
        err,
        WebDriverError::NoSuchElement(_)
            | WebDriverError::StaleElementReference(_)
            | WebDriverError::Timeout(_)
    )
}

// ============================================================================
// Tests
// ============================================================================
