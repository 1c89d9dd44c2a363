//! Page interaction facade.
//!
//! A [`Page`] is the single point of access for element queries and actions
//! against one driver session. Every operation resolves its [`Locator`]
//! against the current page state; element handles are never cached across
//! calls. State-changing operations follow the wait-then-act convention:
//! an explicit wait for the required element state, then the action.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `navigation` | URL navigation, history, page metadata |
//! | `elements` | Element search, state reads, explicit waits |
//! | `actions` | Clicks, input, checkboxes, mouse gestures |
//! | `dropdown` | Native and custom dropdown selection |
//! | `predicates` | Point-in-time displayed/enabled/selected checks |
//! | `script` | JavaScript escape hatch, scroll, readiness probes |
//! | `windows` | Window focus, frames, window management |
//! | `storage` | Cookies |
//! | `alerts` | Alert waiting and interaction |
//!
//! # Example
//!
//! ```no_run
//! use pagekit::{Locator, Page, Result};
//!
//! const DYNAMIC_FIELD: Locator = Locator::xpath("//*[@id='{}']");
//! const LOGIN_BUTTON: Locator = Locator::xpath("//button[text()='Log In']");
//! const WELCOME_BANNER: Locator = Locator::xpath("//div[@class='welcome']");
//!
//! async fn log_in(page: &Page) -> Result<()> {
//!     page.type_text(&DYNAMIC_FIELD.with(["username"])?, "quality").await?;
//!     page.type_text(&DYNAMIC_FIELD.with(["password"])?, "secret").await?;
//!     page.click(&LOGIN_BUTTON).await?;
//!     page.wait_until_visible(&WELCOME_BANNER).await?;
//!     Ok(())
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod actions;
mod alerts;
mod dropdown;
mod elements;
mod navigation;
mod predicates;
mod script;
mod storage;
mod windows;

// ============================================================================
// Re-exports
// ============================================================================

pub use alerts::Alert;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use thirtyfour::{By, WebDriver};

use crate::config;
use crate::error::Result;
use crate::locator::Locator;

// ============================================================================
// Helpers
// ============================================================================

/// Converts a resolved locator into a driver query target.
pub(crate) fn to_by(locator: &Locator) -> Result<By> {
    Ok(By::XPath(locator.expr()?))
}

// ============================================================================
// Page
// ============================================================================

/// Interaction facade over one WebDriver session.
///
/// Cloning a `Page` clones the underlying session handle; both values talk
/// to the same browser.
#[derive(Clone)]
pub struct Page {
    pub(crate) driver: WebDriver,
    pub(crate) implicit_wait: Duration,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("implicit_wait", &self.implicit_wait)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Creates a facade over an existing driver session.
    ///
    /// Assumes the session-wide implicit wait is [`config::IMPLICIT_WAIT`];
    /// use [`Page::with_implicit_wait`] when the session was configured
    /// differently.
    #[must_use]
    pub fn new(driver: WebDriver) -> Self {
        Self {
            driver,
            implicit_wait: config::IMPLICIT_WAIT,
        }
    }

    /// Sets the implicit wait this facade restores after temporarily
    /// overriding it.
    #[must_use]
    pub fn with_implicit_wait(mut self, implicit_wait: Duration) -> Self {
        self.implicit_wait = implicit_wait;
        self
    }

    /// Returns the underlying driver handle.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }
}
