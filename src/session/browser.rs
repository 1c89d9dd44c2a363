//! Browser selection and per-browser defaults.
//!
//! [`BrowserKind`] names the browsers this crate can drive. Each kind knows
//! its WebDriver server's default address, the driver binary that serves it,
//! and how to build its capability set.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use thirtyfour::{Capabilities, ChromiumLikeCapabilities, DesiredCapabilities};

use crate::error::{Error, Result};

// ============================================================================
// BrowserKind
// ============================================================================

/// A browser supported by the session layer.
///
/// Parses case-insensitively from common names, including the `chromium`
/// and `msedge` aliases:
///
/// ```
/// use pagekit::BrowserKind;
///
/// let kind: BrowserKind = "Chrome".parse().unwrap();
/// assert_eq!(kind, BrowserKind::Chrome);
///
/// let kind: BrowserKind = "msedge".parse().unwrap();
/// assert_eq!(kind, BrowserKind::Edge);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    /// Google Chrome or Chromium, served by chromedriver.
    Chrome,
    /// Mozilla Firefox, served by geckodriver.
    Firefox,
    /// Microsoft Edge, served by msedgedriver.
    Edge,
}

// ============================================================================
// BrowserKind - Defaults
// ============================================================================

impl BrowserKind {
    /// Returns the default address of the browser's WebDriver server.
    ///
    /// geckodriver listens on 4444; chromedriver and msedgedriver listen
    /// on 9515.
    #[inline]
    #[must_use]
    pub fn default_server_url(&self) -> &'static str {
        match self {
            Self::Firefox => "http://localhost:4444",
            Self::Chrome | Self::Edge => "http://localhost:9515",
        }
    }

    /// Returns the process name of the browser's driver binary.
    #[inline]
    #[must_use]
    pub fn driver_process(&self) -> &'static str {
        match self {
            Self::Chrome => "chromedriver",
            Self::Firefox => "geckodriver",
            Self::Edge => "msedgedriver",
        }
    }

    /// Builds the capability set sent when the session is created.
    pub fn capabilities(&self, headless: bool) -> Result<Capabilities> {
        match self {
            Self::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if headless {
                    caps.set_headless()?;
                }
                Ok(caps.into())
            }
            Self::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if headless {
                    caps.set_headless()?;
                }
                Ok(caps.into())
            }
            Self::Edge => {
                // msedgedriver takes the Chromium switches under its own
                // vendor key.
                let mut caps = DesiredCapabilities::edge();
                if headless {
                    caps.set_headless()?;
                }
                Ok(caps.into())
            }
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
        };
        f.write_str(name)
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chrome" | "chromium" => Ok(Self::Chrome),
            "firefox" => Ok(Self::Firefox),
            "edge" | "msedge" => Ok(Self::Edge),
            _ => Err(Error::unsupported_browser(s)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
