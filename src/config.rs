//! Fixed configuration: timeouts, filesystem paths, application URLs.
//!
//! These values parameterize every explicit wait and the session lifecycle.
//! They are process-wide constants, immutable after initialization.
//!
//! | Constant | Value | Used by |
//! |----------|-------|---------|
//! | [`SHORT_TIMEOUT`] | 5 s | default for all `wait_until_*` operations |
//! | [`LONG_TIMEOUT`] | 30 s | opt-in for slow pages |
//! | [`IMPLICIT_WAIT`] | 15 s | session-wide implicit wait at startup |
//! | [`POLL_INTERVAL`] | 500 ms | poll cadence inside explicit waits |

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::{Error, Result};

// ============================================================================
// Timeouts
// ============================================================================

/// Default timeout for explicit waits (5 seconds).
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);

/// Extended timeout for slow conditions (30 seconds).
pub const LONG_TIMEOUT: Duration = Duration::from_secs(30);

/// Implicit wait applied to the driver session at startup (15 seconds).
pub const IMPLICIT_WAIT: Duration = Duration::from_secs(15);

/// Poll cadence for explicit waits (500 milliseconds).
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

// ============================================================================
// Filesystem Paths
// ============================================================================

static PROJECT_ROOT: LazyLock<PathBuf> =
    LazyLock::new(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

/// Returns the project root, resolved from the working directory at startup.
#[must_use]
pub fn project_root() -> &'static Path {
    &PROJECT_ROOT
}

/// Returns the folder holding files for upload scenarios.
#[must_use]
pub fn upload_dir() -> PathBuf {
    PROJECT_ROOT.join("uploadFiles")
}

/// Returns the folder browser downloads are expected to land in.
#[must_use]
pub fn download_dir() -> PathBuf {
    PROJECT_ROOT.join("downloadFiles")
}

// ============================================================================
// Application Environments
// ============================================================================

/// Deployment environment a test run targets.
///
/// Base URLs are read from the environment so suites can point the same
/// tests at different deployments without code changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    /// Development deployment (`PAGEKIT_DEV_URL`).
    Dev,
    /// Staging deployment (`PAGEKIT_STAGING_URL`).
    Staging,
    /// Testing deployment (`PAGEKIT_TESTING_URL`).
    Testing,
}

impl AppEnv {
    /// Returns the environment variable carrying this environment's base URL.
    #[must_use]
    pub fn url_var(self) -> &'static str {
        match self {
            Self::Dev => "PAGEKIT_DEV_URL",
            Self::Staging => "PAGEKIT_STAGING_URL",
            Self::Testing => "PAGEKIT_TESTING_URL",
        }
    }

    /// Returns the configured base URL for this environment, if set.
    #[must_use]
    pub fn base_url(self) -> Option<String> {
        env::var(self.url_var()).ok().filter(|url| !url.is_empty())
    }
}

impl FromStr for AppEnv {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "staging" => Ok(Self::Staging),
            "testing" | "test" => Ok(Self::Testing),
            other => Err(Error::invalid_config(format!(
                "unknown application environment: {other}"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
