//! Leftover driver process cleanup.
//!
//! WebDriver sessions that crash mid-run can leave the driver binary
//! (chromedriver, geckodriver, msedgedriver) behind. [`Session::close`]
//! hands the browser kind to a [`ProcessReaper`] so test suites can sweep
//! those up; [`SystemReaper`] does it with the platform's kill command.
//!
//! [`Session::close`]: crate::Session::close

// ============================================================================
// Imports
// ============================================================================

use std::io;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::browser::BrowserKind;

// ============================================================================
// ProcessReaper
// ============================================================================

/// Strategy for killing leftover driver processes after teardown.
///
/// Implementations must be best-effort: a reaper that finds nothing to kill
/// should return `Ok(())`, and any failure it does report is logged and
/// swallowed by the session.
#[async_trait]
pub trait ProcessReaper: Send + Sync {
    /// Kills any driver processes belonging to `kind`.
    async fn reap(&self, kind: BrowserKind) -> io::Result<()>;
}

// ============================================================================
// SystemReaper
// ============================================================================

/// Reaps driver processes with the platform's kill command.
///
/// Uses `taskkill /F /FI "IMAGENAME eq <driver>*"` on Windows and
/// `pkill <driver>` everywhere else. A kill command that matches no process
/// is treated as success.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemReaper;

#[async_trait]
impl ProcessReaper for SystemReaper {
    async fn reap(&self, kind: BrowserKind) -> io::Result<()> {
        let process = kind.driver_process();
        let (program, args) = kill_command(std::env::consts::OS, process);

        debug!(program, process, "Reaping driver processes");
        let output = Command::new(program).args(&args).output().await?;

        // pkill exits nonzero when nothing matched; that is not a failure.
        debug!(
            process,
            status = output.status.code().unwrap_or(-1),
            "Kill command finished"
        );
        Ok(())
    }
}

/// Builds the kill command for a driver process name.
fn kill_command(os: &str, process: &str) -> (&'static str, Vec<String>) {
    if os == "windows" {
        (
            "taskkill",
            vec![
                "/F".to_string(),
                "/FI".to_string(),
                format!("IMAGENAME eq {process}*"),
            ],
        )
    } else {
        ("pkill", vec![process.to_string()])
    }
}

// ============================================================================
// Tests
// ============================================================================
