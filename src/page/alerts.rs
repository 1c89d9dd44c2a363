//! JavaScript alert, confirm, and prompt handling.
//!
//! [`Page::wait_for_alert`] polls until a dialog is present and returns an
//! [`Alert`] handle scoped to it. Driver commands sent after the dialog is
//! gone fail with the driver's own error.

use std::time::Duration;

use thirtyfour::WebDriver;
use thirtyfour::error::WebDriverError;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::config;
use crate::error::{Error, Result};

use super::Page;

// ============================================================================
// Page - Alerts
// ============================================================================

impl Page {
    /// Waits for a dialog to appear. Times out after
    /// [`config::SHORT_TIMEOUT`].
    pub async fn wait_for_alert(&self) -> Result<Alert> {
        self.wait_for_alert_timeout(config::SHORT_TIMEOUT).await
    }

    /// Waits for a dialog with a custom timeout.
    pub async fn wait_for_alert_timeout(&self, timeout: Duration) -> Result<Alert> {
        debug!(timeout_ms = timeout.as_millis(), "Waiting for alert");

        let deadline = Instant::now() + timeout;
        loop {
            match self.driver.get_alert_text().await {
                Ok(_) => {
                    return Ok(Alert {
                        driver: self.driver.clone(),
                    });
                }
                Err(WebDriverError::NoSuchAlert(_)) => {}
                Err(err) => return Err(err.into()),
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout("alert present", timeout));
            }
            sleep(config::POLL_INTERVAL).await;
        }
    }
}

// ============================================================================
// Alert
// ============================================================================

/// A handle to the currently open dialog.
#[derive(Debug, Clone)]
pub struct Alert {
    driver: WebDriver,
}

impl Alert {
    /// Accepts the dialog.
    pub async fn accept(&self) -> Result<()> {
        debug!("Accepting alert");
        self.driver.accept_alert().await?;
        Ok(())
    }

    /// Dismisses the dialog.
    pub async fn dismiss(&self) -> Result<()> {
        debug!("Dismissing alert");
        self.driver.dismiss_alert().await?;
        Ok(())
    }

    /// Returns the dialog's message text.
    pub async fn text(&self) -> Result<String> {
        Ok(self.driver.get_alert_text().await?)
    }

    /// Types into the dialog's prompt field.
    pub async fn send_keys(&self, text: &str) -> Result<()> {
        debug!("Typing into alert prompt");
        self.driver.send_alert_text(text).await?;
        Ok(())
    }
}
