//! Point-in-time element state predicates.
//!
//! All predicates share one policy: element absence (no match, or the
//! element going stale mid-check) folds into the boolean, while any other
//! driver failure propagates. None of them wait beyond the session's
//! implicit wait.

use thirtyfour::WebElement;
use tracing::debug;

use crate::config;
use crate::error::{self, Result};
use crate::locator::Locator;

use super::{Page, to_by};

impl Page {
    /// Returns `true` when the element is present and displayed.
    pub async fn is_displayed(&self, locator: &Locator) -> Result<bool> {
        match self.lookup(locator).await? {
            Some(element) => absence_is(false, element.is_displayed().await),
            None => Ok(false),
        }
    }

    /// Returns `true` when no matching element is displayed.
    ///
    /// Temporarily shrinks the session implicit wait to
    /// [`config::SHORT_TIMEOUT`] so an absent element answers quickly, then
    /// restores the configured implicit wait.
    pub async fn is_not_displayed(&self, locator: &Locator) -> Result<bool> {
        debug!(locator = %locator, "Checking element undisplayed");
        self.driver
            .set_implicit_wait_timeout(config::SHORT_TIMEOUT)
            .await?;

        let outcome = self.currently_invisible(locator).await;

        self.driver
            .set_implicit_wait_timeout(self.implicit_wait)
            .await?;
        outcome
    }

    /// Returns `true` when the element is present and enabled.
    pub async fn is_enabled(&self, locator: &Locator) -> Result<bool> {
        match self.lookup(locator).await? {
            Some(element) => absence_is(false, element.is_enabled().await),
            None => Ok(false),
        }
    }

    /// Returns `true` when the element is present and selected.
    pub async fn is_selected(&self, locator: &Locator) -> Result<bool> {
        match self.lookup(locator).await? {
            Some(element) => absence_is(false, element.is_selected().await),
            None => Ok(false),
        }
    }

    /// Finds the first match, folding absence into `None`.
    async fn lookup(&self, locator: &Locator) -> Result<Option<WebElement>> {
        match self.driver.find(to_by(locator)?).await {
            Ok(element) => Ok(Some(element)),
            Err(err) if error::driver_reports_absence(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Folds an absence error into `fallback`, propagating anything else.
fn absence_is(
    fallback: bool,
    outcome: thirtyfour::error::WebDriverResult<bool>,
) -> Result<bool> {
    match outcome {
        Ok(state) => Ok(state),
        Err(err) if error::driver_reports_absence(&err) => Ok(fallback),
        Err(err) => Err(err.into()),
    }
}
