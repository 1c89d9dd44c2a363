//! Element search, state reads, and explicit waits.

use std::time::Duration;

use thirtyfour::WebElement;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::ElementQueryable;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::config;
use crate::error::{self, Error, Result};
use crate::locator::Locator;

use super::{Page, to_by};

// ============================================================================
// Page - Element Search
// ============================================================================

impl Page {
    /// Finds a single element, without waiting beyond the session's implicit
    /// wait.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] when the locator matches nothing.
    pub async fn find(&self, locator: &Locator) -> Result<WebElement> {
        match self.driver.find(to_by(locator)?).await {
            Ok(element) => Ok(element),
            Err(WebDriverError::NoSuchElement(_)) => {
                Err(Error::element_not_found(locator.as_str()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Finds all matching elements.
    ///
    /// Zero matches is an empty vec, never an error.
    pub async fn find_all(&self, locator: &Locator) -> Result<Vec<WebElement>> {
        self.driver
            .find_all(to_by(locator)?)
            .await
            .map_err(Into::into)
    }

    /// Returns the number of matching elements.
    pub async fn count(&self, locator: &Locator) -> Result<usize> {
        Ok(self.find_all(locator).await?.len())
    }
}

// ============================================================================
// Page - Element State
// ============================================================================

impl Page {
    /// Returns the visible text of the first matching element.
    pub async fn text(&self, locator: &Locator) -> Result<String> {
        self.find(locator).await?.text().await.map_err(Into::into)
    }

    /// Returns an attribute of the first matching element, if present.
    pub async fn attr(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        self.find(locator).await?.attr(name).await.map_err(Into::into)
    }

    /// Returns a computed CSS value of the first matching element.
    pub async fn css_value(&self, locator: &Locator, name: &str) -> Result<String> {
        self.find(locator)
            .await?
            .css_value(name)
            .await
            .map_err(Into::into)
    }
}

// ============================================================================
// Page - Explicit Waits
// ============================================================================

impl Page {
    /// Waits until the element is displayed. Times out after
    /// [`config::SHORT_TIMEOUT`].
    pub async fn wait_until_visible(&self, locator: &Locator) -> Result<WebElement> {
        self.wait_until_visible_timeout(locator, config::SHORT_TIMEOUT)
            .await
    }

    /// Waits until the element is displayed, with a custom timeout.
    pub async fn wait_until_visible_timeout(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<WebElement> {
        debug!(
            locator = %locator,
            timeout_ms = timeout.as_millis(),
            "Waiting for element visible"
        );

        let query = self
            .driver
            .query(to_by(locator)?)
            .wait(timeout, config::POLL_INTERVAL)
            .and_displayed();

        match query.first().await {
            Ok(element) => Ok(element),
            Err(err) if error::driver_reports_wait_expiry(&err) => Err(Error::wait_timeout(
                format!("element visible: {locator}"),
                timeout,
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Waits until the element is displayed and enabled. Times out after
    /// [`config::SHORT_TIMEOUT`].
    pub async fn wait_until_clickable(&self, locator: &Locator) -> Result<WebElement> {
        self.wait_until_clickable_timeout(locator, config::SHORT_TIMEOUT)
            .await
    }

    /// Waits until the element is displayed and enabled, with a custom
    /// timeout.
    pub async fn wait_until_clickable_timeout(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<WebElement> {
        debug!(
            locator = %locator,
            timeout_ms = timeout.as_millis(),
            "Waiting for element clickable"
        );

        let query = self
            .driver
            .query(to_by(locator)?)
            .wait(timeout, config::POLL_INTERVAL)
            .and_clickable();

        match query.first().await {
            Ok(element) => Ok(element),
            Err(err) if error::driver_reports_wait_expiry(&err) => Err(Error::wait_timeout(
                format!("element clickable: {locator}"),
                timeout,
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Waits until no matching element is displayed. Times out after
    /// [`config::SHORT_TIMEOUT`].
    ///
    /// A locator that matches nothing, or an element that goes stale during
    /// the check, counts as invisible.
    pub async fn wait_until_invisible(&self, locator: &Locator) -> Result<()> {
        self.wait_until_invisible_timeout(locator, config::SHORT_TIMEOUT)
            .await
    }

    /// Waits until no matching element is displayed, with a custom timeout.
    pub async fn wait_until_invisible_timeout(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<()> {
        debug!(
            locator = %locator,
            timeout_ms = timeout.as_millis(),
            "Waiting for element invisible"
        );

        let deadline = Instant::now() + timeout;
        loop {
            if self.currently_invisible(locator).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout(
                    format!("element invisible: {locator}"),
                    timeout,
                ));
            }
            sleep(config::POLL_INTERVAL).await;
        }
    }

    /// Waits until every matching element is displayed and there is at least
    /// one match. Times out after [`config::SHORT_TIMEOUT`].
    pub async fn wait_until_all_visible(&self, locator: &Locator) -> Result<Vec<WebElement>> {
        self.wait_until_all_visible_timeout(locator, config::SHORT_TIMEOUT)
            .await
    }

    /// Waits until every matching element is displayed, with a custom
    /// timeout.
    pub async fn wait_until_all_visible_timeout(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<WebElement>> {
        debug!(
            locator = %locator,
            timeout_ms = timeout.as_millis(),
            "Waiting for all elements visible"
        );

        let deadline = Instant::now() + timeout;
        loop {
            let elements = self.find_all(locator).await?;
            if !elements.is_empty() && all_displayed(&elements).await? {
                return Ok(elements);
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout(
                    format!("all elements visible: {locator}"),
                    timeout,
                ));
            }
            sleep(config::POLL_INTERVAL).await;
        }
    }

    /// Point-in-time invisibility check over every matching element.
    ///
    /// Staleness mid-check means the element left the DOM, which satisfies
    /// invisibility.
    pub(crate) async fn currently_invisible(&self, locator: &Locator) -> Result<bool> {
        let elements = self.find_all(locator).await?;
        for element in &elements {
            match element.is_displayed().await {
                Ok(true) => return Ok(false),
                Ok(false) => {}
                Err(err) if error::driver_reports_absence(&err) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(true)
    }
}

/// Returns `true` when every element is currently displayed.
///
/// Staleness mid-scan counts as not displayed; the caller's next poll
/// re-resolves the set.
async fn all_displayed(elements: &[WebElement]) -> Result<bool> {
    for element in elements {
        match element.is_displayed().await {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(err) if error::driver_reports_absence(&err) => return Ok(false),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(true)
}
