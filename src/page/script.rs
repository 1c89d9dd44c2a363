//! JavaScript execution and script-backed helpers.
//!
//! The script escape hatch runs arbitrary code in the page; callers are
//! responsible for script safety. Scroll, highlight, and the readiness
//! probes are implemented on top of it.

use std::time::Duration;

use serde_json::Value;
use thirtyfour::WebElement;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::config;
use crate::error::{Error, Result};
use crate::locator::Locator;

use super::Page;

// ============================================================================
// Constants
// ============================================================================

/// How long [`Page::highlight`] keeps the flash border on screen.
const HIGHLIGHT_FLASH: Duration = Duration::from_millis(1000);

/// Style applied to an element while it is highlighted.
const HIGHLIGHT_STYLE: &str = "border: 2px solid red; border-style: dashed;";

// ============================================================================
// Page - Script Execution
// ============================================================================

impl Page {
    /// Executes JavaScript in the page and returns the result as JSON.
    pub async fn execute(&self, script: &str) -> Result<Value> {
        self.execute_with(script, vec![]).await
    }

    /// Executes JavaScript with arguments bound to `arguments[n]`.
    ///
    /// Pass element references via [`WebElement::to_json`].
    pub async fn execute_with(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        debug!(script_len = script.len(), args = args.len(), "Executing script");
        let ret = self.driver.execute(script, args).await?;
        Ok(ret.convert()?)
    }

    /// Navigates by assigning `window.location` instead of a driver command.
    pub async fn goto_via_js(&self, url: &str) -> Result<()> {
        debug!(url = %url, "Navigating via script");
        self.execute_with(
            "window.location = arguments[0];",
            vec![Value::String(url.to_string())],
        )
        .await?;
        Ok(())
    }
}

// ============================================================================
// Page - Scroll
// ============================================================================

impl Page {
    /// Scrolls to the top of the page.
    pub async fn scroll_to_top(&self) -> Result<()> {
        debug!("Scrolling to top");
        self.execute("window.scrollTo(0, 0);").await?;
        Ok(())
    }

    /// Scrolls to the bottom of the page.
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        debug!("Scrolling to bottom");
        self.execute("window.scrollBy(0, document.body.scrollHeight);")
            .await?;
        Ok(())
    }

    /// Scrolls the element into view.
    pub async fn scroll_into_view(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Scrolling element into view");
        let element = self.find(locator).await?;
        self.scroll_element_into_view(&element).await
    }

    /// Scrolls an already-located element into view.
    pub(crate) async fn scroll_element_into_view(&self, element: &WebElement) -> Result<()> {
        self.execute_with(
            "arguments[0].scrollIntoView(true);",
            vec![element.to_json()?],
        )
        .await?;
        Ok(())
    }
}

// ============================================================================
// Page - Script-backed Element Helpers
// ============================================================================

impl Page {
    /// Flashes a dashed red border around the element, then restores its
    /// original style.
    pub async fn highlight(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Highlighting element");
        let element = self.wait_until_visible(locator).await?;
        let original = element.attr("style").await?.unwrap_or_default();

        self.set_style(&element, HIGHLIGHT_STYLE).await?;
        sleep(HIGHLIGHT_FLASH).await;
        self.set_style(&element, &original).await?;
        Ok(())
    }

    /// Clicks the element from script, bypassing pointer simulation.
    pub async fn click_via_js(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Clicking element via script");
        let element = self.find(locator).await?;
        self.execute_with("arguments[0].click();", vec![element.to_json()?])
            .await?;
        Ok(())
    }

    /// Sets the element's `value` attribute from script.
    pub async fn set_value_via_js(&self, locator: &Locator, value: &str) -> Result<()> {
        debug!(locator = %locator, "Setting value via script");
        let element = self.find(locator).await?;
        self.execute_with(
            "arguments[0].setAttribute('value', arguments[1]);",
            vec![element.to_json()?, Value::String(value.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Removes an attribute from the element.
    pub async fn remove_attribute(&self, locator: &Locator, name: &str) -> Result<()> {
        debug!(locator = %locator, attribute = %name, "Removing attribute");
        let element = self.find(locator).await?;
        self.execute_with(
            "arguments[0].removeAttribute(arguments[1]);",
            vec![element.to_json()?, Value::String(name.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Returns the browser's native validation message for the element.
    pub async fn validation_message(&self, locator: &Locator) -> Result<String> {
        let element = self.find(locator).await?;
        let message = self
            .execute_with(
                "return arguments[0].validationMessage;",
                vec![element.to_json()?],
            )
            .await?;
        Ok(message.as_str().unwrap_or_default().to_string())
    }

    /// Returns `true` when the image element has fully loaded.
    pub async fn is_image_loaded(&self, locator: &Locator) -> Result<bool> {
        let element = self.find(locator).await?;
        let loaded = self
            .execute_with(
                "return arguments[0].complete && \
                 typeof arguments[0].naturalWidth != 'undefined' && \
                 arguments[0].naturalWidth > 0;",
                vec![element.to_json()?],
            )
            .await?;
        Ok(loaded.as_bool().unwrap_or(false))
    }

    /// Returns the rendered text of the whole document.
    pub async fn inner_text(&self) -> Result<String> {
        let text = self
            .execute("return document.documentElement.innerText;")
            .await?;
        Ok(text.as_str().unwrap_or_default().to_string())
    }

    async fn set_style(&self, element: &WebElement, style: &str) -> Result<()> {
        self.execute_with(
            "arguments[0].setAttribute('style', arguments[1]);",
            vec![element.to_json()?, Value::String(style.to_string())],
        )
        .await?;
        Ok(())
    }
}

// ============================================================================
// Page - Readiness Probes
// ============================================================================

impl Page {
    /// Waits until `document.readyState` is `complete`. Times out after
    /// [`config::SHORT_TIMEOUT`].
    pub async fn wait_for_document_ready(&self) -> Result<()> {
        self.wait_for_document_ready_timeout(config::SHORT_TIMEOUT)
            .await
    }

    /// Waits for document readiness with a custom timeout.
    pub async fn wait_for_document_ready_timeout(&self, timeout: Duration) -> Result<()> {
        debug!(timeout_ms = timeout.as_millis(), "Waiting for document ready");

        let deadline = Instant::now() + timeout;
        loop {
            let state = self.execute("return document.readyState;").await?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout("document ready", timeout));
            }
            sleep(config::POLL_INTERVAL).await;
        }
    }

    /// Waits until no jQuery request is in flight. Times out after
    /// [`config::SHORT_TIMEOUT`].
    ///
    /// Pages without jQuery count as idle.
    pub async fn wait_for_ajax_idle(&self) -> Result<()> {
        self.wait_for_ajax_idle_timeout(config::SHORT_TIMEOUT).await
    }

    /// Waits for jQuery idleness with a custom timeout.
    pub async fn wait_for_ajax_idle_timeout(&self, timeout: Duration) -> Result<()> {
        debug!(timeout_ms = timeout.as_millis(), "Waiting for ajax idle");

        let deadline = Instant::now() + timeout;
        loop {
            let idle = self
                .execute("return window.jQuery ? jQuery.active === 0 : true;")
                .await?;
            if idle.as_bool().unwrap_or(false) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout("ajax idle", timeout));
            }
            sleep(config::POLL_INTERVAL).await;
        }
    }
}
