//! State-changing element actions.
//!
//! Every action here follows the wait-then-act convention: an explicit wait
//! for the required element state, then the driver action on the element the
//! wait returned. A failed wait aborts the chain with the wait's error.

use thirtyfour::Key;
use tracing::debug;

use crate::config;
use crate::error::Result;
use crate::locator::Locator;

use super::Page;

// ============================================================================
// Page - Input Actions
// ============================================================================

impl Page {
    /// Waits for the element to be clickable, then clicks it.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Clicking element");
        let element = self.wait_until_clickable(locator).await?;
        element.click().await?;
        Ok(())
    }

    /// Waits for the element to be visible, clears it, then types into it.
    pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<()> {
        debug!(locator = %locator, text_len = text.len(), "Typing into element");
        let element = self.wait_until_visible(locator).await?;
        element.clear().await?;
        element.send_keys(text).await?;
        Ok(())
    }

    /// Waits for the element to be visible, then sends a single key to it.
    pub async fn press_key(&self, locator: &Locator, key: Key) -> Result<()> {
        debug!(locator = %locator, "Pressing key on element");
        let element = self.wait_until_visible(locator).await?;
        element.send_keys(key + "").await?;
        Ok(())
    }

    /// Ensures a checkbox or radio ends up selected.
    ///
    /// Clicks only when the element is not already selected.
    pub async fn check(&self, locator: &Locator) -> Result<()> {
        let element = self.wait_until_clickable(locator).await?;
        if !element.is_selected().await? {
            debug!(locator = %locator, "Checking element");
            element.click().await?;
        }
        Ok(())
    }

    /// Ensures a checkbox ends up deselected.
    ///
    /// Clicks only when the element is currently selected.
    pub async fn uncheck(&self, locator: &Locator) -> Result<()> {
        let element = self.wait_until_clickable(locator).await?;
        if element.is_selected().await? {
            debug!(locator = %locator, "Unchecking element");
            element.click().await?;
        }
        Ok(())
    }

    /// Sends file paths from [`config::upload_dir`] to a file input.
    ///
    /// File inputs are frequently hidden, so this skips the visibility wait
    /// and types directly into the first match.
    pub async fn upload_files(&self, locator: &Locator, file_names: &[&str]) -> Result<()> {
        debug!(locator = %locator, files = file_names.len(), "Uploading files");
        let paths: Vec<String> = file_names
            .iter()
            .map(|name| config::upload_dir().join(name).to_string_lossy().into_owned())
            .collect();

        let element = self.find(locator).await?;
        element.send_keys(paths.join("\n")).await?;
        Ok(())
    }
}

// ============================================================================
// Page - Mouse Gestures
// ============================================================================

impl Page {
    /// Moves the pointer to the center of the element.
    pub async fn hover(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Hovering over element");
        let element = self.wait_until_visible(locator).await?;
        self.driver
            .action_chain()
            .move_to_element_center(&element)
            .perform()
            .await?;
        Ok(())
    }

    /// Double-clicks the element.
    pub async fn double_click(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Double-clicking element");
        let element = self.wait_until_clickable(locator).await?;
        self.driver
            .action_chain()
            .double_click_element(&element)
            .perform()
            .await?;
        Ok(())
    }

    /// Right-clicks the element.
    pub async fn right_click(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Right-clicking element");
        let element = self.wait_until_clickable(locator).await?;
        self.driver
            .action_chain()
            .context_click_element(&element)
            .perform()
            .await?;
        Ok(())
    }

    /// Drags the source element onto the target element.
    pub async fn drag_and_drop(&self, source: &Locator, target: &Locator) -> Result<()> {
        debug!(source = %source, target = %target, "Dragging element");
        let source_element = self.wait_until_visible(source).await?;
        let target_element = self.wait_until_visible(target).await?;
        self.driver
            .action_chain()
            .drag_and_drop_element(&source_element, &target_element)
            .perform()
            .await?;
        Ok(())
    }
}
