//! Native and custom dropdown selection.

use thirtyfour::By;
use tracing::debug;

use crate::error::{Error, Result};
use crate::locator::Locator;

use super::Page;

// ============================================================================
// Page - Native Select Elements
// ============================================================================

impl Page {
    /// Selects the option whose visible text matches exactly.
    ///
    /// Waits for the select to be clickable first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OptionNotFound`] when no option carries the text.
    pub async fn select_by_text(&self, locator: &Locator, text: &str) -> Result<()> {
        debug!(locator = %locator, text = %text, "Selecting dropdown option");
        let select = self.wait_until_clickable(locator).await?;

        for option in select.find_all(By::XPath(".//option")).await? {
            if option.text().await?.trim() == text.trim() {
                if !option.is_selected().await? {
                    option.click().await?;
                }
                return Ok(());
            }
        }

        Err(Error::option_not_found(locator.as_str(), text))
    }

    /// Returns the visible text of the first selected option.
    pub async fn selected_text(&self, locator: &Locator) -> Result<String> {
        let select = self.find(locator).await?;

        for option in select.find_all(By::XPath(".//option")).await? {
            if option.is_selected().await? {
                return option.text().await.map_err(Into::into);
            }
        }

        Err(Error::element_not_found(format!(
            "selected option under {locator}"
        )))
    }

    /// Returns `true` when the select allows multiple selections.
    pub async fn is_multi_select(&self, locator: &Locator) -> Result<bool> {
        let select = self.find(locator).await?;
        Ok(select.attr("multiple").await?.is_some())
    }
}

// ============================================================================
// Page - Custom Dropdown Widgets
// ============================================================================

impl Page {
    /// Selects an item in a JavaScript-driven dropdown widget.
    ///
    /// Clicks the parent control, waits for the item list to render, scrolls
    /// the matching item into view, then clicks it.
    ///
    /// # Arguments
    ///
    /// * `parent` - The control that expands the dropdown
    /// * `items` - Locator matching every rendered item
    /// * `text` - Visible text of the item to pick
    ///
    /// # Errors
    ///
    /// Returns [`Error::OptionNotFound`] when no rendered item carries the
    /// text.
    pub async fn select_from_custom_dropdown(
        &self,
        parent: &Locator,
        items: &Locator,
        text: &str,
    ) -> Result<()> {
        debug!(
            parent = %parent,
            items = %items,
            text = %text,
            "Selecting custom dropdown item"
        );

        self.click(parent).await?;

        for item in self.wait_until_all_visible(items).await? {
            if item.text().await?.trim() == text.trim() {
                self.scroll_element_into_view(&item).await?;
                item.click().await?;
                return Ok(());
            }
        }

        Err(Error::option_not_found(items.as_str(), text))
    }
}
