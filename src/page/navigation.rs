//! Page navigation methods.

use tracing::debug;
use url::Url;

use crate::error::Result;

use super::Page;

// ============================================================================
// Page - Navigation
// ============================================================================

impl Page {
    /// Navigates to a URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to navigate to
    ///
    /// # Errors
    ///
    /// Returns an error if navigation fails.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(url = %url, "Navigating");
        self.driver.goto(url).await?;
        Ok(())
    }

    /// Reloads the current page.
    pub async fn reload(&self) -> Result<()> {
        debug!("Reloading page");
        self.driver.refresh().await?;
        Ok(())
    }

    /// Navigates back in history.
    pub async fn back(&self) -> Result<()> {
        debug!("Navigating back");
        self.driver.back().await?;
        Ok(())
    }

    /// Navigates forward in history.
    pub async fn forward(&self) -> Result<()> {
        debug!("Navigating forward");
        self.driver.forward().await?;
        Ok(())
    }

    /// Gets the current page title.
    pub async fn get_title(&self) -> Result<String> {
        let title = self.driver.title().await?;
        debug!(title = %title, "Got page title");
        Ok(title)
    }

    /// Gets the current URL.
    pub async fn get_url(&self) -> Result<Url> {
        let url = self.driver.current_url().await?;
        debug!(url = %url, "Got page URL");
        Ok(url)
    }

    /// Gets the page source HTML.
    pub async fn get_page_source(&self) -> Result<String> {
        self.driver.source().await.map_err(Into::into)
    }
}
