//! Window and frame switching.
//!
//! Window handles are opaque tokens issued by the driver; hold on to the
//! handle returned by [`Page::current_window`] before opening popups so
//! focus can be restored afterwards.

use thirtyfour::WindowHandle;
use tracing::debug;

use crate::error::Result;
use crate::locator::Locator;

use super::Page;

// ============================================================================
// Page - Windows
// ============================================================================

impl Page {
    /// Returns the handle of the currently focused window.
    pub async fn current_window(&self) -> Result<WindowHandle> {
        Ok(self.driver.window().await?)
    }

    /// Returns the handles of all open windows.
    pub async fn window_handles(&self) -> Result<Vec<WindowHandle>> {
        Ok(self.driver.windows().await?)
    }

    /// Switches to the first window other than `parent`.
    ///
    /// Returns `false` without switching when no other window is open.
    pub async fn switch_to_opened_window(&self, parent: &WindowHandle) -> Result<bool> {
        let handles = self.driver.windows().await?;
        for handle in handles {
            if handle != *parent {
                debug!(window = ?handle, "Switching to opened window");
                self.driver.switch_to_window(handle).await?;
                return Ok(true);
            }
        }
        debug!("No window open besides the parent");
        Ok(false)
    }

    /// Switches to the window whose title matches `title` exactly.
    ///
    /// Returns `false` when no window matches; focus is restored to the
    /// window that was current before the search.
    pub async fn switch_to_window_titled(&self, title: &str) -> Result<bool> {
        let original = self.driver.window().await?;
        let handles = self.driver.windows().await?;

        for handle in handles {
            self.driver.switch_to_window(handle.clone()).await?;
            if self.driver.title().await? == title {
                debug!(window = ?handle, title = %title, "Switched to titled window");
                return Ok(true);
            }
        }

        debug!(title = %title, "No window matched title, restoring focus");
        self.driver.switch_to_window(original).await?;
        Ok(false)
    }

    /// Closes every window except `parent`, then focuses `parent`.
    pub async fn close_other_windows(&self, parent: &WindowHandle) -> Result<()> {
        let handles = self.driver.windows().await?;
        for handle in handles {
            if handle != *parent {
                debug!(window = ?handle, "Closing window");
                self.driver.switch_to_window(handle).await?;
                self.driver.close_window().await?;
            }
        }
        self.driver.switch_to_window(parent.clone()).await?;
        Ok(())
    }

    /// Maximizes the current window.
    pub async fn maximize(&self) -> Result<()> {
        debug!("Maximizing window");
        self.driver.maximize_window().await?;
        Ok(())
    }
}

// ============================================================================
// Page - Frames
// ============================================================================

impl Page {
    /// Switches into the frame located by `locator`.
    pub async fn enter_frame(&self, locator: &Locator) -> Result<()> {
        debug!(locator = %locator, "Entering frame");
        let element = self.find(locator).await?;
        element.enter_frame().await?;
        Ok(())
    }

    /// Switches to the parent of the current frame.
    pub async fn enter_parent_frame(&self) -> Result<()> {
        debug!("Entering parent frame");
        self.driver.enter_parent_frame().await?;
        Ok(())
    }

    /// Switches back to the top-level document.
    pub async fn enter_default_frame(&self) -> Result<()> {
        debug!("Entering default frame");
        self.driver.enter_default_frame().await?;
        Ok(())
    }
}
