//! Cookie transfer between sessions.
//!
//! Cookies are carried verbatim; typical use is logging in through the UI
//! once, draining the jar, and re-injecting it into later sessions to skip
//! the login form.

use thirtyfour::Cookie;
use tracing::debug;

use crate::error::Result;

use super::Page;

impl Page {
    /// Returns all cookies visible to the current page.
    pub async fn get_cookies(&self) -> Result<Vec<Cookie>> {
        let cookies = self.driver.get_all_cookies().await?;
        debug!(count = cookies.len(), "Fetched cookies");
        Ok(cookies)
    }

    /// Adds each cookie to the current session.
    ///
    /// The page must already be on a domain the cookies are valid for.
    pub async fn add_cookies(&self, cookies: Vec<Cookie>) -> Result<()> {
        debug!(count = cookies.len(), "Adding cookies");
        for cookie in cookies {
            self.driver.add_cookie(cookie).await?;
        }
        Ok(())
    }
}
