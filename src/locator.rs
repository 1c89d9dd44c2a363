//! Dynamic XPath locator templates.
//!
//! A [`Locator`] is an XPath expression that may carry positional `{}`
//! placeholders. Page objects declare templates as constants and resolve
//! them at call time with [`Locator::with`]; substitution is pure, positional,
//! and stable. Every `{}` in the template is a placeholder; there is no
//! escape syntax, and arguments are inserted verbatim.
//!
//! # Example
//!
//! ```
//! use pagekit::Locator;
//!
//! const DYNAMIC_FIELD: Locator = Locator::xpath("//*[@id='{}']");
//! const LOGIN_BUTTON: Locator = Locator::xpath("//button[text()='Log In']");
//!
//! let username = DYNAMIC_FIELD.with(["username"]).unwrap();
//! assert_eq!(username.as_str(), "//*[@id='username']");
//!
//! // Argument count must match the placeholder count.
//! assert!(DYNAMIC_FIELD.with(["a", "b"]).is_err());
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

// ============================================================================
// Placeholder Counting
// ============================================================================

/// Counts non-overlapping `{}` placeholders, left to right.
const fn count_placeholders(template: &str) -> usize {
    let bytes = template.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'}' {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

// ============================================================================
// Locator
// ============================================================================

/// An XPath locator template with positional `{}` placeholders.
///
/// A locator with zero remaining placeholders is *resolved* and can be
/// passed to any facade operation; handing over an unresolved template is a
/// [`Error::LocatorFormat`] at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    template: Cow<'static, str>,
    placeholders: usize,
}

impl Locator {
    /// Creates a locator from an XPath template.
    ///
    /// Usable in `const` contexts for page-object constants.
    #[must_use]
    pub const fn xpath(template: &'static str) -> Self {
        Self {
            template: Cow::Borrowed(template),
            placeholders: count_placeholders(template),
        }
    }

    /// Resolves placeholders by positional substitution.
    ///
    /// Fails when the argument count does not match the placeholder count.
    /// The result carries zero placeholders, regardless of the argument
    /// contents.
    pub fn with<I, S>(&self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        if args.len() != self.placeholders {
            return Err(Error::locator_format(
                self.template.as_ref(),
                format!(
                    "expected {} argument(s), got {}",
                    self.placeholders,
                    args.len()
                ),
            ));
        }
        if args.is_empty() {
            return Ok(self.clone());
        }

        let extra: usize = args.iter().map(|a| a.as_ref().len()).sum();
        let mut resolved = String::with_capacity(self.template.len() + extra);

        // split("{}") yields placeholders + 1 pieces, in template order.
        let mut pieces = self.template.split("{}");
        resolved.push_str(pieces.next().unwrap_or_default());
        for arg in &args {
            resolved.push_str(arg.as_ref());
            resolved.push_str(pieces.next().unwrap_or_default());
        }

        Ok(Self {
            template: Cow::Owned(resolved),
            placeholders: 0,
        })
    }

    /// Returns the number of unresolved placeholders.
    #[inline]
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Returns `true` when all placeholders have been substituted.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.placeholders == 0
    }

    /// Returns the template text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Returns the XPath expression, rejecting unresolved templates.
    pub(crate) fn expr(&self) -> Result<&str> {
        if self.placeholders == 0 {
            Ok(&self.template)
        } else {
            Err(Error::locator_format(
                self.template.as_ref(),
                format!("{} unresolved placeholder(s)", self.placeholders),
            ))
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

// ============================================================================
// From implementations for runtime-built templates
// ============================================================================

impl From<String> for Locator {
    fn from(template: String) -> Self {
        let placeholders = count_placeholders(&template);
        Self {
            template: Cow::Owned(template),
            placeholders,
        }
    }
}

impl From<&str> for Locator {
    fn from(template: &str) -> Self {
        Self::from(template.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
