//! Error types for the market data crate.
//!
//! Every variant ends up as the same generic failure at the HTTP boundary.
//! The distinct variants exist so the operator log says what actually broke.

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Errors that can occur while fetching or parsing the rate page.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The browser configuration could not be built or the process failed to start.
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    /// A DevTools protocol call failed (navigation, element lookup, input, ...).
    #[error("Browser error: {0}")]
    Browser(#[from] CdpError),

    /// A control the page driver needs to interact with is not on the page.
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// The CSS selector that matched nothing
        selector: String,
    },

    /// A synthetic input event could not be constructed.
    #[error("Input event rejected: {0}")]
    Input(String),

    /// The browser rejected the navigation or the page never finished parsing.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// The page being loaded
        url: String,
        /// Reason reported by the browser
        message: String,
    },

    /// The page's DOM was not parsed within the navigation timeout.
    #[error("Timed out after {timeout_ms}ms loading {url}")]
    NavigationTimeout {
        /// The page being loaded
        url: String,
        /// How long the driver waited
        timeout_ms: u64,
    },

    /// The result table never appeared after the form was submitted.
    #[error("Timed out after {timeout_ms}ms waiting for {selector}")]
    TableTimeout {
        /// The selector being waited on
        selector: String,
        /// How long the driver waited
        timeout_ms: u64,
    },

    /// A hard-coded selector failed to parse.
    #[error("Invalid selector {selector}: {message}")]
    InvalidSelector {
        /// The selector text
        selector: String,
        /// Parser message
        message: String,
    },
}

impl MarketDataError {
    /// Returns true when the failure came from waiting on the page rather than
    /// from the browser itself.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::TableTimeout { .. } | Self::NavigationTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_timeout_display() {
        let error = MarketDataError::TableTimeout {
            selector: ".tbl-responsive".to_string(),
            timeout_ms: 30000,
        };
        assert_eq!(
            error.to_string(),
            "Timed out after 30000ms waiting for .tbl-responsive"
        );
        assert!(error.is_timeout());
    }

    #[test]
    fn test_element_not_found_is_not_timeout() {
        let error = MarketDataError::ElementNotFound {
            selector: "#datepicker".to_string(),
        };
        assert_eq!(error.to_string(), "Element not found: #datepicker");
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_navigation_timeout_is_timeout() {
        let error = MarketDataError::NavigationTimeout {
            url: "https://nbc.example/rates".to_string(),
            timeout_ms: 30000,
        };
        assert!(error.is_timeout());
    }
}
