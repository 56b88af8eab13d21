//! Result and error types for Oplata.

use thiserror::Error;

/// Result type for Oplata operations
pub type OplataResult<T> = Result<T, OplataError>;

/// Errors that can occur while driving the payment flow
#[derive(Debug, Error)]
pub enum OplataError {
    /// Locator matched no element (single-element accessor only)
    #[error("No element found for {locator}")]
    NotFound {
        /// Locator that matched nothing
        locator: String,
    },

    /// Wait condition was never satisfied within the configured window
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout budget in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waited_for: String,
    },

    /// Element reference invalidated by a page change; surfaced from the
    /// backend, never recovered locally
    #[error("Stale element reference for {locator}")]
    Stale {
        /// Locator of the invalidated element
        locator: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}. Install Chromium or set CHROMIUM_PATH")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error in the page context
    #[error("Evaluation failed: {message}")]
    Evaluation {
        /// Error message
        message: String,
    },

    /// Scenario-level expectation failed
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Error message
        message: String,
    },

    /// A journey branch that is deliberately not implemented
    #[error("Unsupported path: {message}")]
    UnsupportedPath {
        /// Why the branch is not taken
        message: String,
    },

    /// JSON error (CDP value decoding)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OplataError {
    /// NotFound for a locator, keeping the formatted locator in the message
    pub fn not_found(locator: &impl std::fmt::Display) -> Self {
        Self::NotFound {
            locator: locator.to_string(),
        }
    }

    /// Timeout with the awaited condition description
    pub fn timeout(ms: u64, waited_for: impl Into<String>) -> Self {
        Self::Timeout {
            ms,
            waited_for: waited_for.into(),
        }
    }
}
