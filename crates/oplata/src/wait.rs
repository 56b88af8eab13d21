//! Explicit waits for synchronizing with asynchronous page rendering.
//!
//! The target site renders lists and forms after navigation settles, so
//! every page transition is followed by a bounded poll: evaluate a readiness
//! condition against the live document until it holds or the window elapses.
//! Terminal states are the resolved value or [`OplataError::Timeout`]; there
//! is no retry after timeout, one attempt window per call site.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::driver::{ElementHandle, PageDriver};
use crate::locator::Locator;
use crate::result::{OplataError, OplataResult};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Blocking poll helper bound to one wait configuration.
///
/// Each page object holds its own `Waiter`; there is no process-wide shared
/// wait state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a waiter with custom options
    #[must_use]
    pub const fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Get the wait options
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Wait until the locator resolves to at least one element.
    ///
    /// Returns the first match. Backend failures other than `NotFound`
    /// (e.g. `Stale`) propagate immediately.
    pub async fn until_present<D: PageDriver>(
        &self,
        driver: &D,
        locator: &Locator,
    ) -> OplataResult<ElementHandle> {
        self.poll(format!("{locator} present"), || async move {
            match driver.find(locator).await {
                Ok(handle) => Ok(Some(handle)),
                Err(OplataError::NotFound { .. }) => Ok(None),
                Err(other) => Err(other),
            }
        })
        .await
    }

    /// Wait until the locator resolves to an interactable element
    pub async fn until_clickable<D: PageDriver>(
        &self,
        driver: &D,
        locator: &Locator,
    ) -> OplataResult<ElementHandle> {
        self.poll(format!("{locator} clickable"), || async move {
            match driver.find(locator).await {
                Ok(handle) if handle.clickable => Ok(Some(handle)),
                Ok(_) | Err(OplataError::NotFound { .. }) => Ok(None),
                Err(other) => Err(other),
            }
        })
        .await
    }

    /// Wait until the session URL equals the expected URL
    pub async fn until_url_is<D: PageDriver>(
        &self,
        driver: &D,
        expected: &str,
    ) -> OplataResult<()> {
        self.poll(format!("URL is {expected}"), || async move {
            let url = driver.current_url().await?;
            Ok((url == expected).then_some(()))
        })
        .await
    }

    /// Wait until a custom readiness predicate returns true
    pub async fn until<F, Fut>(&self, description: &str, mut predicate: F) -> OplataResult<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        self.poll(description.to_string(), || {
            let fut = predicate();
            async move { Ok(fut.await.then_some(())) }
        })
        .await
    }

    /// Core poll loop.
    ///
    /// The condition is checked at least once. Timeout is reported only once
    /// the elapsed time reaches the configured budget, never before.
    async fn poll<T, F, Fut>(&self, waited_for: String, mut check: F) -> OplataResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = OplataResult<Option<T>>>,
    {
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll_interval = self.options.poll_interval();

        loop {
            if let Some(value) = check().await? {
                tracing::debug!(%waited_for, elapsed = ?start.elapsed(), "wait satisfied");
                return Ok(value);
            }
            if start.elapsed() >= timeout {
                tracing::debug!(%waited_for, timeout_ms = self.options.timeout_ms, "wait timed out");
                return Err(OplataError::timeout(self.options.timeout_ms, waited_for));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}
