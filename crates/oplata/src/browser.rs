//! Browser session control for live runs.
//!
//! With the `browser` feature enabled this module drives a real Chromium via
//! the Chrome DevTools Protocol (chromiumoxide) and exposes it through the
//! [`PageDriver`](crate::driver::PageDriver) trait, so the same page objects
//! run against the live site. Without the feature only [`BrowserConfig`]
//! is available and tests use the scripted mock driver.
//!
//! Every locator interaction is a JavaScript evaluation of the expression
//! the locator compiles to; that keeps a single execution path for all four
//! lookup strategies.

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = CHROMIUM_PATH env, then auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Resolved chromium executable: explicit path wins, then CHROMIUM_PATH
    #[must_use]
    pub fn executable(&self) -> Option<String> {
        self.chromium_path
            .clone()
            .or_else(|| std::env::var("CHROMIUM_PATH").ok())
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::{ElementHandle, PageDriver};
    use crate::locator::Locator;
    use crate::result::{OplataError, OplataResult};

    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Browser instance owning the CDP connection.
    ///
    /// The session is exclusively owned by the test process for its entire
    /// lifetime and released exactly once via [`Browser::close`].
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance
        pub async fn launch(config: BrowserConfig) -> OplataResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(path) = config.executable() {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| OplataError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| OplataError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Drive the CDP event stream until the connection drops
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a new page and wrap it as a [`PageDriver`]
        pub async fn new_driver(&self) -> OplataResult<CdpDriver> {
            let browser = self.inner.lock().await;
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| OplataError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(CdpDriver {
                page: Some(Arc::new(Mutex::new(page))),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser, releasing the session
        pub async fn close(self) -> OplataResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| OplataError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    /// [`PageDriver`] backed by one CDP page.
    #[derive(Debug, Clone)]
    pub struct CdpDriver {
        page: Option<Arc<Mutex<CdpPage>>>,
    }

    impl CdpDriver {
        async fn evaluate<T: serde::de::DeserializeOwned>(&self, expr: String) -> OplataResult<T> {
            let Some(ref page) = self.page else {
                return Err(OplataError::Evaluation {
                    message: "session already closed".to_string(),
                });
            };
            let page = page.lock().await;
            let result = page
                .evaluate(expr)
                .await
                .map_err(|e| OplataError::Evaluation {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| OplataError::Evaluation {
                message: e.to_string(),
            })
        }

        fn resolve_one_js(locator: &Locator) -> String {
            format!(
                "(() => {{ const el = {query}; if (!el) return null; \
                 return {{ id: {id:?}, tag_name: el.tagName.toLowerCase(), \
                 text: (el.textContent ?? '').trim(), \
                 clickable: !el.disabled && el.getClientRects().length > 0 }}; }})()",
                query = locator.to_query(),
                id = locator.to_string(),
            )
        }

        fn resolve_all_js(locator: &Locator) -> String {
            format!(
                "({query}).map((el, i) => ({{ id: {id:?} + '#' + i, \
                 tag_name: el.tagName.toLowerCase(), \
                 text: (el.textContent ?? '').trim(), \
                 clickable: !el.disabled && el.getClientRects().length > 0 }}))",
                query = locator.to_all_query(),
                id = locator.to_string(),
            )
        }
    }

    #[async_trait]
    impl PageDriver for CdpDriver {
        async fn navigate(&mut self, url: &str) -> OplataResult<()> {
            let Some(ref page) = self.page else {
                return Err(OplataError::Navigation {
                    url: url.to_string(),
                    message: "session already closed".to_string(),
                });
            };
            let page = page.lock().await;
            page.goto(url).await.map_err(|e| OplataError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            Ok(())
        }

        async fn find(&self, locator: &Locator) -> OplataResult<ElementHandle> {
            let resolved: Option<ElementHandle> =
                self.evaluate(Self::resolve_one_js(locator)).await?;
            resolved.ok_or_else(|| OplataError::not_found(locator))
        }

        async fn find_all(&self, locator: &Locator) -> OplataResult<Vec<ElementHandle>> {
            self.evaluate(Self::resolve_all_js(locator)).await
        }

        async fn click(&mut self, locator: &Locator) -> OplataResult<()> {
            let clicked: bool = self
                .evaluate(format!(
                    "(() => {{ const el = {}; if (!el) return false; el.click(); return true; }})()",
                    locator.to_query()
                ))
                .await?;
            if clicked {
                Ok(())
            } else {
                Err(OplataError::not_found(locator))
            }
        }

        async fn type_text(&mut self, locator: &Locator, text: &str) -> OplataResult<()> {
            let typed: bool = self
                .evaluate(format!(
                    "(() => {{ const el = {query}; if (!el) return false; el.focus(); \
                     el.value = {text:?}; \
                     el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                     el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                     return true; }})()",
                    query = locator.to_query(),
                ))
                .await?;
            if typed {
                Ok(())
            } else {
                Err(OplataError::not_found(locator))
            }
        }

        async fn current_url(&self) -> OplataResult<String> {
            self.evaluate("window.location.href".to_string()).await
        }

        async fn close(&mut self) -> OplataResult<()> {
            // Drop our page handle; the Browser releases the session itself
            self.page = None;
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, CdpDriver};
