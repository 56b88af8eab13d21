//! Abstract browser-automation driver.
//!
//! The page objects never talk to a concrete browser; they go through the
//! [`PageDriver`] trait so the same journey runs against the CDP backend
//! (feature `browser`) or against the scripted [`MockDriver`] used by the
//! test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::locator::Locator;
use crate::result::{OplataError, OplataResult};

/// Resolved element snapshot.
///
/// A handle is a point-in-time view: a page change invalidates it, and the
/// backend reports that as [`OplataError::Stale`] on the next interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Backend-assigned identifier
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Text content at resolution time
    pub text: String,
    /// Whether the element is visible and enabled for interaction
    pub clickable: bool,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text: String::new(),
            clickable: true,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the clickable flag
    #[must_use]
    pub const fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }
}

/// Abstract driver trait for browser automation.
///
/// Lookup contract: [`find`](Self::find) resolves a locator to the first
/// match in document order and fails with [`OplataError::NotFound`] when
/// nothing matches; [`find_all`](Self::find_all) returns every match in
/// document order, and zero matches is an empty vec, not an error. Failures
/// are never recovered here; they propagate to the caller and fail the
/// enclosing test.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate the single browser session to a URL
    async fn navigate(&mut self, url: &str) -> OplataResult<()>;

    /// Resolve a locator to the first matching element
    async fn find(&self, locator: &Locator) -> OplataResult<ElementHandle>;

    /// Resolve a locator to all matching elements in document order
    async fn find_all(&self, locator: &Locator) -> OplataResult<Vec<ElementHandle>>;

    /// Click the first element matching the locator
    async fn click(&mut self, locator: &Locator) -> OplataResult<()>;

    /// Type text into the first element matching the locator
    async fn type_text(&mut self, locator: &Locator, text: &str) -> OplataResult<()>;

    /// Text content of the first element matching the locator
    async fn text_of(&self, locator: &Locator) -> OplataResult<String> {
        Ok(self.find(locator).await?.text)
    }

    /// Current URL of the session
    async fn current_url(&self) -> OplataResult<String>;

    /// Release the session; called exactly once at teardown
    async fn close(&mut self) -> OplataResult<()>;
}

/// Side effect a scripted interaction applies to the mock site.
#[derive(Debug, Clone)]
pub enum MockEffect {
    /// Navigate the session to a URL
    Goto(String),
    /// Replace the elements registered under a locator on the current page
    Set(Locator, Vec<ElementHandle>),
    /// Remove the elements registered under a locator on the current page
    Clear(Locator),
}

/// Elements of one mock page, keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct MockDom {
    elements: Vec<(Locator, Vec<ElementHandle>)>,
}

impl MockDom {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single element under a locator
    #[must_use]
    pub fn with(mut self, locator: Locator, element: ElementHandle) -> Self {
        self.set(locator, vec![element]);
        self
    }

    /// Register an ordered element list under a locator
    #[must_use]
    pub fn with_many(mut self, locator: Locator, elements: Vec<ElementHandle>) -> Self {
        self.set(locator, elements);
        self
    }

    fn set(&mut self, locator: Locator, elements: Vec<ElementHandle>) {
        if let Some(entry) = self.elements.iter_mut().find(|(l, _)| *l == locator) {
            entry.1 = elements;
        } else {
            self.elements.push((locator, elements));
        }
    }

    fn remove(&mut self, locator: &Locator) {
        self.elements.retain(|(l, _)| l != locator);
    }

    fn get(&self, locator: &Locator) -> Option<&[ElementHandle]> {
        self.elements
            .iter()
            .find(|(l, _)| l == locator)
            .map(|(_, els)| els.as_slice())
    }
}

/// Scripted in-memory driver for tests.
///
/// The mock models the site under test as a set of pages keyed by URL, each
/// a locator-to-elements registry, plus interaction rules: clicking or
/// typing at a locator applies scripted effects (navigation, elements
/// appearing or disappearing). That is enough to replay the whole payment
/// journey without a browser.
#[derive(Debug, Default)]
pub struct MockDriver {
    current_url: String,
    pages: HashMap<String, MockDom>,
    click_rules: Vec<(String, Locator, Vec<MockEffect>)>,
    type_rules: Vec<(String, Locator, Vec<MockEffect>)>,
    stale: Vec<Locator>,
    typed: Vec<(Locator, String)>,
    call_history: Vec<String>,
    closed: bool,
}

impl MockDriver {
    /// Create a new mock driver with no pages
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a page under a URL
    pub fn install(&mut self, url: impl Into<String>, dom: MockDom) {
        let _ = self.pages.insert(url.into(), dom);
    }

    /// Script the effects of clicking a locator while on a given URL
    pub fn on_click(&mut self, url: impl Into<String>, target: Locator, effects: Vec<MockEffect>) {
        self.click_rules.push((url.into(), target, effects));
    }

    /// Script the effects of typing into a locator while on a given URL
    pub fn on_type(&mut self, url: impl Into<String>, target: Locator, effects: Vec<MockEffect>) {
        self.type_rules.push((url.into(), target, effects));
    }

    /// Mark a locator as stale: the next interaction with it fails
    pub fn mark_stale(&mut self, locator: Locator) {
        self.stale.push(locator);
    }

    /// Text typed into a locator so far, in order
    #[must_use]
    pub fn typed_into(&self, locator: &Locator) -> Vec<&str> {
        self.typed
            .iter()
            .filter(|(l, _)| l == locator)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    /// Call history for verification
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Whether the session was released
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn current_dom(&self) -> Option<&MockDom> {
        self.pages.get(&self.current_url)
    }

    fn check_stale(&self, locator: &Locator) -> OplataResult<()> {
        if self.stale.contains(locator) {
            return Err(OplataError::Stale {
                locator: locator.to_string(),
            });
        }
        Ok(())
    }

    fn apply_effects(&mut self, effects: Vec<MockEffect>) {
        for effect in effects {
            match effect {
                MockEffect::Goto(url) => self.current_url = url,
                MockEffect::Set(locator, elements) => {
                    if let Some(dom) = self.pages.get_mut(&self.current_url) {
                        dom.set(locator, elements);
                    }
                }
                MockEffect::Clear(locator) => {
                    if let Some(dom) = self.pages.get_mut(&self.current_url) {
                        dom.remove(&locator);
                    }
                }
            }
        }
    }

    fn matching_effects(
        rules: &[(String, Locator, Vec<MockEffect>)],
        url: &str,
        target: &Locator,
    ) -> Vec<MockEffect> {
        rules
            .iter()
            .filter(|(rule_url, rule_target, _)| rule_url == url && rule_target == target)
            .flat_map(|(_, _, effects)| effects.iter().cloned())
            .collect()
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> OplataResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        self.current_url = url.to_string();
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> OplataResult<ElementHandle> {
        self.check_stale(locator)?;
        self.current_dom()
            .and_then(|dom| dom.get(locator))
            .and_then(|els| els.first())
            .cloned()
            .ok_or_else(|| OplataError::not_found(locator))
    }

    async fn find_all(&self, locator: &Locator) -> OplataResult<Vec<ElementHandle>> {
        self.check_stale(locator)?;
        Ok(self
            .current_dom()
            .and_then(|dom| dom.get(locator))
            .map(<[ElementHandle]>::to_vec)
            .unwrap_or_default())
    }

    async fn click(&mut self, locator: &Locator) -> OplataResult<()> {
        self.check_stale(locator)?;
        let _ = self.find(locator).await?;
        self.call_history.push(format!("click:{locator}"));
        let effects = Self::matching_effects(&self.click_rules, &self.current_url, locator);
        self.apply_effects(effects);
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> OplataResult<()> {
        self.check_stale(locator)?;
        let _ = self.find(locator).await?;
        self.call_history.push(format!("type:{locator}:{text}"));
        self.typed.push((locator.clone(), text.to_string()));
        let effects = Self::matching_effects(&self.type_rules, &self.current_url, locator);
        self.apply_effects(effects);
        Ok(())
    }

    async fn current_url(&self) -> OplataResult<String> {
        Ok(self.current_url.clone())
    }

    async fn close(&mut self) -> OplataResult<()> {
        self.call_history.push("close".to_string());
        self.closed = true;
        Ok(())
    }
}
