//! Locator abstraction for element selection.
//!
//! A locator is an immutable (strategy, selector-value) pair identifying
//! zero, one, or many nodes in the rendered document. The strategy set is
//! closed: the payment flow only ever locates elements by id, CSS selector,
//! link text, or XPath. Selector syntax validity for a given strategy is the
//! backend's concern, not ours.
//!
//! Every locator compiles to a JavaScript query expression so that a single
//! evaluation path serves all strategies.

use serde::{Deserialize, Serialize};

/// Element lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Lookup by element id attribute
    Id,
    /// Lookup by CSS selector
    Css,
    /// Lookup by exact anchor text
    LinkText,
    /// Lookup by XPath expression
    XPath,
}

impl Strategy {
    /// Strategy name as used in formatted locators and error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Css => "css",
            Self::LinkText => "link_text",
            Self::XPath => "xpath",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable (strategy, value) pair used to find document elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    /// Locate by element id
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Id,
            value: value.into(),
        }
    }

    /// Locate by CSS selector
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css,
            value: value.into(),
        }
    }

    /// Locate an anchor by its exact text content
    #[must_use]
    pub fn link_text(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::LinkText,
            value: value.into(),
        }
    }

    /// Locate by XPath expression
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: value.into(),
        }
    }

    /// Get the lookup strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the selector value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Compile to a JavaScript expression resolving the first match in
    /// document order, or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        let v = &self.value;
        match self.strategy {
            Strategy::Id => format!("document.getElementById({v:?})"),
            Strategy::Css => format!("document.querySelector({v:?})"),
            Strategy::LinkText => format!(
                "Array.from(document.querySelectorAll('a')).find(el => el.textContent.trim() === {v:?}) ?? null"
            ),
            Strategy::XPath => format!(
                "document.evaluate({v:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
        }
    }

    /// Compile to a JavaScript expression resolving all matches as an array
    /// in document order (possibly empty)
    #[must_use]
    pub fn to_all_query(&self) -> String {
        let v = &self.value;
        match self.strategy {
            Strategy::Id => format!(
                "(document.getElementById({v:?}) ? [document.getElementById({v:?})] : [])"
            ),
            Strategy::Css => format!("Array.from(document.querySelectorAll({v:?}))"),
            Strategy::LinkText => format!(
                "Array.from(document.querySelectorAll('a')).filter(el => el.textContent.trim() === {v:?})"
            ),
            Strategy::XPath => format!(
                "(() => {{ const r = document.evaluate({v:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
            ),
        }
    }

    /// Compile to a JavaScript expression resolving the match count
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self.strategy {
            Strategy::Css => format!("document.querySelectorAll({:?}).length", self.value),
            _ => format!("({}).length", self.to_all_query()),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.strategy, self.value)
    }
}
