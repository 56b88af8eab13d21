//! Oplata: page-object-model end-to-end tests for a bank's communal
//! payments web flow.
//!
//! The crate is a thin orchestration layer over a browser-automation driver:
//! each page object is a bag of element locators plus a few convenience
//! actions that click, type, and wait; the scenario in `tests/` strings the
//! page transitions together and asserts on rendered text.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────────┐
//! │ Scenario     │──►│ Page objects │──►│ PageDriver        │
//! │ (tests/)     │   │ + Waiter     │   │  MockDriver       │
//! │              │   │              │   │  CdpDriver (CDP)  │
//! └──────────────┘   └──────────────┘   └───────────────────┘
//! ```
//!
//! The scenario instantiates a page object, invokes an action that mutates
//! live browser state, then waits until the next page's defining element is
//! interactable before instantiating the next page object. Execution is
//! strictly sequential over one browser session; the only suspension point
//! is the wait helper's poll loop.
//!
//! # Example
//!
//! ```no_run
//! use oplata::{HomePage, MockDriver, Waiter};
//!
//! # async fn run() -> oplata::OplataResult<()> {
//! let mut driver = MockDriver::new();
//! let waiter = Waiter::new();
//! let home = HomePage::new(waiter);
//! home.open(&mut driver).await?;
//! home.go_to_payments(&mut driver).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod browser;
mod driver;
mod locator;
pub mod page;
mod result;
mod wait;

pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::{Browser, CdpDriver};
pub use driver::{ElementHandle, MockDom, MockDriver, MockEffect, PageDriver};
pub use locator::{Locator, Strategy};
pub use page::{CommunalPage, HomePage, Page, PaymentForm, PaymentsPage, UtilitiesPage};
pub use result::{OplataError, OplataResult};
pub use wait::{WaitOptions, Waiter, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
