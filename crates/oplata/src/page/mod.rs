//! Page objects for the communal payments journey.
//!
//! Each page object is a configuration struct of [`Locator`](crate::locator::Locator)
//! values built at instantiation, scoped to one logical screen of the bank's
//! web application, plus the convenience actions the scenario needs. Every
//! page holds its own [`Waiter`](crate::wait::Waiter); there is no shared
//! global wait state.
//!
//! Page objects carry no element state of their own. The live browser page
//! is the only state; accessors are pure lookups against the current
//! document.

mod communal;
mod home;
mod payments;
mod utilities;

pub use communal::CommunalPage;
pub use home::HomePage;
pub use payments::PaymentsPage;
pub use utilities::{PaymentForm, UtilitiesPage};

/// Trait for page objects representing one screen of the application.
pub trait Page {
    /// Page name for logging and failure messages
    fn name(&self) -> &'static str;
}
