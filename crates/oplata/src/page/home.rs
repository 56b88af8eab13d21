//! Bank landing page.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::OplataResult;
use crate::wait::Waiter;

use super::Page;

/// The bank's landing page; entry point of every journey.
#[derive(Debug, Clone)]
pub struct HomePage {
    waiter: Waiter,
    payments: Locator,
}

impl HomePage {
    /// Landing page URL
    pub const URL: &'static str = "https://www.tinkoff.ru/";

    /// Create the page object with an explicit wait configuration
    #[must_use]
    pub fn new(waiter: Waiter) -> Self {
        Self {
            waiter,
            payments: Locator::link_text("Платежи"),
        }
    }

    /// Navigate the session to the landing page
    pub async fn open<D: PageDriver>(&self, driver: &mut D) -> OplataResult<()> {
        driver.navigate(Self::URL).await
    }

    /// Follow the "Платежи" link to the payments hub
    pub async fn go_to_payments<D: PageDriver>(&self, driver: &mut D) -> OplataResult<()> {
        self.waiter.until_clickable(driver, &self.payments).await?;
        driver.click(&self.payments).await
    }

    /// Locator of the payments link
    #[must_use]
    pub const fn payments_link(&self) -> &Locator {
        &self.payments
    }
}

impl Page for HomePage {
    fn name(&self) -> &'static str {
        "home"
    }
}
