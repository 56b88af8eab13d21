//! Communal payments category: region selection and provider list.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::OplataResult;
use crate::wait::Waiter;

use super::Page;

/// The communal payments screen with the region switcher and the list of
/// service providers for the active region.
#[derive(Debug, Clone)]
pub struct CommunalPage {
    waiter: Waiter,
    current_region: Locator,
    first_provider: Locator,
    provider_list: Locator,
}

impl CommunalPage {
    /// Create the page object with an explicit wait configuration
    #[must_use]
    pub fn new(waiter: Waiter) -> Self {
        Self {
            waiter,
            current_region: Locator::css("span[class*='region']"),
            first_provider: Locator::css("li:first-child[data-qa-file='UIMenuItemProvider']"),
            provider_list: Locator::css("li[data-qa-file='UIMenuItemProvider']"),
        }
    }

    /// Locator of a region entry in the opened region menu
    #[must_use]
    pub fn region_entry(city: &str) -> Locator {
        Locator::xpath(format!(".//*[text()='{city}']/.."))
    }

    /// Displayed name of the active region
    pub async fn region<D: PageDriver>(&self, driver: &D) -> OplataResult<String> {
        driver.text_of(&self.current_region).await
    }

    /// Switch to the given region and wait for the provider list to render
    pub async fn set_region<D: PageDriver>(&self, driver: &mut D, city: &str) -> OplataResult<()> {
        tracing::debug!(city, "switching region");
        driver.click(&self.current_region).await?;
        driver.click(&Self::region_entry(city)).await?;
        self.waiter
            .until_clickable(driver, &self.first_provider)
            .await?;
        Ok(())
    }

    /// Switch region only when the displayed region differs.
    ///
    /// `displayed` is the inflected label shown in the switcher ("Москве"),
    /// `menu_entry` the nominative menu item ("г. Москва").
    pub async fn ensure_region<D: PageDriver>(
        &self,
        driver: &mut D,
        displayed: &str,
        menu_entry: &str,
    ) -> OplataResult<()> {
        if self.region(driver).await? != displayed {
            self.set_region(driver, menu_entry).await?;
        }
        Ok(())
    }

    /// Name of the first provider in the list
    pub async fn first_provider_name<D: PageDriver>(&self, driver: &D) -> OplataResult<String> {
        driver.text_of(&self.first_provider).await
    }

    /// Open the first provider in the list
    pub async fn open_first_provider<D: PageDriver>(&self, driver: &mut D) -> OplataResult<()> {
        self.waiter
            .until_clickable(driver, &self.first_provider)
            .await?;
        driver.click(&self.first_provider).await
    }

    /// Names of all providers for the active region, in document order
    pub async fn provider_names<D: PageDriver>(&self, driver: &D) -> OplataResult<Vec<String>> {
        let providers = driver.find_all(&self.provider_list).await?;
        Ok(providers.into_iter().map(|el| el.text).collect())
    }

    /// Locator of the region switcher
    #[must_use]
    pub const fn region_switcher(&self) -> &Locator {
        &self.current_region
    }

    /// Locator of the first provider entry
    #[must_use]
    pub const fn first_provider_entry(&self) -> &Locator {
        &self.first_provider
    }

    /// Locator of the provider list
    #[must_use]
    pub const fn providers(&self) -> &Locator {
        &self.provider_list
    }
}

impl Page for CommunalPage {
    fn name(&self) -> &'static str {
        "communal"
    }
}
