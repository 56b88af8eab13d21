//! Payments hub: category tiles and provider search.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::OplataResult;
use crate::wait::Waiter;

use super::Page;

/// The payments hub with the provider search field and category tiles.
#[derive(Debug, Clone)]
pub struct PaymentsPage {
    waiter: Waiter,
    search_input: Locator,
    communal_category: Locator,
    proposal_list: Locator,
}

impl PaymentsPage {
    /// Create the page object with an explicit wait configuration
    #[must_use]
    pub fn new(waiter: Waiter) -> Self {
        Self {
            waiter,
            search_input: Locator::css("input[placeholder*='Название или ИНН получателя']"),
            communal_category: Locator::css("div[aria-label='ЖКХ']"),
            proposal_list: Locator::css("div[data-qa-file='GridColumn']"),
        }
    }

    /// Open the "ЖКХ" (communal payments) category
    pub async fn open_communal<D: PageDriver>(&self, driver: &mut D) -> OplataResult<()> {
        self.waiter
            .until_clickable(driver, &self.communal_category)
            .await?;
        driver.click(&self.communal_category).await
    }

    /// Search providers by name or tax number, then wait for the proposal
    /// list to render
    pub async fn search_provider<D: PageDriver>(
        &self,
        driver: &mut D,
        name: &str,
    ) -> OplataResult<()> {
        tracing::debug!(provider = name, "searching provider");
        driver.type_text(&self.search_input, name).await?;
        self.waiter
            .until_clickable(driver, &self.proposal_list)
            .await?;
        Ok(())
    }

    /// Texts of the search proposals, in document order
    pub async fn proposal_titles<D: PageDriver>(&self, driver: &D) -> OplataResult<Vec<String>> {
        let proposals = driver.find_all(&self.proposal_list).await?;
        Ok(proposals.into_iter().map(|el| el.text).collect())
    }

    /// Open the first search proposal
    pub async fn open_first_proposal<D: PageDriver>(&self, driver: &mut D) -> OplataResult<()> {
        driver.click(&self.proposal_list).await
    }

    /// Locator of the proposal list
    #[must_use]
    pub const fn proposals(&self) -> &Locator {
        &self.proposal_list
    }

    /// Locator of the search input
    #[must_use]
    pub const fn search_field(&self) -> &Locator {
        &self.search_input
    }

    /// Locator of the communal category tile
    #[must_use]
    pub const fn communal_tile(&self) -> &Locator {
        &self.communal_category
    }
}

impl Page for PaymentsPage {
    fn name(&self) -> &'static str {
        "payments"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementHandle, MockDom, MockDriver, MockEffect};
    use crate::wait::WaitOptions;

    const URL: &str = "https://www.tinkoff.ru/payments/";

    fn page() -> PaymentsPage {
        PaymentsPage::new(Waiter::with_options(
            WaitOptions::new().with_timeout(100).with_poll_interval(10),
        ))
    }

    #[tokio::test]
    async fn test_search_provider_types_and_waits_for_proposals() {
        let page = page();
        let mut driver = MockDriver::new();
        driver.install(
            URL,
            MockDom::new().with(
                page.search_field().clone(),
                ElementHandle::new("s1", "input"),
            ),
        );
        // Proposals render only after the query is typed
        driver.on_type(
            URL,
            page.search_field().clone(),
            vec![MockEffect::Set(
                page.proposals().clone(),
                vec![
                    ElementHandle::new("g1", "div").with_text("ЖКУ-Москва жилой дом"),
                    ElementHandle::new("g2", "div").with_text("ЖКУ Московской области"),
                ],
            )],
        );
        driver.navigate(URL).await.unwrap();

        page.search_provider(&mut driver, "ЖКУ-Москва").await.unwrap();
        let titles = page.proposal_titles(&driver).await.unwrap();
        assert_eq!(titles.len(), 2);
        assert!(titles[0].contains("ЖКУ-Москва"));
    }

    #[tokio::test]
    async fn test_proposal_titles_empty_when_nothing_matches() {
        let page = page();
        let mut driver = MockDriver::new();
        driver.install(URL, MockDom::new());
        driver.navigate(URL).await.unwrap();
        let titles = page.proposal_titles(&driver).await.unwrap();
        assert!(titles.is_empty());
    }
}
