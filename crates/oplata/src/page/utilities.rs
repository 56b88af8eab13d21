//! Moscow utilities (ЖКУ-Москва) payment form.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::{OplataError, OplataResult};
use crate::wait::Waiter;

use super::Page;

/// Values for the payment form; empty fields are typed as-is so the form
/// validation renders its required-field errors.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    /// Payer code
    pub payer_code: String,
    /// Payment period
    pub period: String,
    /// Voluntary insurance amount
    pub insurance_amount: String,
    /// Payment amount
    pub amount: String,
    /// Whether the payer is registered with the bank
    pub registered: bool,
    /// Card number for the unregistered (with commission) path
    pub card_number: String,
}

impl PaymentForm {
    /// Create an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payer code
    #[must_use]
    pub fn with_payer_code(mut self, value: impl Into<String>) -> Self {
        self.payer_code = value.into();
        self
    }

    /// Set the payment period
    #[must_use]
    pub fn with_period(mut self, value: impl Into<String>) -> Self {
        self.period = value.into();
        self
    }

    /// Set the voluntary insurance amount
    #[must_use]
    pub fn with_insurance_amount(mut self, value: impl Into<String>) -> Self {
        self.insurance_amount = value.into();
        self
    }

    /// Set the payment amount
    #[must_use]
    pub fn with_amount(mut self, value: impl Into<String>) -> Self {
        self.amount = value.into();
        self
    }

    /// Mark the payer as registered (without commission path)
    #[must_use]
    pub const fn registered(mut self) -> Self {
        self.registered = true;
        self
    }

    /// Set the card number (unregistered path only)
    #[must_use]
    pub fn with_card_number(mut self, value: impl Into<String>) -> Self {
        self.card_number = value.into();
        self
    }
}

/// The ЖКУ-Москва provider page with the payment form.
#[derive(Debug, Clone)]
pub struct UtilitiesPage {
    waiter: Waiter,
    pay_tab: Locator,
    payer_code: Locator,
    period: Locator,
    insurance_amount: Locator,
    amount: Locator,
    submit: Locator,
    error_rows: Locator,
    without_commission: Locator,
    with_commission: Locator,
    card_number: Locator,
}

impl UtilitiesPage {
    /// URL of the payment tab
    pub const PAY_URL: &'static str = "https://www.tinkoff.ru/zhku-moskva/oplata/?tab=pay";

    /// Create the page object with an explicit wait configuration
    #[must_use]
    pub fn new(waiter: Waiter) -> Self {
        Self {
            waiter,
            pay_tab: Locator::css("a[href='/zhku-moskva/oplata/']"),
            payer_code: Locator::id("payerCode"),
            period: Locator::id("period"),
            insurance_amount: Locator::css(
                "div[data-qa-file='StatelessInput'] input[data-qa-file='StatelessInput']",
            ),
            amount: Locator::css(
                "div[data-qa-file='FormFieldSet'] input[data-qa-file='StatelessInput']",
            ),
            submit: Locator::css("button[data-qa-file='UIButton']"),
            error_rows: Locator::css("div[data-qa-file='UIFormRowError']"),
            without_commission: Locator::xpath("//*[.='без комиссии']"),
            with_commission: Locator::xpath("//*[.='без регистрации']"),
            card_number: Locator::css("input[name='cardNumber']"),
        }
    }

    /// Open the payment tab and wait for the form to render
    pub async fn open_pay_tab<D: PageDriver>(&self, driver: &mut D) -> OplataResult<()> {
        driver.click(&self.pay_tab).await?;
        self.waiter.until_clickable(driver, &self.period).await?;
        Ok(())
    }

    /// Fill and submit the payment form.
    ///
    /// With a non-empty amount the commission step follows: a registered
    /// payer confirms without commission; an unregistered payer takes the
    /// with-commission path and submits again. Typing the card number on the
    /// with-commission path is deliberately not implemented: the field is not
    /// reachable by keyboard on the target site and waiting for it times out
    /// (unresolved focus bug). A form carrying a card number fails loudly
    /// instead of completing the journey silently.
    pub async fn submit_form<D: PageDriver>(
        &self,
        driver: &mut D,
        form: &PaymentForm,
    ) -> OplataResult<()> {
        tracing::debug!(
            payer_code = %form.payer_code,
            period = %form.period,
            amount = %form.amount,
            "submitting payment form"
        );
        driver.type_text(&self.payer_code, &form.payer_code).await?;
        driver.type_text(&self.period, &form.period).await?;
        driver
            .type_text(&self.insurance_amount, &form.insurance_amount)
            .await?;
        driver.type_text(&self.amount, &form.amount).await?;
        driver.click(&self.submit).await?;

        if form.amount.is_empty() {
            return Ok(());
        }
        if form.registered {
            return driver.click(&self.without_commission).await;
        }
        if !form.card_number.is_empty() {
            return Err(OplataError::UnsupportedPath {
                message: "card number entry on the with-commission path".to_string(),
            });
        }
        driver.click(&self.with_commission).await?;
        driver.click(&self.submit).await
    }

    /// Validation error texts, in document order
    pub async fn validation_errors<D: PageDriver>(&self, driver: &D) -> OplataResult<Vec<String>> {
        let rows = driver.find_all(&self.error_rows).await?;
        Ok(rows.into_iter().map(|el| el.text).collect())
    }

    /// Locator of the payment tab link
    #[must_use]
    pub const fn pay_tab_link(&self) -> &Locator {
        &self.pay_tab
    }

    /// Locator of the period input
    #[must_use]
    pub const fn period_field(&self) -> &Locator {
        &self.period
    }

    /// Locator of the payer code input
    #[must_use]
    pub const fn payer_code_field(&self) -> &Locator {
        &self.payer_code
    }

    /// Locator of the insurance amount input
    #[must_use]
    pub const fn insurance_field(&self) -> &Locator {
        &self.insurance_amount
    }

    /// Locator of the amount input
    #[must_use]
    pub const fn amount_field(&self) -> &Locator {
        &self.amount
    }

    /// Locator of the submit button
    #[must_use]
    pub const fn submit_button(&self) -> &Locator {
        &self.submit
    }

    /// Locator of the validation error rows
    #[must_use]
    pub const fn error_list(&self) -> &Locator {
        &self.error_rows
    }

    /// Locator of the without-commission confirmation
    #[must_use]
    pub const fn without_commission_button(&self) -> &Locator {
        &self.without_commission
    }

    /// Locator of the with-commission confirmation
    #[must_use]
    pub const fn with_commission_button(&self) -> &Locator {
        &self.with_commission
    }
}

impl Page for UtilitiesPage {
    fn name(&self) -> &'static str {
        "utilities"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementHandle, MockDom, MockDriver, MockEffect};
    use crate::wait::WaitOptions;

    const URL: &str = UtilitiesPage::PAY_URL;

    fn page() -> UtilitiesPage {
        UtilitiesPage::new(Waiter::with_options(
            WaitOptions::new().with_timeout(100).with_poll_interval(10),
        ))
    }

    fn form_dom(page: &UtilitiesPage) -> MockDom {
        MockDom::new()
            .with(page.payer_code_field().clone(), ElementHandle::new("f1", "input"))
            .with(page.period_field().clone(), ElementHandle::new("f2", "input"))
            .with(page.insurance_field().clone(), ElementHandle::new("f3", "input"))
            .with(page.amount_field().clone(), ElementHandle::new("f4", "input"))
            .with(page.submit_button().clone(), ElementHandle::new("b1", "button"))
    }

    #[tokio::test]
    async fn test_submit_empty_form_renders_required_errors() {
        let page = page();
        let mut driver = MockDriver::new();
        driver.install(URL, form_dom(&page));
        driver.on_click(
            URL,
            page.submit_button().clone(),
            vec![MockEffect::Set(
                page.error_list().clone(),
                vec![
                    ElementHandle::new("e1", "div").with_text("Поле неправильно заполнено"),
                    ElementHandle::new("e2", "div").with_text("Поле обязательное"),
                    ElementHandle::new("e3", "div").with_text("Поле обязательное"),
                ],
            )],
        );
        driver.navigate(URL).await.unwrap();

        let form = PaymentForm::new().with_payer_code("111");
        page.submit_form(&mut driver, &form).await.unwrap();

        assert_eq!(
            page.validation_errors(&driver).await.unwrap(),
            vec![
                "Поле неправильно заполнено",
                "Поле обязательное",
                "Поле обязательное"
            ]
        );
        assert_eq!(driver.typed_into(page.payer_code_field()), vec!["111"]);
        assert_eq!(driver.typed_into(page.period_field()), vec![""]);
    }

    #[tokio::test]
    async fn test_registered_payer_confirms_without_commission() {
        let page = page();
        let mut driver = MockDriver::new();
        let dom = form_dom(&page).with(
            page.without_commission_button().clone(),
            ElementHandle::new("w1", "button").with_text("без комиссии"),
        );
        driver.install(URL, dom);
        driver.navigate(URL).await.unwrap();

        let form = PaymentForm::new()
            .with_payer_code("111")
            .with_period("12.2019")
            .with_amount("100")
            .registered();
        page.submit_form(&mut driver, &form).await.unwrap();
        assert!(driver
            .history()
            .iter()
            .any(|c| c.contains("без комиссии")));
    }

    #[tokio::test]
    async fn test_unregistered_payer_submits_again_after_commission_choice() {
        let page = page();
        let mut driver = MockDriver::new();
        let dom = form_dom(&page).with(
            page.with_commission_button().clone(),
            ElementHandle::new("w2", "button").with_text("без регистрации"),
        );
        driver.install(URL, dom);
        driver.navigate(URL).await.unwrap();

        let form = PaymentForm::new()
            .with_payer_code("111")
            .with_period("12.2019")
            .with_amount("100");
        page.submit_form(&mut driver, &form).await.unwrap();

        let submit_clicks = driver
            .history()
            .iter()
            .filter(|c| c.contains("UIButton"))
            .count();
        assert_eq!(submit_clicks, 2);
    }

    #[tokio::test]
    async fn test_card_number_path_is_refused() {
        let page = page();
        let mut driver = MockDriver::new();
        driver.install(URL, form_dom(&page));
        driver.navigate(URL).await.unwrap();

        let form = PaymentForm::new()
            .with_payer_code("111")
            .with_amount("100")
            .with_card_number("5536 9137 0000 0000");
        let err = page.submit_form(&mut driver, &form).await.unwrap_err();
        assert!(matches!(err, OplataError::UnsupportedPath { .. }));
    }

    #[tokio::test]
    async fn test_open_pay_tab_waits_for_form() {
        let page = page();
        let mut driver = MockDriver::new();
        let provider_url = "https://www.tinkoff.ru/zhku-moskva/";
        driver.install(
            provider_url,
            MockDom::new().with(page.pay_tab_link().clone(), ElementHandle::new("t1", "a")),
        );
        driver.install(URL, form_dom(&page));
        driver.on_click(
            provider_url,
            page.pay_tab_link().clone(),
            vec![MockEffect::Goto(URL.into())],
        );
        driver.navigate(provider_url).await.unwrap();

        page.open_pay_tab(&mut driver).await.unwrap();
        assert_eq!(driver.current_url().await.unwrap(), URL);
    }
}
