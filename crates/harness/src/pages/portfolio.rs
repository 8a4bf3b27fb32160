//! Portfolio page object.

use crate::dom::Locator;
use crate::driver::{extract_number_from_text, PageDriver};
use crate::error::{HarnessError, HarnessResult};
use crate::testdata::STOCK_SYMBOLS;

pub struct PortfolioPage {
    driver: PageDriver,
    url: String,
}

impl PortfolioPage {
    pub fn new(driver: &PageDriver) -> Self {
        Self {
            url: driver.settings().portfolio_url(),
            driver: driver.clone(),
        }
    }

    fn header() -> Locator {
        Locator::text("portfolio")
    }

    fn position_symbols() -> Locator {
        Locator::text_any(STOCK_SYMBOLS)
    }

    fn metrics() -> Locator {
        Locator::text_any(&["total value", "portfolio value"])
    }

    fn empty_state() -> Locator {
        Locator::text_any(&["no positions", "no holdings", "empty"])
    }

    fn trade_button() -> Locator {
        Locator::button("trade")
    }

    pub async fn navigate(&self) -> HarnessResult<()> {
        self.driver.goto(&self.url).await?;
        self.driver.wait_for_url("/portfolio").await?;
        self.driver.expect_visible(&Self::header()).await
    }

    pub async fn reload(&self) -> HarnessResult<()> {
        self.driver.reload().await
    }

    pub async fn positions_displayed(&self) -> HarnessResult<bool> {
        Ok(self.driver.element_count(&Self::position_symbols()).await? > 0)
    }

    pub async fn position_count(&self) -> HarnessResult<usize> {
        self.driver.element_count(&Self::position_symbols()).await
    }

    pub async fn symbol_held(&self, symbol: &str) -> HarnessResult<bool> {
        self.driver.is_visible(&Locator::text(symbol)).await
    }

    pub async fn empty_state_displayed(&self) -> HarnessResult<bool> {
        self.driver.is_visible(&Self::empty_state()).await
    }

    pub async fn metrics_displayed(&self) -> HarnessResult<bool> {
        self.driver.is_visible(&Self::metrics()).await
    }

    pub async fn portfolio_value(&self) -> HarnessResult<Option<f64>> {
        let text = self.driver.get_text(&Self::metrics()).await?;
        Ok(text.as_deref().and_then(extract_number_from_text))
    }

    pub async fn trade_buttons_visible(&self) -> HarnessResult<bool> {
        Ok(self.driver.element_count(&Self::trade_button()).await? > 0)
    }

    // Assertions

    pub async fn expect_loaded(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::header()).await?;
        self.driver.expect_url("/portfolio").await
    }

    pub async fn expect_positions_displayed(&self) -> HarnessResult<()> {
        if self.positions_displayed().await? {
            Ok(())
        } else {
            Err(HarnessError::Assertion(
                "expected at least one position on the portfolio page".into(),
            ))
        }
    }

    pub async fn expect_metrics_displayed(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::metrics()).await
    }
}
