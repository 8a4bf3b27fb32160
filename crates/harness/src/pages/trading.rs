//! Trading page object.

use std::time::Instant;

use crate::dom::Locator;
use crate::driver::{ElementState, PageDriver};
use crate::error::{HarnessError, HarnessResult};
use crate::models::{Trade, TradeType};
use crate::testdata::STOCK_SYMBOLS;

/// Result of submitting a trade through the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeOutcome {
    /// The application confirmed the trade.
    Executed,
    /// The application refused it (insufficient funds/shares, validation).
    Rejected(String),
}

impl TradeOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, TradeOutcome::Executed)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, TradeOutcome::Rejected(_))
    }
}

pub struct TradingPage {
    driver: PageDriver,
    url: String,
}

impl TradingPage {
    pub fn new(driver: &PageDriver) -> Self {
        Self {
            url: driver.settings().trading_url(),
            driver: driver.clone(),
        }
    }

    fn header() -> Locator {
        Locator::text_any(&["trading", "trade stocks"])
    }

    fn trade_button() -> Locator {
        Locator::button("trade")
    }

    fn buy_button() -> Locator {
        Locator::button("BUY")
    }

    fn sell_button() -> Locator {
        Locator::button("SELL")
    }

    fn quantity_input() -> Locator {
        Locator::css(r#"input[type="number"]"#)
    }

    fn execute_button() -> Locator {
        Locator::button_any(&["execute", "buy", "sell", "confirm"])
    }

    fn cancel_button() -> Locator {
        Locator::button_any(&["cancel", "close"])
    }

    fn success_message() -> Locator {
        Locator::text_any(&["success", "completed", "executed"])
    }

    fn error_message() -> Locator {
        Locator::text_any(&["error", "failed", "insufficient"])
    }

    fn stock_symbols() -> Locator {
        Locator::text_any(STOCK_SYMBOLS)
    }

    pub async fn navigate(&self) -> HarnessResult<()> {
        self.driver.goto(&self.url).await?;
        self.driver.wait_for_url("/trading").await?;
        self.driver.expect_visible(&Self::header()).await
    }

    pub async fn stocks_displayed(&self) -> HarnessResult<bool> {
        Ok(self.driver.element_count(&Self::stock_symbols()).await? > 0)
    }

    pub async fn trade_buttons_visible(&self) -> HarnessResult<bool> {
        Ok(self.driver.element_count(&Self::trade_button()).await? > 0)
    }

    /// Open the trade modal for the first listed stock.
    pub async fn open_trade_modal(&self) -> HarnessResult<()> {
        self.driver.click(&Self::trade_button()).await?;
        self.driver
            .wait_for_element(&Self::buy_button(), ElementState::Visible)
            .await
    }

    /// Open the trade modal for a specific symbol.
    pub async fn open_trade_modal_for(&self, symbol: &str) -> HarnessResult<()> {
        self.driver
            .click(&Locator::near_button(symbol, "trade"))
            .await?;
        self.driver
            .wait_for_element(&Self::buy_button(), ElementState::Visible)
            .await
    }

    pub async fn select_buy(&self) -> HarnessResult<()> {
        self.driver.click(&Self::buy_button()).await
    }

    pub async fn select_sell(&self) -> HarnessResult<()> {
        self.driver.click(&Self::sell_button()).await
    }

    pub async fn fill_quantity(&self, quantity: u32) -> HarnessResult<()> {
        self.driver
            .fill(&Self::quantity_input(), &quantity.to_string())
            .await
    }

    pub async fn submit_trade(&self) -> HarnessResult<()> {
        self.driver.click(&Self::execute_button()).await
    }

    pub async fn cancel(&self) -> HarnessResult<()> {
        self.driver.click(&Self::cancel_button()).await
    }

    /// Execute a buy through the modal and report how the app responded.
    pub async fn execute_buy(&self, quantity: u32) -> HarnessResult<TradeOutcome> {
        self.open_trade_modal().await?;
        self.select_buy().await?;
        self.fill_quantity(quantity).await?;
        self.submit_trade().await?;
        self.await_outcome().await
    }

    pub async fn execute_sell(&self, quantity: u32) -> HarnessResult<TradeOutcome> {
        self.open_trade_modal().await?;
        self.select_sell().await?;
        self.fill_quantity(quantity).await?;
        self.submit_trade().await?;
        self.await_outcome().await
    }

    /// Execute a buy for a specific listed symbol.
    pub async fn execute_buy_for(&self, symbol: &str, quantity: u32) -> HarnessResult<TradeOutcome> {
        self.open_trade_modal_for(symbol).await?;
        self.select_buy().await?;
        self.fill_quantity(quantity).await?;
        self.submit_trade().await?;
        self.await_outcome().await
    }

    pub async fn execute(&self, trade: &Trade) -> HarnessResult<TradeOutcome> {
        match trade.trade_type {
            TradeType::Buy => self.execute_buy(trade.quantity).await,
            TradeType::Sell => self.execute_sell(trade.quantity).await,
        }
    }

    /// Poll for either the success or the error state after a submit.
    async fn await_outcome(&self) -> HarnessResult<TradeOutcome> {
        let start = Instant::now();
        loop {
            if self.driver.is_visible(&Self::error_message()).await? {
                let message = self
                    .driver
                    .get_text(&Self::error_message())
                    .await?
                    .unwrap_or_else(|| "trade rejected".to_string());
                return Ok(TradeOutcome::Rejected(message));
            }
            if self.driver.is_visible(&Self::success_message()).await? {
                return Ok(TradeOutcome::Executed);
            }
            if start.elapsed() >= self.driver.timeout() {
                return Err(HarnessError::Timeout {
                    what: "trade confirmation or rejection".to_string(),
                    ms: self.driver.timeout().as_millis() as u64,
                });
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    }

    // Assertions

    pub async fn expect_loaded(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::header()).await?;
        self.driver.expect_url("/trading").await
    }

    pub async fn expect_stocks_displayed(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::stock_symbols()).await
    }

    pub async fn expect_trade_modal_open(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::buy_button()).await?;
        self.driver.expect_visible(&Self::sell_button()).await
    }

    pub async fn expect_trade_form_elements(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::quantity_input()).await?;
        self.driver.expect_visible(&Self::execute_button()).await?;
        if self.driver.is_enabled(&Self::quantity_input()).await? {
            Ok(())
        } else {
            Err(HarnessError::Assertion(
                "quantity input is disabled in the trade form".into(),
            ))
        }
    }

    pub async fn expect_trade_modal_closed(&self) -> HarnessResult<()> {
        self.driver
            .wait_for_element(&Self::buy_button(), ElementState::Hidden)
            .await
    }
}
