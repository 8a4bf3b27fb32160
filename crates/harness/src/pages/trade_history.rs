//! Trade history page object.

use crate::capability::Capability;
use crate::dom::Locator;
use crate::driver::PageDriver;
use crate::error::{HarnessError, HarnessResult};
use crate::models::TradeType;
use crate::testdata::STOCK_SYMBOLS;

pub struct TradeHistoryPage {
    driver: PageDriver,
    url: String,
}

impl TradeHistoryPage {
    pub fn new(driver: &PageDriver) -> Self {
        Self {
            url: driver.settings().trades_url(),
            driver: driver.clone(),
        }
    }

    fn header() -> Locator {
        Locator::text_any(&["trade history", "trades"])
    }

    fn trade_type_cells() -> Locator {
        Locator::text_any(&["BUY", "SELL"])
    }

    fn symbols() -> Locator {
        Locator::text_any(STOCK_SYMBOLS)
    }

    fn timestamps() -> Locator {
        Locator::text_any(&["ago", "AM", "PM"])
    }

    fn empty_state() -> Locator {
        Locator::text_any(&["no trades", "no history", "empty"])
    }

    fn sort_button() -> Locator {
        Locator::button_any(&["sort", "date"])
    }

    // Named *_controls to stay clear of the probe method below.
    fn pagination_controls() -> Locator {
        Locator::text_any(&["page", "next", "previous"])
    }

    pub async fn navigate(&self) -> HarnessResult<()> {
        self.driver.goto(&self.url).await?;
        self.driver.wait_for_url("/trades").await?;
        self.driver.expect_visible(&Self::header()).await
    }

    pub async fn reload(&self) -> HarnessResult<()> {
        self.driver.reload().await
    }

    pub async fn trades_displayed(&self) -> HarnessResult<bool> {
        Ok(self.driver.element_count(&Self::trade_type_cells()).await? > 0)
    }

    pub async fn trade_count(&self) -> HarnessResult<usize> {
        self.driver.element_count(&Self::trade_type_cells()).await
    }

    pub async fn empty_state_displayed(&self) -> HarnessResult<bool> {
        self.driver.is_visible(&Self::empty_state()).await
    }

    pub async fn timestamps_displayed(&self) -> HarnessResult<bool> {
        Ok(self.driver.element_count(&Self::timestamps()).await? > 0)
    }

    pub async fn symbol_displayed(&self, symbol: &str) -> HarnessResult<bool> {
        self.driver.is_visible(&Locator::text(symbol)).await
    }

    /// Probe the optional sort control: clicking it must not lose the rows.
    pub async fn sorting(&self) -> HarnessResult<Capability> {
        if !self.driver.exists(&Self::sort_button()).await? {
            return Ok(Capability::Absent);
        }
        let before = self.trade_count().await?;
        self.driver.click(&Self::sort_button()).await?;
        let after = self.trade_count().await?;
        if before > 0 && after == 0 {
            Ok(Capability::Failed(format!(
                "sorting dropped all {before} displayed trades"
            )))
        } else {
            Ok(Capability::Verified)
        }
    }

    /// Probe the optional pagination controls.
    pub async fn pagination(&self) -> HarnessResult<Capability> {
        if !self.driver.exists(&Self::pagination_controls()).await? {
            return Ok(Capability::Absent);
        }
        if self.driver.is_visible(&Self::pagination_controls()).await? {
            Ok(Capability::Verified)
        } else {
            Ok(Capability::Failed(
                "pagination controls exist but are not visible".into(),
            ))
        }
    }

    // Assertions

    pub async fn expect_loaded(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::header()).await?;
        self.driver.expect_url("/trades").await
    }

    pub async fn expect_trades_displayed(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::trade_type_cells()).await
    }

    pub async fn expect_trade_appears(
        &self,
        trade_type: TradeType,
        symbol: &str,
    ) -> HarnessResult<()> {
        self.driver
            .expect_visible(&Locator::text(trade_type.as_str()))
            .await?;
        self.driver.expect_visible(&Locator::text(symbol)).await
    }

    pub async fn expect_trades_or_empty_state(&self) -> HarnessResult<()> {
        if self.trades_displayed().await? || self.empty_state_displayed().await? {
            Ok(())
        } else {
            Err(HarnessError::Assertion(
                "expected either trade rows or an empty state on the trade history page".into(),
            ))
        }
    }

    pub async fn expect_symbols_displayed(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::symbols()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The controls locator coexists with the same-named probe method.
    #[test]
    fn pagination_controls_locator_matches_paging_labels() {
        assert_eq!(
            TradeHistoryPage::pagination_controls().to_string(),
            "text~/page|next|previous/i"
        );
    }
}
