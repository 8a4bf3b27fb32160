//! Portfolio scenarios: metrics, positions, and reload persistence.

use papertrade_harness::testdata::{DEFAULT_TRADE_QUANTITY, STOCK_SYMBOLS};
use papertrade_harness::{HarnessError, HarnessResult, TestCase, TestContext};

use super::case;

pub fn cases() -> Vec<TestCase> {
    vec![
        case!(portfolio_loads, Authenticated, [Portfolio, Smoke]),
        case!(metrics_displayed, Authenticated, [Portfolio]),
        case!(positions_or_empty_state, Authenticated, [Portfolio]),
        case!(bought_symbol_shows_as_position, Authenticated, [Portfolio]),
        case!(positions_offer_trade_buttons, Authenticated, [Portfolio]),
        case!(portfolio_persists_after_reload, Authenticated, [Portfolio, Regression]),
    ]
}

async fn portfolio_loads(ctx: &TestContext) -> HarnessResult<()> {
    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    portfolio.expect_loaded().await
}

async fn metrics_displayed(ctx: &TestContext) -> HarnessResult<()> {
    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    portfolio.expect_metrics_displayed().await
}

/// A fresh account shows the empty state; a traded one shows positions.
/// Either is valid, showing neither is not.
async fn positions_or_empty_state(ctx: &TestContext) -> HarnessResult<()> {
    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    if portfolio.positions_displayed().await? || portfolio.empty_state_displayed().await? {
        Ok(())
    } else {
        Err(HarnessError::Assertion(
            "portfolio shows neither positions nor an empty state".into(),
        ))
    }
}

async fn bought_symbol_shows_as_position(ctx: &TestContext) -> HarnessResult<()> {
    let symbol = STOCK_SYMBOLS[0];
    let trading = ctx.trading_page();
    trading.navigate().await?;
    let outcome = trading
        .execute_buy_for(symbol, DEFAULT_TRADE_QUANTITY)
        .await?;
    if !outcome.is_executed() {
        return Err(HarnessError::Assertion(format!(
            "setup buy for {symbol} did not execute: {outcome:?}"
        )));
    }

    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    if portfolio.symbol_held(symbol).await? {
        Ok(())
    } else {
        Err(HarnessError::Assertion(format!(
            "{symbol} missing from the portfolio after a confirmed buy"
        )))
    }
}

/// Held positions can be traded straight from the portfolio page.
async fn positions_offer_trade_buttons(ctx: &TestContext) -> HarnessResult<()> {
    let symbol = STOCK_SYMBOLS[1];
    let trading = ctx.trading_page();
    trading.navigate().await?;
    let outcome = trading
        .execute_buy_for(symbol, DEFAULT_TRADE_QUANTITY)
        .await?;
    if !outcome.is_executed() {
        return Err(HarnessError::Assertion(format!(
            "setup buy for {symbol} did not execute: {outcome:?}"
        )));
    }

    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    if portfolio.trade_buttons_visible().await? {
        Ok(())
    } else {
        Err(HarnessError::Assertion(
            "no trade buttons offered for held positions".into(),
        ))
    }
}

async fn portfolio_persists_after_reload(ctx: &TestContext) -> HarnessResult<()> {
    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    let before = portfolio.position_count().await?;

    portfolio.reload().await?;
    portfolio.expect_loaded().await?;
    let after = portfolio.position_count().await?;
    if before == after {
        Ok(())
    } else {
        Err(HarnessError::Assertion(format!(
            "position count changed across reload: {before} -> {after}"
        )))
    }
}
