//! Trading scenarios: modal flow, buys, sells, and rejection semantics.

use papertrade_harness::pages::TradeOutcome;
use papertrade_harness::testdata::{
    DEFAULT_TRADE_QUANTITY, SMALL_TRADE_QUANTITY, STOCK_SYMBOLS,
};
use papertrade_harness::{HarnessError, HarnessResult, TestCase, TestContext};

use super::case;

/// Far beyond what the seeded cash balance can cover.
const OVERSIZED_QUANTITY: u32 = 1_000_000;

pub fn cases() -> Vec<TestCase> {
    vec![
        case!(trading_page_loads, Authenticated, [Trading, Smoke]),
        case!(stocks_displayed, Authenticated, [Trading, Smoke]),
        case!(trade_buttons_visible, Authenticated, [Trading]),
        case!(trade_modal_opens, Authenticated, [Trading]),
        case!(trade_form_has_expected_elements, Authenticated, [Trading]),
        case!(cancel_closes_trade_modal, Authenticated, [Trading]),
        case!(buy_executes, Authenticated, [Trading, Regression]),
        case!(sell_after_buy_executes, Authenticated, [Trading]),
        case!(buy_sell_cycle_completes, Authenticated, [Trading, Regression]),
        case!(oversized_buy_is_rejected, Authenticated, [Trading, Regression]),
        case!(oversized_sell_is_rejected, Authenticated, [Trading, Regression]),
    ]
}

async fn trading_page_loads(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    trading.expect_loaded().await
}

async fn stocks_displayed(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    trading.expect_stocks_displayed().await
}

async fn trade_buttons_visible(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    if trading.trade_buttons_visible().await? {
        Ok(())
    } else {
        Err(HarnessError::Assertion(
            "expected a trade button per listed stock".into(),
        ))
    }
}

async fn trade_modal_opens(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    trading.open_trade_modal().await?;
    trading.expect_trade_modal_open().await
}

async fn trade_form_has_expected_elements(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    trading.open_trade_modal().await?;
    trading.select_buy().await?;
    trading.expect_trade_form_elements().await
}

async fn cancel_closes_trade_modal(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    trading.open_trade_modal().await?;
    trading.cancel().await?;
    trading.expect_trade_modal_closed().await
}

async fn buy_executes(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    expect_executed(trading.execute_buy(DEFAULT_TRADE_QUANTITY).await?)
}

/// Selling only succeeds against shares we hold, so buy first.
async fn sell_after_buy_executes(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    expect_executed(trading.execute_buy(DEFAULT_TRADE_QUANTITY).await?)?;
    trading.navigate().await?;
    expect_executed(trading.execute_sell(SMALL_TRADE_QUANTITY).await?)
}

async fn buy_sell_cycle_completes(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    let symbol = STOCK_SYMBOLS[0];
    trading.navigate().await?;
    expect_executed(
        trading
            .execute_buy_for(symbol, DEFAULT_TRADE_QUANTITY)
            .await?,
    )?;
    trading.navigate().await?;
    expect_executed(trading.execute_sell(DEFAULT_TRADE_QUANTITY).await?)?;
    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    portfolio.expect_loaded().await
}

/// A buy the account cannot afford must be refused and must leave the
/// portfolio exactly as it was.
async fn oversized_buy_is_rejected(ctx: &TestContext) -> HarnessResult<()> {
    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    let positions_before = portfolio.position_count().await?;

    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    let cash_before = dashboard.cash_balance().await?;

    let trading = ctx.trading_page();
    trading.navigate().await?;
    let outcome = trading.execute_buy(OVERSIZED_QUANTITY).await?;
    if !outcome.is_rejected() {
        return Err(HarnessError::Assertion(format!(
            "oversized buy was not rejected: {outcome:?}"
        )));
    }

    dashboard.navigate().await?;
    let cash_after = dashboard.cash_balance().await?;
    if cash_before != cash_after {
        return Err(HarnessError::Assertion(format!(
            "cash balance changed after a rejected buy: {cash_before:?} -> {cash_after:?}"
        )));
    }
    portfolio.navigate().await?;
    let positions_after = portfolio.position_count().await?;
    if positions_before != positions_after {
        return Err(HarnessError::Assertion(format!(
            "position count changed after a rejected buy: {positions_before} -> {positions_after}"
        )));
    }
    Ok(())
}

/// Selling more shares than the account holds must be refused and must
/// leave the positions exactly as they were.
async fn oversized_sell_is_rejected(ctx: &TestContext) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    expect_executed(trading.execute_buy(SMALL_TRADE_QUANTITY).await?)?;

    let portfolio = ctx.portfolio_page();
    portfolio.navigate().await?;
    let positions_before = portfolio.position_count().await?;

    trading.navigate().await?;
    let outcome = trading.execute_sell(OVERSIZED_QUANTITY).await?;
    if !outcome.is_rejected() {
        return Err(HarnessError::Assertion(format!(
            "selling more shares than held was not rejected: {outcome:?}"
        )));
    }

    portfolio.navigate().await?;
    let positions_after = portfolio.position_count().await?;
    if positions_before != positions_after {
        return Err(HarnessError::Assertion(format!(
            "position count changed after a rejected sell: {positions_before} -> {positions_after}"
        )));
    }
    Ok(())
}

fn expect_executed(outcome: TradeOutcome) -> HarnessResult<()> {
    match outcome {
        TradeOutcome::Executed => Ok(()),
        TradeOutcome::Rejected(reason) => Err(HarnessError::Assertion(format!(
            "trade unexpectedly rejected: {reason}"
        ))),
    }
}
