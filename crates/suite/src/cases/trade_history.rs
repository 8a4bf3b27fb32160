//! Trade history scenarios. Grouped under the trading tag; the history
//! page is the read side of the trade flow.

use papertrade_harness::testdata::{DEFAULT_TRADE_QUANTITY, STOCK_SYMBOLS};
use papertrade_harness::{Capability, HarnessError, HarnessResult, TestCase, TestContext, TradeType};

use super::case;

pub fn cases() -> Vec<TestCase> {
    vec![
        case!(trade_history_loads, Authenticated, [Trading, Smoke]),
        case!(trades_or_empty_state, Authenticated, [Trading]),
        case!(trade_rows_show_details, Authenticated, [Trading]),
        case!(trade_rows_show_timestamps, Authenticated, [Trading]),
        case!(sorting_works_if_present, Authenticated, [Trading]),
        case!(pagination_works_if_present, Authenticated, [Trading]),
        case!(history_persists_after_reload, Authenticated, [Trading, Regression]),
        case!(buy_appears_in_history, Authenticated, [Trading, Regression]),
    ]
}

/// Make sure at least one trade exists before inspecting the history.
async fn ensure_a_trade_exists(ctx: &TestContext, symbol: &str) -> HarnessResult<()> {
    let trading = ctx.trading_page();
    trading.navigate().await?;
    let outcome = trading
        .execute_buy_for(symbol, DEFAULT_TRADE_QUANTITY)
        .await?;
    if outcome.is_executed() {
        Ok(())
    } else {
        Err(HarnessError::Assertion(format!(
            "setup buy for {symbol} did not execute: {outcome:?}"
        )))
    }
}

async fn trade_history_loads(ctx: &TestContext) -> HarnessResult<()> {
    let history = ctx.trade_history_page();
    history.navigate().await?;
    history.expect_loaded().await
}

async fn trades_or_empty_state(ctx: &TestContext) -> HarnessResult<()> {
    let history = ctx.trade_history_page();
    history.navigate().await?;
    history.expect_trades_or_empty_state().await
}

async fn trade_rows_show_details(ctx: &TestContext) -> HarnessResult<()> {
    ensure_a_trade_exists(ctx, STOCK_SYMBOLS[0]).await?;
    let history = ctx.trade_history_page();
    history.navigate().await?;
    history.expect_trades_displayed().await?;
    history.expect_symbols_displayed().await
}

async fn trade_rows_show_timestamps(ctx: &TestContext) -> HarnessResult<()> {
    ensure_a_trade_exists(ctx, STOCK_SYMBOLS[0]).await?;
    let history = ctx.trade_history_page();
    history.navigate().await?;
    if history.timestamps_displayed().await? {
        Ok(())
    } else {
        Err(HarnessError::Assertion(
            "no timestamps visible in the trade history".into(),
        ))
    }
}

async fn sorting_works_if_present(ctx: &TestContext) -> HarnessResult<()> {
    ensure_a_trade_exists(ctx, STOCK_SYMBOLS[0]).await?;
    let history = ctx.trade_history_page();
    history.navigate().await?;
    expect_capability("sorting", history.sorting().await?)
}

async fn pagination_works_if_present(ctx: &TestContext) -> HarnessResult<()> {
    let history = ctx.trade_history_page();
    history.navigate().await?;
    expect_capability("pagination", history.pagination().await?)
}

async fn history_persists_after_reload(ctx: &TestContext) -> HarnessResult<()> {
    ensure_a_trade_exists(ctx, STOCK_SYMBOLS[0]).await?;
    let history = ctx.trade_history_page();
    history.navigate().await?;
    let before = history.trade_count().await?;

    history.reload().await?;
    history.expect_loaded().await?;
    let after = history.trade_count().await?;
    if before == after {
        Ok(())
    } else {
        Err(HarnessError::Assertion(format!(
            "trade count changed across reload: {before} -> {after}"
        )))
    }
}

async fn buy_appears_in_history(ctx: &TestContext) -> HarnessResult<()> {
    let symbol = STOCK_SYMBOLS[1];
    ensure_a_trade_exists(ctx, symbol).await?;
    let history = ctx.trade_history_page();
    history.navigate().await?;
    history.expect_trade_appears(TradeType::Buy, symbol).await
}

/// Optional UI is allowed to be absent, never broken.
fn expect_capability(what: &str, capability: Capability) -> HarnessResult<()> {
    match capability {
        Capability::Verified | Capability::Absent => Ok(()),
        Capability::Failed(reason) => Err(HarnessError::Assertion(format!(
            "{what} is present but broken: {reason}"
        ))),
    }
}
