//! Scenario case modules, one per functional area.

pub mod auth;
pub mod dashboard;
pub mod portfolio;
pub mod trade_history;
pub mod trading;
pub mod watchlists;

/// Build a [`TestCase`](papertrade_harness::TestCase) entry from an async
/// case function in the enclosing module.
macro_rules! case {
    ($name:ident, $auth:ident, [$($tag:ident),+ $(,)?]) => {{
        fn run(ctx: &papertrade_harness::TestContext) -> papertrade_harness::CaseFuture<'_> {
            Box::pin($name(ctx))
        }
        papertrade_harness::TestCase {
            name: stringify!($name),
            tags: &[$(papertrade_harness::Tag::$tag),+],
            auth: papertrade_harness::AuthMode::$auth,
            run,
        }
    }};
}

pub(crate) use case;

/// Short random suffix so mutating cases never collide across runs.
pub(crate) fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
