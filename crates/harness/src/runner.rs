//! Case registry types and the suite executor.
//!
//! Cases are plain fn pointers returning boxed futures, so the registry
//! is a flat `Vec<TestCase>` that can be filtered, listed, and executed
//! sequentially or across a bounded pool of browsers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::error::{HarnessError, HarnessResult};
use crate::fixture::TestContext;
use crate::report::{CaseOutcome, SuiteReport};
use crate::settings::Settings;

/// Functional area a case belongs to. A case may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Smoke,
    Auth,
    Trading,
    Portfolio,
    Watchlist,
    Dashboard,
    Regression,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Smoke => "smoke",
            Tag::Auth => "auth",
            Tag::Trading => "trading",
            Tag::Portfolio => "portfolio",
            Tag::Watchlist => "watchlist",
            Tag::Dashboard => "dashboard",
            Tag::Regression => "regression",
        }
    }
}

/// What the fixture provides before the case body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// A fresh browser, not logged in.
    Fresh,
    /// A browser already logged in as the primary test user.
    Authenticated,
}

pub type CaseFuture<'a> = Pin<Box<dyn Future<Output = HarnessResult<()>> + Send + 'a>>;
pub type CaseFn = for<'a> fn(&'a TestContext) -> CaseFuture<'a>;

#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub tags: &'static [Tag],
    pub auth: AuthMode,
    pub run: CaseFn,
}

impl TestCase {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("auth", &self.auth)
            .finish()
    }
}

/// Keep only cases carrying `tag`; `None` keeps everything.
pub fn filter_by_tag(cases: Vec<TestCase>, tag: Option<Tag>) -> Vec<TestCase> {
    match tag {
        None => cases,
        Some(tag) => cases.into_iter().filter(|c| c.has_tag(tag)).collect(),
    }
}

/// Keep only cases whose name contains `needle`.
pub fn filter_by_name(cases: Vec<TestCase>, needle: &str) -> Vec<TestCase> {
    cases
        .into_iter()
        .filter(|c| c.name.contains(needle))
        .collect()
}

pub struct Runner {
    settings: Arc<Settings>,
    jobs: usize,
}

impl Runner {
    pub fn new(settings: Arc<Settings>, jobs: usize) -> Self {
        Self {
            settings,
            jobs: jobs.max(1),
        }
    }

    /// Execute every case, each in its own browser, and collect a report.
    ///
    /// Individual case failures are recorded, not propagated; the only
    /// error path out of here is an empty selection.
    pub async fn run(&self, cases: Vec<TestCase>) -> HarnessResult<SuiteReport> {
        if cases.is_empty() {
            return Err(HarnessError::Precondition(
                "no test cases matched the selection".to_string(),
            ));
        }

        let started_at = Utc::now();
        let start = Instant::now();
        info!(total = cases.len(), jobs = self.jobs, "starting suite");

        let results = if self.jobs == 1 {
            let mut results = Vec::with_capacity(cases.len());
            for case in cases {
                results.push(run_case(case, Arc::clone(&self.settings)).await);
            }
            results
        } else {
            self.run_parallel(cases).await
        };

        let report = SuiteReport::new(started_at, start.elapsed().as_millis() as u64, results);
        info!(
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "suite finished"
        );
        Ok(report)
    }

    async fn run_parallel(&self, cases: Vec<TestCase>) -> Vec<CaseOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let mut set = JoinSet::new();

        for (index, case) in cases.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let settings = Arc::clone(&self.settings);
            set.spawn(async move {
                // Closed only on runner drop, which cannot happen while we await.
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                (index, run_case(case, settings).await)
            });
        }

        let mut indexed = Vec::with_capacity(set.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(entry) => indexed.push(entry),
                Err(e) => error!("test task panicked: {e}"),
            }
        }
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

/// Run one case in its own browser, guaranteeing teardown on every path.
async fn run_case(case: TestCase, settings: Arc<Settings>) -> CaseOutcome {
    let start = Instant::now();

    let ctx = match case.auth {
        AuthMode::Fresh => TestContext::new(settings).await,
        AuthMode::Authenticated => TestContext::authenticated(settings).await,
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("✗ {} (fixture): {e}", case.name);
            return CaseOutcome {
                name: case.name.to_string(),
                passed: false,
                duration_ms: start.elapsed().as_millis() as u64,
                error: Some(format!("fixture setup failed: {e}")),
                screenshot: None,
            };
        }
    };

    let result = (case.run)(&ctx).await;

    let screenshot = match &result {
        Ok(()) => None,
        Err(_) => {
            let shot = ctx.driver().take_screenshot(&sanitize_name(case.name)).await;
            if shot.is_none() {
                warn!("no failure screenshot captured for {}", case.name);
            }
            shot
        }
    };
    ctx.teardown().await;

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(()) => {
            info!("✓ {} ({duration_ms} ms)", case.name);
            CaseOutcome {
                name: case.name.to_string(),
                passed: true,
                duration_ms,
                error: None,
                screenshot: None,
            }
        }
        Err(e) => {
            error!("✗ {} ({duration_ms} ms): {e}", case.name);
            CaseOutcome {
                name: case.name.to_string(),
                passed: false,
                duration_ms,
                error: Some(e.to_string()),
                screenshot: screenshot.map(|p| p.display().to_string()),
            }
        }
    }
}

/// Case names become screenshot file stems.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::TestContext;

    fn noop(_ctx: &TestContext) -> CaseFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    fn case(name: &'static str, tags: &'static [Tag]) -> TestCase {
        TestCase {
            name,
            tags,
            auth: AuthMode::Fresh,
            run: noop,
        }
    }

    #[test]
    fn tag_filter_keeps_matching_cases() {
        let cases = vec![
            case("login_ok", &[Tag::Auth, Tag::Smoke]),
            case("buy_stock", &[Tag::Trading]),
        ];
        let kept = filter_by_tag(cases, Some(Tag::Auth));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "login_ok");
    }

    #[test]
    fn no_tag_keeps_everything() {
        let cases = vec![case("a", &[Tag::Smoke]), case("b", &[Tag::Trading])];
        assert_eq!(filter_by_tag(cases, None).len(), 2);
    }

    #[test]
    fn name_filter_is_substring_match() {
        let cases = vec![
            case("login_with_valid_credentials", &[Tag::Auth]),
            case("buy_stock", &[Tag::Trading]),
        ];
        let kept = filter_by_name(cases, "login");
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn sanitized_names_are_safe_file_stems() {
        assert_eq!(sanitize_name("buy stock (AAPL)"), "buy-stock--AAPL");
        assert_eq!(sanitize_name("plain"), "plain");
    }
}
