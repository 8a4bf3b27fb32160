//! Shared driver-interaction helper injected into every page object.
//!
//! This is the operation vocabulary page objects compose: navigation,
//! actionability-gated interaction, waits, assertion primitives, and a few
//! utility accessors. Page objects hold a cloned `PageDriver` rather than
//! inheriting from a base page.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::dom::{
    js_click, js_count, js_exists, js_fill, js_is_actionable, js_is_enabled, js_is_visible,
    js_local_storage_clear, js_local_storage_get, js_text, js_value, Locator,
};
use crate::error::{HarnessError, HarnessResult};
use crate::settings::Settings;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Desired element state for waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Visible,
    Hidden,
}

#[derive(Clone)]
pub struct PageDriver {
    page: Page,
    settings: Arc<Settings>,
    timeout: Duration,
    slow_mo: Duration,
}

impl PageDriver {
    pub fn new(page: Page, settings: Arc<Settings>) -> Self {
        let timeout = settings.timeout_duration();
        let slow_mo = settings.slow_mo_duration();
        Self {
            page,
            settings,
            timeout,
            slow_mo,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn eval<T: DeserializeOwned>(&self, js: String) -> HarnessResult<T> {
        let result = self.page.evaluate(js).await?;
        from_evaluated(result.value())
    }

    async fn pace(&self) {
        if !self.slow_mo.is_zero() {
            tokio::time::sleep(self.slow_mo).await;
        }
    }

    /// Poll `probe` until it returns true or the budget elapses.
    async fn wait_until<F, Fut>(
        &self,
        what: &str,
        budget: Duration,
        mut probe: F,
    ) -> HarnessResult<()>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = HarnessResult<bool>>,
    {
        let start = Instant::now();
        loop {
            if probe().await? {
                return Ok(());
            }
            if start.elapsed() >= budget {
                return Err(HarnessError::Timeout {
                    what: what.to_string(),
                    ms: budget.as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    // Navigation

    /// Navigate and wait for the document to finish loading.
    pub async fn goto(&self, url: &str) -> HarnessResult<()> {
        debug!(url, "goto");
        let nav = tokio::time::timeout(self.timeout, self.page.goto(url));
        match nav.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(HarnessError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(HarnessError::Navigation {
                    url: url.to_string(),
                    reason: format!("no response within {}ms", self.timeout.as_millis()),
                })
            }
        }
        self.wait_until("document load", self.timeout, || async {
            self.eval::<String>("document.readyState".to_string())
                .await
                .map(|state| state == "complete")
        })
        .await
        .map_err(|_| HarnessError::Navigation {
            url: url.to_string(),
            reason: format!("load did not complete within {}ms", self.timeout.as_millis()),
        })?;
        self.pace().await;
        Ok(())
    }

    pub async fn reload(&self) -> HarnessResult<()> {
        self.page.reload().await?;
        self.wait_until("document load after reload", self.timeout, || async {
            self.eval::<String>("document.readyState".to_string())
                .await
                .map(|state| state == "complete")
        })
        .await?;
        self.pace().await;
        Ok(())
    }

    pub async fn current_url(&self) -> HarnessResult<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    /// Wait until the page URL contains `fragment`.
    pub async fn wait_for_url(&self, fragment: &str) -> HarnessResult<()> {
        self.wait_until(
            &format!("url containing '{fragment}'"),
            self.timeout,
            || async { Ok(self.current_url().await?.contains(fragment)) },
        )
        .await
    }

    // Element interaction

    /// Wait until the element is actionable, then click it.
    pub async fn click(&self, locator: &Locator) -> HarnessResult<()> {
        self.wait_actionable(locator).await?;
        let clicked: bool = self.eval(js_click(locator)).await?;
        if !clicked {
            return Err(HarnessError::ElementNotFound(locator.to_string()));
        }
        self.pace().await;
        Ok(())
    }

    /// Wait until the input is actionable, then set its value.
    pub async fn fill(&self, locator: &Locator, value: &str) -> HarnessResult<()> {
        self.wait_actionable(locator).await?;
        let filled: bool = self.eval(js_fill(locator, value)).await?;
        if !filled {
            return Err(HarnessError::ElementNotFound(locator.to_string()));
        }
        self.pace().await;
        Ok(())
    }

    async fn wait_actionable(&self, locator: &Locator) -> HarnessResult<()> {
        let wait = self
            .wait_until(&locator.to_string(), self.timeout, || async {
                self.eval::<bool>(js_is_actionable(locator)).await
            })
            .await;
        match wait {
            Ok(()) => Ok(()),
            Err(HarnessError::Timeout { .. }) => {
                // Distinguish "never appeared" from "present but inert".
                if self.exists(locator).await? {
                    Err(HarnessError::ElementNotActionable(locator.to_string()))
                } else {
                    Err(HarnessError::ElementNotFound(locator.to_string()))
                }
            }
            Err(other) => Err(other),
        }
    }

    // Read accessors. These do not fail when the element is absent.

    pub async fn get_text(&self, locator: &Locator) -> HarnessResult<Option<String>> {
        let text: Option<String> = self.eval(js_text(locator)).await?;
        Ok(text.map(|t| t.trim().to_string()))
    }

    pub async fn get_value(&self, locator: &Locator) -> HarnessResult<Option<String>> {
        self.eval(js_value(locator)).await
    }

    pub async fn exists(&self, locator: &Locator) -> HarnessResult<bool> {
        self.eval(js_exists(locator)).await
    }

    pub async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool> {
        self.eval(js_is_visible(locator)).await
    }

    /// False when the element is absent or carries the disabled attribute.
    pub async fn is_enabled(&self, locator: &Locator) -> HarnessResult<bool> {
        self.eval(js_is_enabled(locator)).await
    }

    pub async fn element_count(&self, locator: &Locator) -> HarnessResult<usize> {
        self.eval(js_count(locator)).await
    }

    // Waits

    pub async fn wait_for_element(
        &self,
        locator: &Locator,
        state: ElementState,
    ) -> HarnessResult<()> {
        let what = format!(
            "{locator} to become {}",
            match state {
                ElementState::Visible => "visible",
                ElementState::Hidden => "hidden",
            }
        );
        self.wait_until(&what, self.timeout, || async {
            let visible = self.eval::<bool>(js_is_visible(locator)).await?;
            Ok(match state {
                ElementState::Visible => visible,
                ElementState::Hidden => !visible,
            })
        })
        .await
    }

    // Assertion primitives

    pub async fn expect_visible(&self, locator: &Locator) -> HarnessResult<()> {
        self.wait_for_element(locator, ElementState::Visible)
            .await
            .map_err(|_| {
                HarnessError::Assertion(format!(
                    "expected {locator} to be visible within {}ms",
                    self.timeout.as_millis()
                ))
            })
    }

    pub async fn expect_hidden(&self, locator: &Locator) -> HarnessResult<()> {
        self.wait_for_element(locator, ElementState::Hidden)
            .await
            .map_err(|_| {
                HarnessError::Assertion(format!(
                    "expected {locator} to be hidden within {}ms",
                    self.timeout.as_millis()
                ))
            })
    }

    /// Assert the element's text contains `expected`.
    pub async fn expect_text(&self, locator: &Locator, expected: &str) -> HarnessResult<()> {
        let start = Instant::now();
        loop {
            let seen = self.get_text(locator).await?;
            if seen
                .as_deref()
                .map(|t| t.contains(expected))
                .unwrap_or(false)
            {
                return Ok(());
            }
            if start.elapsed() >= self.timeout {
                return Err(HarnessError::Assertion(format!(
                    "expected {locator} to contain '{expected}', last saw {seen:?}"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Assert the page URL contains `fragment`.
    pub async fn expect_url(&self, fragment: &str) -> HarnessResult<()> {
        match self.wait_for_url(fragment).await {
            Ok(()) => Ok(()),
            Err(HarnessError::Timeout { .. }) => {
                let actual = self.current_url().await.unwrap_or_default();
                Err(HarnessError::Assertion(format!(
                    "expected url containing '{fragment}', got '{actual}'"
                )))
            }
            Err(other) => Err(other),
        }
    }

    // Screenshots: best effort, never escalated.

    pub async fn take_screenshot(&self, name: &str) -> Option<PathBuf> {
        let dir = PathBuf::from(&self.settings.screenshot_dir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!("screenshot dir creation failed: {e}");
            return None;
        }
        let path = dir.join(format!("{name}.png"));
        match self
            .page
            .save_screenshot(ScreenshotParams::builder().build(), &path)
            .await
        {
            Ok(_) => Some(path),
            Err(e) => {
                warn!("screenshot '{name}' failed: {e}");
                None
            }
        }
    }

    // Local storage

    pub async fn get_local_storage_item(&self, key: &str) -> HarnessResult<Option<String>> {
        self.eval(js_local_storage_get(key)).await
    }

    pub async fn clear_local_storage(&self) -> HarnessResult<()> {
        self.page.evaluate(js_local_storage_clear()).await?;
        Ok(())
    }
}

/// Deserialize a successful evaluation, mapping a JS `null` result to JSON
/// null instead of a missing value.
///
/// CDP reports `null` as a remote object with no `value` payload; treating
/// that as an error would make absent-element reads (`get_text`,
/// `localStorage.getItem`) fail instead of returning `None`.
fn from_evaluated<T: DeserializeOwned>(value: Option<&serde_json::Value>) -> HarnessResult<T> {
    let value = value.cloned().unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(value)?)
}

/// Parse the first numeric token out of rendered text like `$1,234.56`.
///
/// Currency symbols and thousands separators are stripped; `None` when the
/// text carries no number at all.
pub fn extract_number_from_text(text: &str) -> Option<f64> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("static regex"));
    let cleaned = text.replace(',', "");
    re.find(&cleaned)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("$1,234.56", Some(1234.56); "currency with thousands separator")]
    #[test_case("Cash Balance: $500", Some(500.0); "label prefix")]
    #[test_case("-2.5%", Some(-2.5); "negative percentage")]
    #[test_case("1000", Some(1000.0); "bare integer")]
    #[test_case("€9.99", Some(9.99); "euro symbol")]
    #[test_case("no numbers here", None; "no numeric token")]
    #[test_case("", None; "empty string")]
    fn extracts_first_numeric_token(text: &str, expected: Option<f64>) {
        assert_eq!(extract_number_from_text(text), expected);
    }

    #[test]
    fn extraction_takes_the_first_token_only() {
        assert_eq!(extract_number_from_text("$100 of $250"), Some(100.0));
    }

    #[test]
    fn js_null_results_read_as_none() {
        // localStorage.getItem and absent-element text reads yield null,
        // which CDP reports as a result with no value payload.
        let text: Option<String> = from_evaluated(None).unwrap();
        assert_eq!(text, None);
    }

    #[test]
    fn present_values_still_deserialize() {
        let token = serde_json::json!("abc123");
        let text: Option<String> = from_evaluated(Some(&token)).unwrap();
        assert_eq!(text.as_deref(), Some("abc123"));

        let count = serde_json::json!(3);
        let n: usize = from_evaluated(Some(&count)).unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn null_into_a_non_nullable_type_is_an_error() {
        assert!(from_evaluated::<usize>(None).is_err());
    }
}
