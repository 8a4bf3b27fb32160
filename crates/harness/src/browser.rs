//! Browser session lifecycle.
//!
//! One [`Session`] owns one Chrome process and one page. Sessions are
//! created per test and must never leak across tests; `Drop` aborts the
//! CDP event loop as a backstop for panicked paths.

use std::sync::Arc;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{HarnessError, HarnessResult};
use crate::settings::Settings;

pub struct Session {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    settings: Arc<Settings>,
}

impl Session {
    /// Launch a fresh browser honoring the configured headless flag and
    /// viewport, and open a blank page.
    pub async fn launch(settings: Arc<Settings>) -> HarnessResult<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.viewport_width, settings.viewport_height)
            .no_sandbox();
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| HarnessError::Internal(format!("browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // Drive the CDP event stream for the lifetime of the session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(settings.viewport_width as i64)
            .height(settings.viewport_height as i64)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(HarnessError::Internal)?;
        page.execute(metrics).await?;

        debug!(
            headless = settings.headless,
            width = settings.viewport_width,
            height = settings.viewport_height,
            "browser session launched"
        );

        Ok(Self {
            browser,
            handler_task,
            page,
            settings,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Shut the browser down. Errors are logged, not propagated: teardown
    /// must never mask the result of the test that owned this session.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("browser wait failed: {e}");
        }
        self.handler_task.abort();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
