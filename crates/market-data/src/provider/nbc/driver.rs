//! Headless browser driver for the NBC rate page.
//!
//! The page only renders the current table after its form is submitted, and
//! it ignores values assigned directly to the date input. The driver therefore
//! clears the input with real key events before clicking submit.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tracing::{debug, warn};

use super::{DATE_INPUT_SELECTOR, SUBMIT_SELECTOR, TABLE_READY_SELECTOR};
use crate::errors::MarketDataError;

/// Default time to wait for the result table after submitting the form
const DEFAULT_TABLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default time to wait for the page's DOM to be parsed
const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay between polls for the result table
const TABLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// CDP modifier bit for the Control key
const CTRL_MODIFIER: i64 = 2;

/// Settings for launching and driving the browser
#[derive(Clone, Debug)]
pub struct PageDriverConfig {
    /// Maximum time to wait for the result table to appear
    pub table_timeout: Duration,
    /// Maximum time to wait for DOMContentLoaded after navigating
    pub navigation_timeout: Duration,
    /// Browser binary to launch; auto-detected when `None`
    pub chrome_executable: Option<PathBuf>,
    /// Launch Chromium with `--no-sandbox` (needed as root in containers)
    pub no_sandbox: bool,
    /// Viewport width in CSS pixels
    pub viewport_width: u32,
    /// Viewport height in CSS pixels
    pub viewport_height: u32,
}

impl Default for PageDriverConfig {
    fn default() -> Self {
        Self {
            table_timeout: DEFAULT_TABLE_TIMEOUT,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            chrome_executable: None,
            no_sandbox: false,
            viewport_width: 1080,
            viewport_height: 1024,
        }
    }
}

/// Launches a headless browser per call and walks the NBC rate form.
#[derive(Clone, Debug)]
pub struct PageDriver {
    config: PageDriverConfig,
}

impl PageDriver {
    pub fn new(config: PageDriverConfig) -> Self {
        Self { config }
    }

    /// Load `url`, submit the rate form with an empty date and return the
    /// rendered HTML once the result table is present.
    ///
    /// A fresh browser is launched for every call and is always closed before
    /// this returns, including on every error path.
    pub async fn load_rate_page(&self, url: &str) -> Result<String, MarketDataError> {
        let started = Instant::now();
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| MarketDataError::BrowserLaunch(e.to_string()))?;

        // The handler drives the DevTools connection and must be polled for
        // any page command to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let result = self.drive(&browser, url).await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            warn!("Failed to reap browser process: {}", e);
        }
        handler_task.abort();

        debug!(
            "Rate page load finished in {}ms (ok: {})",
            started.elapsed().as_millis(),
            result.is_ok()
        );
        result
    }

    fn browser_config(&self) -> Result<BrowserConfig, MarketDataError> {
        let mut builder = BrowserConfig::builder().window_size(
            self.config.viewport_width,
            self.config.viewport_height,
        );
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if self.config.no_sandbox {
            builder = builder.no_sandbox();
        }
        builder.build().map_err(MarketDataError::BrowserLaunch)
    }

    async fn drive(&self, browser: &Browser, url: &str) -> Result<String, MarketDataError> {
        let page = browser.new_page("about:blank").await?;

        self.navigate(&page, url).await?;
        page.execute(SetDeviceMetricsOverrideParams::new(
            self.config.viewport_width as i64,
            self.config.viewport_height as i64,
            1.0,
            false,
        ))
        .await?;

        let date_input = find(&page, DATE_INPUT_SELECTOR).await?;
        date_input.focus().await?;
        select_all(&page).await?;
        date_input.press_key("Backspace").await?;

        find(&page, SUBMIT_SELECTOR).await?.click().await?;

        self.wait_for_table(&page).await?;
        Ok(page.content().await?)
    }

    /// Navigate and wait for DOMContentLoaded only. Images and scripts that
    /// are still loading do not hold up the form.
    async fn navigate(&self, page: &Page, url: &str) -> Result<(), MarketDataError> {
        // Subscribe first so the event cannot fire before we listen.
        let mut dom_ready = page.event_listener::<EventDomContentEventFired>().await?;

        debug!("Navigating to {}", url);
        let response = page.execute(NavigateParams::new(url)).await?;
        if let Some(message) = response.result.error_text.clone() {
            return Err(MarketDataError::Navigation {
                url: url.to_string(),
                message,
            });
        }

        match tokio::time::timeout(self.config.navigation_timeout, dom_ready.next()).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(MarketDataError::Navigation {
                url: url.to_string(),
                message: "page closed before the DOM was parsed".to_string(),
            }),
            Err(_) => Err(MarketDataError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: self.config.navigation_timeout.as_millis() as u64,
            }),
        }
    }

    async fn wait_for_table(&self, page: &Page) -> Result<(), MarketDataError> {
        let poll = async {
            // Lookups fail while the form submit is navigating; keep polling.
            while page.find_element(TABLE_READY_SELECTOR).await.is_err() {
                tokio::time::sleep(TABLE_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(self.config.table_timeout, poll)
            .await
            .map_err(|_| MarketDataError::TableTimeout {
                selector: TABLE_READY_SELECTOR.to_string(),
                timeout_ms: self.config.table_timeout.as_millis() as u64,
            })
    }
}

async fn find(page: &Page, selector: &str) -> Result<Element, MarketDataError> {
    page.find_element(selector)
        .await
        .map_err(|_| MarketDataError::ElementNotFound {
            selector: selector.to_string(),
        })
}

/// Ctrl+A on the focused element. Headless Chromium does not map the chord to
/// an editing command by itself, so the `selectAll` command rides along.
async fn select_all(page: &Page) -> Result<(), MarketDataError> {
    page.execute(key_event(DispatchKeyEventType::RawKeyDown, "Control", "ControlLeft", 17, None)?)
        .await?;
    page.execute(key_event(DispatchKeyEventType::KeyDown, "a", "KeyA", 65, Some("selectAll"))?)
        .await?;
    page.execute(key_event(DispatchKeyEventType::KeyUp, "a", "KeyA", 65, None)?)
        .await?;
    page.execute(key_event(DispatchKeyEventType::KeyUp, "Control", "ControlLeft", 17, None)?)
        .await?;
    Ok(())
}

fn key_event(
    kind: DispatchKeyEventType,
    key: &str,
    code: &str,
    virtual_key_code: i64,
    command: Option<&str>,
) -> Result<DispatchKeyEventParams, MarketDataError> {
    let mut builder = DispatchKeyEventParams::builder()
        .r#type(kind)
        .key(key)
        .code(code)
        .windows_virtual_key_code(virtual_key_code)
        .modifiers(CTRL_MODIFIER);
    if let Some(command) = command {
        builder = builder.command(command);
    }
    builder.build().map_err(MarketDataError::Input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_rate_page_layout() {
        let config = PageDriverConfig::default();
        assert_eq!(config.table_timeout, Duration::from_secs(30));
        assert_eq!(config.navigation_timeout, Duration::from_secs(30));
        assert_eq!(config.viewport_width, 1080);
        assert_eq!(config.viewport_height, 1024);
        assert!(config.chrome_executable.is_none());
        assert!(!config.no_sandbox);
    }

    #[test]
    fn test_select_all_key_event_carries_command() {
        let event =
            key_event(DispatchKeyEventType::KeyDown, "a", "KeyA", 65, Some("selectAll")).unwrap();
        assert_eq!(event.key.as_deref(), Some("a"));
        assert_eq!(event.modifiers, Some(CTRL_MODIFIER));
        assert_eq!(event.commands, Some(vec!["selectAll".to_string()]));
    }

    #[tokio::test]
    async fn test_missing_browser_binary_fails_launch() {
        let driver = PageDriver::new(PageDriverConfig {
            chrome_executable: Some(PathBuf::from("/nonexistent/chrome")),
            ..PageDriverConfig::default()
        });

        let err = driver
            .load_rate_page("https://nbc.example/rates")
            .await
            .unwrap_err();

        assert!(matches!(err, MarketDataError::BrowserLaunch(_)));
        assert!(!err.is_timeout());
    }
}
