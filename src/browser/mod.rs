pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

pub use webdriver::WebDriverSession;

/// Scrolls the window to the bottom of the document
pub const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.documentElement.scrollHeight);";

/// Measures the current content extent
pub const EXTENT_SCRIPT: &str = "return document.documentElement.scrollHeight;";

/// Reads the document loading state
pub const READY_STATE_SCRIPT: &str = "return document.readyState;";

/// Buttons of the consent dialog
pub const CONSENT_SELECTOR: &str = "button[aria-label*='Accept'], button[aria-label*='Agree']";

const READY_POLL: Duration = Duration::from_millis(250);

/// Identifier of one browsing context (window or tab)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextHandle(pub String);

/// Capability over a live browser session
///
/// Every stage of the pipeline reaches the browser through this trait so a
/// scripted session can stand in for a real one.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate the active context to `url`
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Run a script in the active context and return its value
    async fn execute(&mut self, script: &str, args: Vec<Value>) -> Result<Value>;

    /// HTML source of the active context
    async fn source(&mut self) -> Result<String>;

    /// Current content extent of the document
    async fn content_extent(&mut self) -> Result<u64> {
        let value = self.execute(EXTENT_SCRIPT, vec![]).await?;
        value
            .as_u64()
            .or_else(|| value.as_f64().map(|f| f as u64))
            .ok_or_else(|| ScrapeError::command("content_extent", format!("not a number: {value}")))
    }

    /// Scroll to the current end of the document
    async fn scroll_to_end(&mut self) -> Result<()> {
        self.execute(SCROLL_SCRIPT, vec![]).await.map(|_| ())
    }

    /// Give asynchronous content time to arrive
    async fn settle(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    async fn current_context(&mut self) -> Result<ContextHandle>;

    /// Open a new tab and return its handle without switching to it
    async fn open_context(&mut self) -> Result<ContextHandle>;

    async fn switch_context(&mut self, handle: &ContextHandle) -> Result<()>;

    /// Close the context identified by `handle`
    async fn close_context(&mut self, handle: &ContextHandle) -> Result<()>;

    /// Click the first element matching `selector` once it shows up.
    /// Returns false when nothing appeared within `wait`.
    async fn click_when_ready(&mut self, selector: &str, wait: Duration) -> Result<bool>;

    /// End the session
    async fn quit(&mut self) -> Result<()>;
}

/// Waits until the active document reports `readyState == "complete"`
pub async fn wait_for_ready<S>(session: &mut S, wait: Duration) -> Result<()>
where
    S: BrowserSession + ?Sized,
{
    match timeout(wait, poll_ready(session)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout {
            waited: wait,
            condition: "document ready",
        }),
    }
}

async fn poll_ready<S>(session: &mut S) -> Result<()>
where
    S: BrowserSession + ?Sized,
{
    loop {
        let state = session.execute(READY_STATE_SCRIPT, vec![]).await?;
        if state.as_str() == Some("complete") {
            return Ok(());
        }
        session.settle(READY_POLL).await;
    }
}

/// Tries to accept the consent dialog; every failure is ignored
pub async fn dismiss_consent<S>(session: &mut S, wait: Duration)
where
    S: BrowserSession + ?Sized,
{
    match session.click_when_ready(CONSENT_SELECTOR, wait).await {
        Ok(true) => ::log::debug!("Accepted consent dialog"),
        Ok(false) => ::log::trace!("No consent dialog within {:?}", wait),
        Err(e) => ::log::debug!("Ignoring consent dismissal failure: {}", e),
    }
}
