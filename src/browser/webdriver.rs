use super::{BrowserSession, ContextHandle};
use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::{Capabilities, TimeoutConfiguration, WindowHandle};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Value, json};
use std::time::Duration;

/// Local endpoints tried when the configured WebDriver is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Browser session driven over WebDriver
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Connects to the configured WebDriver, falling back to common local endpoints
    pub async fn connect(config: &ScrapeConfig) -> Result<Self> {
        let caps = chrome_capabilities(config);

        let mut last_error = match try_connect(&config.webdriver_url, &caps).await {
            Ok(client) => return Self::configure(client, config).await,
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == config.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            match try_connect(url, &caps).await {
                Ok(client) => {
                    ::log::debug!("Connected to fallback WebDriver at {}", url);
                    return Self::configure(client, config).await;
                }
                Err(e) => last_error = e,
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Connect {
            url: config.webdriver_url.clone(),
            reason: last_error,
        })
    }

    async fn configure(client: Client, config: &ScrapeConfig) -> Result<Self> {
        let timeouts = TimeoutConfiguration::new(None, Some(config.page_load_timeout()), None);
        client
            .update_timeouts(timeouts)
            .await
            .map_err(|e| ScrapeError::command("update_timeouts", e))?;
        Ok(Self { client })
    }
}

async fn try_connect(url: &str, caps: &Capabilities) -> std::result::Result<Client, String> {
    ClientBuilder::native()
        .capabilities(caps.clone())
        .connect(url)
        .await
        .map_err(|e| e.to_string())
}

/// Chrome capabilities for the configured locale and headless mode
fn chrome_capabilities(config: &ScrapeConfig) -> Capabilities {
    let mut args = vec![
        "--disable-gpu".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        format!("--lang={}", config.locale),
        format!("--user-agent={}", config.user_agent),
    ];
    if config.headless {
        args.insert(0, "--headless=new".to_string());
    }

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

fn window_handle(handle: &ContextHandle) -> Result<WindowHandle> {
    WindowHandle::try_from(handle.0.clone()).map_err(|e| ScrapeError::command("switch_context", e))
}

fn lost_session(error: &CmdError) -> bool {
    error.to_string().contains("Unable to find session")
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(|e| {
            if lost_session(&e) {
                ::log::warn!("Lost session while accessing {}", url);
            }
            ScrapeError::command("navigate", e)
        })
    }

    async fn execute(&mut self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.client
            .execute(script, args)
            .await
            .map_err(|e| ScrapeError::command("execute", e))
    }

    async fn source(&mut self) -> Result<String> {
        self.client
            .source()
            .await
            .map_err(|e| ScrapeError::command("source", e))
    }

    async fn current_context(&mut self) -> Result<ContextHandle> {
        let handle = self
            .client
            .window()
            .await
            .map_err(|e| ScrapeError::command("current_context", e))?;
        Ok(ContextHandle(String::from(handle)))
    }

    async fn open_context(&mut self) -> Result<ContextHandle> {
        let window = self
            .client
            .new_window(true)
            .await
            .map_err(|e| ScrapeError::command("open_context", e))?;
        Ok(ContextHandle(String::from(window.handle)))
    }

    async fn switch_context(&mut self, handle: &ContextHandle) -> Result<()> {
        self.client
            .switch_to_window(window_handle(handle)?)
            .await
            .map_err(|e| ScrapeError::command("switch_context", e))
    }

    async fn close_context(&mut self, handle: &ContextHandle) -> Result<()> {
        // WebDriver only closes the active window
        self.switch_context(handle).await?;
        self.client
            .close_window()
            .await
            .map_err(|e| ScrapeError::command("close_context", e))
    }

    async fn click_when_ready(&mut self, selector: &str, wait: Duration) -> Result<bool> {
        let found = self
            .client
            .wait()
            .at_most(wait)
            .for_element(Locator::Css(selector))
            .await;
        let element = match found {
            Ok(element) => element,
            Err(CmdError::WaitTimeout) => return Ok(false),
            Err(e) => return Err(ScrapeError::command("click", e)),
        };
        element
            .click()
            .await
            .map_err(|e| ScrapeError::command("click", e))?;
        Ok(true)
    }

    async fn quit(&mut self) -> Result<()> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| ScrapeError::command("quit", e))
    }
}
