// Re-export modules
pub mod browser;
pub mod config;
pub mod error;
pub mod output;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use results::{ScrapeReport, VideoRecord};

use browser::{BrowserSession, WebDriverSession};

/// Builder for scraping the videos of one tag
pub struct Scrape {
    config: ScrapeConfig,
}

impl Scrape {
    /// Create a new Scrape builder for `tag`, with or without the leading `#`
    pub fn new(tag: &str) -> Self {
        Self {
            config: ScrapeConfig::new(tag),
        }
    }

    /// UI language, e.g. "en", "hi", "fr"
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.config.locale = locale.to_string();
        self
    }

    /// Region, e.g. "US", "IN", "GB"
    pub fn with_region(mut self, region: &str) -> Self {
        self.config.region = region.to_string();
        self
    }

    /// Set the maximum number of scrolls while loading the tag page
    pub fn with_max_scrolls(mut self, max_scrolls: usize) -> Self {
        self.config.max_scrolls = max_scrolls;
        self
    }

    /// Set the delay after each scroll
    pub fn with_settle_ms(mut self, settle_ms: u64) -> Self {
        self.config.settle_ms = settle_ms;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Visit every video page to capture its description
    pub fn with_descriptions(mut self, include: bool) -> Self {
        self.config.include_description = include;
        self
    }

    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Replace the configuration, keeping the tag given to `new`
    pub fn with_config(mut self, config: ScrapeConfig) -> Self {
        let tag = std::mem::take(&mut self.config.tag);
        self.config = ScrapeConfig { tag, ..config };
        self
    }

    /// Load configuration from a JSON file, keeping the tag given to `new`
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> error::Result<Self> {
        let config = ScrapeConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Connect to WebDriver, run the pipeline and close the browser
    pub async fn run(self) -> error::Result<ScrapeReport> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        // Reject a bad tag before starting a browser
        config.clean_tag()?;

        let mut session = WebDriverSession::connect(&config).await?;
        let result = pipeline::run_pipeline(&mut session, &config).await;

        // Always attempt to close the browser before returning
        if let Err(e) = session.quit().await {
            ::log::warn!("Failed to close browser session: {}", e);
        }
        result
    }
}
