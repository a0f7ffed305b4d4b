use crate::error::{Result, ScrapeError};
use crate::results::YOUTUBE_BASE;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Configuration for one tag scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Tag to fetch, with or without the leading `#`.
    /// The command line always supplies it, so a file may leave it out.
    #[serde(default)]
    pub tag: String,

    /// UI language passed to the browser and the `hl` query parameter
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Region passed as the `gl` query parameter
    #[serde(default = "default_region")]
    pub region: String,

    /// Maximum number of scrolls while loading the page
    #[serde(default = "default_max_scrolls")]
    pub max_scrolls: usize,

    /// Delay after each scroll, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Run the browser without a window
    #[serde(default)]
    pub headless: bool,

    /// Visit every video page to read its description
    #[serde(default)]
    pub include_description: bool,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Bound on waiting for `document.readyState == "complete"`
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,

    /// Bound on waiting for the consent dialog
    #[serde(default = "default_consent_timeout_secs")]
    pub consent_timeout_secs: u64,

    /// User agent presented by the browser
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Timeouts applied to every page visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTimeouts {
    pub ready: Duration,
    pub consent: Duration,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

fn default_max_scrolls() -> usize {
    8
}

fn default_settle_ms() -> u64 {
    1200
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_page_load_timeout_secs() -> u64 {
    60
}

fn default_ready_timeout_secs() -> u64 {
    30
}

fn default_consent_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
        .to_string()
}

impl ScrapeConfig {
    /// Create a new configuration with default values
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            locale: default_locale(),
            region: default_region(),
            max_scrolls: default_max_scrolls(),
            settle_ms: default_settle_ms(),
            headless: false,
            include_description: false,
            webdriver_url: default_webdriver_url(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            ready_timeout_secs: default_ready_timeout_secs(),
            consent_timeout_secs: default_consent_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Tag with leading markers and surrounding whitespace removed
    pub fn clean_tag(&self) -> Result<String> {
        clean_tag(&self.tag)
    }

    /// Tag page URL carrying the locale and region
    pub fn tag_url(&self) -> Result<Url> {
        let tag = self.clean_tag()?;
        let mut url = Url::parse(YOUTUBE_BASE)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push("hashtag")
            .push(&tag);
        url.query_pairs_mut()
            .append_pair("hl", &self.locale)
            .append_pair("gl", &self.region);
        Ok(url)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn visit_timeouts(&self) -> VisitTimeouts {
        VisitTimeouts {
            ready: Duration::from_secs(self.ready_timeout_secs),
            consent: Duration::from_secs(self.consent_timeout_secs),
        }
    }
}

/// Strip leading `#` markers and whitespace from a tag
pub fn clean_tag(raw: &str) -> Result<String> {
    let tag = raw.trim().trim_start_matches('#').trim();
    if tag.is_empty() {
        return Err(ScrapeError::InvalidTag(raw.to_string()));
    }
    Ok(tag.to_string())
}
