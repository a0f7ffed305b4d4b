use serde::{Deserialize, Serialize};

/// Base URL of the platform
pub const YOUTUBE_BASE: &str = "https://www.youtube.com";

/// Column order of the tabular output
pub const COLUMNS: [&str; 8] = [
    "title",
    "video_id",
    "url",
    "channel_name",
    "published_text",
    "views_text",
    "duration_text",
    "description_text",
];

/// One video discovered on a tag page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Title of the video (empty when the page carried none)
    pub title: String,

    /// Platform identifier, unique within one scrape
    pub video_id: String,

    /// Watch URL derived from the identifier
    pub url: String,

    /// Channel name as displayed
    pub channel_name: Option<String>,

    /// Human-phrased publish time, e.g. "3 days ago"
    pub published_text: Option<String>,

    /// Human-phrased view count, e.g. "1.2K views"
    pub views_text: Option<String>,

    /// Displayed duration, e.g. "4:13"
    pub duration_text: Option<String>,

    /// Description, only filled in by the enricher
    pub description_text: Option<String>,
}

impl VideoRecord {
    /// Create a record for `video_id` with the watch URL filled in
    pub fn new(title: String, video_id: String) -> Self {
        let url = watch_url(&video_id);
        Self {
            title,
            video_id,
            url,
            channel_name: None,
            published_text: None,
            views_text: None,
            duration_text: None,
            description_text: None,
        }
    }
}

/// Canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}/watch?v={}", YOUTUBE_BASE, video_id)
}

/// What the loader observed while scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of scrolls performed
    pub iterations: usize,

    /// Content extent after the last scroll
    pub final_extent: u64,

    /// True when the loop stopped because the extent stopped growing
    pub exhausted: bool,
}

/// Outcome of visiting one video page for its description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Described(String),
    NoDescription,
    Failed(String),
}

/// Per-record enrichment outcomes, in record order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub outcomes: Vec<(String, Enrichment)>,
}

impl EnrichmentReport {
    pub fn described(&self) -> usize {
        self.count(|e| matches!(e, Enrichment::Described(_)))
    }

    pub fn missing(&self) -> usize {
        self.count(|e| matches!(e, Enrichment::NoDescription))
    }

    pub fn failed(&self) -> usize {
        self.count(|e| matches!(e, Enrichment::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&Enrichment) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, e)| pred(e)).count()
    }
}

/// Everything a pipeline run produced
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// Canonical records in page order
    pub records: Vec<VideoRecord>,

    /// Number of record containers found in the page state
    pub raw_count: usize,

    pub load: LoadReport,

    /// Present when descriptions were requested and there was something to enrich
    pub enrichment: Option<EnrichmentReport>,
}

impl ScrapeReport {
    /// Containers discarded for lack of an identifier
    pub fn dropped(&self) -> usize {
        self.raw_count - self.records.len()
    }
}
