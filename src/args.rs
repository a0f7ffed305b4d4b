use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use yield_tag::ScrapeConfig;
use yield_tag::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "yield-tag")]
#[command(about = "Scrape the videos of a YouTube hashtag page through WebDriver")]
#[command(version)]
pub struct Args {
    /// Hashtag to fetch, with or without leading #, e.g. #python
    pub hashtag: String,

    /// Output path (default: <hashtag>_YYYYmmdd_HHMMSS.csv)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// UI language, e.g. en, hi, fr [default: en]
    #[arg(long)]
    pub hl: Option<String>,

    /// Region, e.g. US, IN, GB [default: US]
    #[arg(long)]
    pub geo: Option<String>,

    /// How many times to scroll to load more [default: 8]
    #[arg(long)]
    pub scrolls: Option<usize>,

    /// Delay after each scroll in milliseconds [default: 1200]
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Run browser in headless mode
    #[arg(long)]
    pub headless: bool,

    /// Visit each video to capture its description
    #[arg(long)]
    pub include_description: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// WebDriver URL [default: http://localhost:4444]
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// JSON configuration file; flags given here take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Merge command-line flags over the base configuration
pub fn apply_overrides(args: &Args, mut config: ScrapeConfig) -> ScrapeConfig {
    config.tag = args.hashtag.clone();
    if let Some(hl) = &args.hl {
        config.locale = hl.clone();
    }
    if let Some(geo) = &args.geo {
        config.region = geo.clone();
    }
    if let Some(scrolls) = args.scrolls {
        config.max_scrolls = scrolls;
    }
    if let Some(settle_ms) = args.settle_ms {
        config.settle_ms = settle_ms;
    }
    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }
    config.headless |= args.headless;
    config.include_description |= args.include_description;
    config
}
