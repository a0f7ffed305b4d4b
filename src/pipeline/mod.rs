pub mod enricher;
pub mod loader;

use crate::browser::{BrowserSession, dismiss_consent, wait_for_ready};
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::parsers::{self, video};
use crate::results::ScrapeReport;

pub use enricher::enrich_descriptions;
pub use loader::scroll_to_load;

/// Runs the whole scrape on an already connected session.
///
/// Navigation failures and a missing page state abort the run; everything
/// after extraction degrades per record.
pub async fn run_pipeline<S>(session: &mut S, config: &ScrapeConfig) -> Result<ScrapeReport>
where
    S: BrowserSession + ?Sized,
{
    let url = config.tag_url()?;
    let timeouts = config.visit_timeouts();
    ::log::info!("Opening tag page: {}", url);

    session.navigate(url.as_str()).await?;
    wait_for_ready(session, timeouts.ready).await?;
    dismiss_consent(session, timeouts.consent).await;

    let load = scroll_to_load(session, config.max_scrolls, config.settle()).await?;

    let state = parsers::page_state(session).await?;
    let renderers = parsers::find_video_renderers(&state);
    let raw_count = renderers.len();
    let mut records = video::normalize_all(renderers);
    ::log::info!(
        "Extracted {} videos from {} containers",
        records.len(),
        raw_count
    );

    let enrichment = if config.include_description && !records.is_empty() {
        Some(enrich_descriptions(session, &mut records, timeouts).await?)
    } else {
        None
    };

    Ok(ScrapeReport {
        records,
        raw_count,
        load,
        enrichment,
    })
}
