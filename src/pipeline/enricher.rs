use crate::browser::{BrowserSession, ContextHandle, dismiss_consent, wait_for_ready};
use crate::config::VisitTimeouts;
use crate::error::Result;
use crate::parsers::PLAYER_STATE_SCRIPT;
use crate::parsers::html::{meta_description, player_description};
use crate::results::{Enrichment, EnrichmentReport, VideoRecord};

/// Visits every record's watch page for its description.
///
/// Videos are visited one at a time in a fresh tab. A failed visit leaves the
/// description absent and moves on; the tab is closed and the original
/// context restored after every visit.
pub async fn enrich_descriptions<S>(
    session: &mut S,
    records: &mut [VideoRecord],
    timeouts: VisitTimeouts,
) -> Result<EnrichmentReport>
where
    S: BrowserSession + ?Sized,
{
    let original = session.current_context().await?;
    let total = records.len();
    let mut report = EnrichmentReport::default();

    for (index, record) in records.iter_mut().enumerate() {
        ::log::debug!(
            "Fetching description {}/{}: {}",
            index + 1,
            total,
            record.url
        );

        let outcome = describe(session, &original, &record.url, timeouts).await;
        match &outcome {
            Enrichment::Described(text) => record.description_text = Some(text.clone()),
            Enrichment::NoDescription => {
                ::log::debug!("No description for {}", record.video_id);
                record.description_text = None;
            }
            Enrichment::Failed(reason) => {
                ::log::warn!("Could not describe {}: {}", record.video_id, reason);
                record.description_text = None;
            }
        }
        report.outcomes.push((record.video_id.clone(), outcome));
    }

    ::log::info!(
        "Descriptions: {} found, {} missing, {} failed",
        report.described(),
        report.missing(),
        report.failed()
    );
    Ok(report)
}

/// One visit, including cleanup
async fn describe<S>(
    session: &mut S,
    original: &ContextHandle,
    url: &str,
    timeouts: VisitTimeouts,
) -> Enrichment
where
    S: BrowserSession + ?Sized,
{
    let tab = match session.open_context().await {
        Ok(tab) => tab,
        Err(e) => return Enrichment::Failed(e.to_string()),
    };

    let outcome = match visit(session, &tab, url, timeouts).await {
        Ok(Some(text)) => Enrichment::Described(text),
        Ok(None) => Enrichment::NoDescription,
        Err(e) => Enrichment::Failed(e.to_string()),
    };

    if let Err(e) = session.close_context(&tab).await {
        ::log::warn!("Failed to close tab for {}: {}", url, e);
    }
    if let Err(e) = session.switch_context(original).await {
        ::log::error!("Failed to return to the original window: {}", e);
    }

    outcome
}

async fn visit<S>(
    session: &mut S,
    tab: &ContextHandle,
    url: &str,
    timeouts: VisitTimeouts,
) -> Result<Option<String>>
where
    S: BrowserSession + ?Sized,
{
    session.switch_context(tab).await?;
    session.navigate(url).await?;
    wait_for_ready(session, timeouts.ready).await?;
    dismiss_consent(session, timeouts.consent).await;

    let html = session.source().await?;
    if let Some(description) = meta_description(&html) {
        return Ok(Some(description));
    }

    let player_state = session.execute(PLAYER_STATE_SCRIPT, vec![]).await?;
    Ok(player_description(&player_state))
}
