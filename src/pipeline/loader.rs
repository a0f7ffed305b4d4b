use crate::browser::BrowserSession;
use crate::error::Result;
use crate::results::LoadReport;
use std::time::Duration;

/// Scrolls until the content extent stops growing or the budget runs out.
///
/// A settle delay shorter than the platform's render time ends the loop
/// early; that is accepted, not retried.
pub async fn scroll_to_load<S>(
    session: &mut S,
    max_scrolls: usize,
    settle: Duration,
) -> Result<LoadReport>
where
    S: BrowserSession + ?Sized,
{
    let mut last_extent = session.content_extent().await?;
    let mut iterations = 0;
    let mut exhausted = false;

    while iterations < max_scrolls {
        session.scroll_to_end().await?;
        session.settle(settle).await;
        iterations += 1;

        let extent = session.content_extent().await?;
        ::log::debug!("Scroll {}: extent {} -> {}", iterations, last_extent, extent);
        if extent == last_extent {
            exhausted = true;
            break;
        }
        last_extent = extent;
    }

    ::log::info!(
        "Loaded page with {} scrolls (extent {}, exhausted: {})",
        iterations,
        last_extent,
        exhausted
    );

    Ok(LoadReport {
        iterations,
        final_extent: last_extent,
        exhausted,
    })
}
