pub mod html;
pub mod text;
pub mod video;


use crate::browser::BrowserSession;
use crate::error::{Result, ScrapeError};
use serde_json::{Map, Value};

/// Reads the client rendering state of the tag page
pub const PAGE_STATE_SCRIPT: &str = "return window.ytInitialData || null;";

/// Reads the player configuration of a watch page
pub const PLAYER_STATE_SCRIPT: &str =
    "return window.ytInitialPlayerResponse || window.ytInitialData || null;";

/// Key that marks a video record container
pub const VIDEO_RENDERER_KEY: &str = "videoRenderer";

/// Pulls `ytInitialData` out of the loaded page
pub async fn page_state<S>(session: &mut S) -> Result<Value>
where
    S: BrowserSession + ?Sized,
{
    let value = session.execute(PAGE_STATE_SCRIPT, vec![]).await?;
    require_page_state(value)
}

/// Rejects a missing or empty page state
pub fn require_page_state(value: Value) -> Result<Value> {
    match &value {
        Value::Object(map) if !map.is_empty() => Ok(value),
        _ => Err(ScrapeError::MissingPageState),
    }
}

/// Finds every video record container in `state`.
///
/// Depth-first and left to right, so containers come out in document order.
/// A container nested inside another container is found too, and a container
/// reachable from two places is returned twice.
pub fn find_video_renderers(state: &Value) -> Vec<&Map<String, Value>> {
    let mut found = Vec::new();
    collect_renderers(state, &mut found);
    ::log::debug!("Found {} video containers", found.len());
    found
}

fn collect_renderers<'a>(node: &'a Value, found: &mut Vec<&'a Map<String, Value>>) {
    match node {
        Value::Object(map) => {
            if let Some(Value::Object(renderer)) = map.get(VIDEO_RENDERER_KEY) {
                found.push(renderer);
            }
            for value in map.values() {
                collect_renderers(value, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_renderers(item, found);
            }
        }
        _ => {}
    }
}
