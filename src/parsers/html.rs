use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[name='description']").unwrap());

/// Content of `<meta name="description">`, when present and non-empty
pub fn meta_description(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&META_DESCRIPTION)
        .filter_map(|e| e.value().attr("content"))
        .find(|content| !content.trim().is_empty())
        .map(str::to_string)
}

/// Description carried by the player configuration object
pub fn player_description(player_state: &Value) -> Option<String> {
    player_state
        .pointer("/microformat/playerMicroformatRenderer/description/simpleText")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
