use crate::parsers::text::{TextValue, first_present, first_run};
use crate::results::VideoRecord;
use serde_json::{Map, Value};

/// Maps one `videoRenderer` container to a canonical record.
///
/// Returns `None` when the container has no usable `videoId`.
pub fn normalize(renderer: &Map<String, Value>) -> Option<VideoRecord> {
    let video_id = renderer
        .get("videoId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())?;

    let title_field = renderer.get("title");
    let title = first_run(title_field)
        .or_else(|| TextValue::plain(title_field).non_empty().resolve())
        .unwrap_or_default();

    let published = renderer.get("publishedTimeText");
    let views = renderer.get("viewCountText");
    let short_views = renderer.get("shortViewCountText");

    let mut record = VideoRecord::new(title, video_id.to_string());
    record.channel_name = TextValue::runs(renderer.get("ownerText")).resolve();
    record.published_text =
        first_present([TextValue::plain(published).non_empty(), TextValue::runs(published)]);
    record.views_text = first_present([
        TextValue::plain(views).non_empty(),
        TextValue::runs(views),
        TextValue::runs(short_views),
    ]);
    record.duration_text = TextValue::plain(renderer.get("lengthText")).resolve();
    Some(record)
}

/// Normalizes containers in order, dropping the ones without an id
pub fn normalize_all<'a, I>(renderers: I) -> Vec<VideoRecord>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    let mut dropped = 0;
    let records: Vec<VideoRecord> = renderers
        .into_iter()
        .filter_map(|renderer| {
            let record = normalize(renderer);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect();

    if dropped > 0 {
        ::log::debug!("Dropped {} video containers without an id", dropped);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_full_renderer() {
        let raw = renderer(json!({
            "videoId": "dQw4w9WgXcQ",
            "title": {"runs": [{"text": "Never Gonna"}, {"text": " Give You Up"}]},
            "ownerText": {"runs": [{"text": "Rick"}, {"text": " Astley"}]},
            "publishedTimeText": {"simpleText": "14 years ago"},
            "viewCountText": {"simpleText": "1,500,000,000 views"},
            "shortViewCountText": {"runs": [{"text": "1.5B"}]},
            "lengthText": {"simpleText": "3:33"}
        }));

        let record = normalize(&raw).unwrap();
        assert_eq!(record.title, "Never Gonna");
        assert_eq!(record.video_id, "dQw4w9WgXcQ");
        assert_eq!(record.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(record.channel_name.as_deref(), Some("Rick Astley"));
        assert_eq!(record.published_text.as_deref(), Some("14 years ago"));
        assert_eq!(record.views_text.as_deref(), Some("1,500,000,000 views"));
        assert_eq!(record.duration_text.as_deref(), Some("3:33"));
        assert_eq!(record.description_text, None);
    }

    #[test]
    fn test_title_falls_back_to_simple_text() {
        let raw = renderer(json!({"videoId": "a1", "title": {"simpleText": "Plain title"}}));
        assert_eq!(normalize(&raw).unwrap().title, "Plain title");

        let raw = renderer(json!({"videoId": "a1"}));
        assert_eq!(normalize(&raw).unwrap().title, "");
    }

    #[test]
    fn test_missing_or_empty_id_is_dropped() {
        assert_eq!(normalize(&renderer(json!({"title": {"simpleText": "x"}}))), None);
        assert_eq!(normalize(&renderer(json!({"videoId": ""}))), None);
        assert_eq!(normalize(&renderer(json!({"videoId": 42}))), None);
    }

    #[test]
    fn test_view_count_runs_beat_short_view_count() {
        let raw = renderer(json!({
            "videoId": "v1",
            "viewCountText": {"runs": [{"text": "12,345"}, {"text": " views"}]},
            "shortViewCountText": {"runs": [{"text": "12K views"}]}
        }));
        assert_eq!(normalize(&raw).unwrap().views_text.as_deref(), Some("12,345 views"));
    }

    #[test]
    fn test_empty_plain_text_falls_through() {
        let raw = renderer(json!({
            "videoId": "v1",
            "viewCountText": {"simpleText": "", "runs": [{"text": "5 views"}]},
            "title": {"runs": [{"text": ""}], "simpleText": "Real title"},
            "publishedTimeText": {"simpleText": "", "runs": [{"text": "1 hour ago"}]}
        }));
        let record = normalize(&raw).unwrap();
        assert_eq!(record.views_text.as_deref(), Some("5 views"));
        assert_eq!(record.title, "Real title");
        assert_eq!(record.published_text.as_deref(), Some("1 hour ago"));

        let raw = renderer(json!({
            "videoId": "v2",
            "viewCountText": {"simpleText": ""},
            "shortViewCountText": {"runs": [{"text": "5"}]},
            "title": {"simpleText": ""}
        }));
        let record = normalize(&raw).unwrap();
        assert_eq!(record.views_text.as_deref(), Some("5"));
        assert_eq!(record.title, "");
    }

    #[test]
    fn test_short_view_count_used_last() {
        let raw = renderer(json!({
            "videoId": "v1",
            "shortViewCountText": {"runs": [{"text": "12K"}, {"text": " views"}]}
        }));
        assert_eq!(normalize(&raw).unwrap().views_text.as_deref(), Some("12K views"));

        let raw = renderer(json!({"videoId": "v1"}));
        assert_eq!(normalize(&raw).unwrap().views_text, None);
    }

    #[test]
    fn test_published_prefers_simple_text() {
        let raw = renderer(json!({
            "videoId": "v1",
            "publishedTimeText": {"simpleText": "2 weeks ago", "runs": [{"text": "other"}]}
        }));
        assert_eq!(normalize(&raw).unwrap().published_text.as_deref(), Some("2 weeks ago"));

        let raw = renderer(json!({
            "videoId": "v1",
            "publishedTimeText": {"runs": [{"text": "Streamed "}, {"text": "1 day ago"}]}
        }));
        assert_eq!(
            normalize(&raw).unwrap().published_text.as_deref(),
            Some("Streamed 1 day ago")
        );
    }

    #[test]
    fn test_channel_absent_versus_empty() {
        let missing = renderer(json!({"videoId": "v1", "ownerText": {}}));
        let empty = renderer(json!({"videoId": "v2", "ownerText": {"runs": []}}));
        assert_eq!(normalize(&missing).unwrap().channel_name, None);
        assert_eq!(normalize(&empty).unwrap().channel_name, Some(String::new()));
    }

    #[test]
    fn test_duration_only_from_simple_text() {
        let raw = renderer(json!({"videoId": "v1", "lengthText": {"runs": [{"text": "1:00"}]}}));
        assert_eq!(normalize(&raw).unwrap().duration_text, None);
    }

    #[test]
    fn test_normalize_is_pure() {
        let raw = renderer(json!({
            "videoId": "v1",
            "title": {"runs": [{"text": "t"}]},
            "ownerText": {"runs": [{"text": "c"}]}
        }));
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn test_normalize_all_preserves_order_and_drops() {
        let raws = [
            renderer(json!({"videoId": "first"})),
            renderer(json!({"title": {"simpleText": "no id"}})),
            renderer(json!({"videoId": "second"})),
            renderer(json!({"videoId": "first"})),
        ];
        let records = normalize_all(raws.iter());
        let ids: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "first"]);
        assert!(records.len() <= raws.len());
        assert!(records.iter().all(|r| !r.video_id.is_empty()));
    }
}
