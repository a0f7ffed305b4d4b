use serde_json::Value;

/// A text attribute as the page renders it
///
/// The platform ships most strings either as a plain `simpleText` or as a
/// `runs` sequence of formatted fragments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextValue<'a> {
    Plain(&'a str),
    Fragments(&'a [Value]),
    Absent,
}

impl<'a> TextValue<'a> {
    /// `field.simpleText` as a plain value
    pub fn plain(field: Option<&'a Value>) -> Self {
        match field.and_then(|f| f.get("simpleText")).and_then(Value::as_str) {
            Some(text) => TextValue::Plain(text),
            None => TextValue::Absent,
        }
    }

    /// `field.runs` as a fragment sequence; null or non-array runs are absent
    pub fn runs(field: Option<&'a Value>) -> Self {
        match field.and_then(|f| f.get("runs")).and_then(Value::as_array) {
            Some(runs) => TextValue::Fragments(runs.as_slice()),
            None => TextValue::Absent,
        }
    }

    /// Treats an empty plain string as absent so a precedence chain moves on.
    /// Fragments are left alone: an empty sequence still resolves to `""`.
    pub fn non_empty(self) -> Self {
        match self {
            TextValue::Plain("") => TextValue::Absent,
            other => other,
        }
    }

    /// Resolve to a displayed string.
    ///
    /// Fragments concatenate in order, a fragment without text contributes
    /// nothing, and an empty sequence is an empty string rather than absent.
    pub fn resolve(self) -> Option<String> {
        match self {
            TextValue::Plain(text) => Some(text.to_string()),
            TextValue::Fragments(runs) => Some(
                runs.iter()
                    .map(|run| run.get("text").and_then(Value::as_str).unwrap_or(""))
                    .collect(),
            ),
            TextValue::Absent => None,
        }
    }
}

/// First alternative that resolves to a string
pub fn first_present<'a>(alternatives: impl IntoIterator<Item = TextValue<'a>>) -> Option<String> {
    alternatives.into_iter().find_map(TextValue::resolve)
}

/// Text of the first fragment in `field.runs`, when non-empty
pub fn first_run(field: Option<&Value>) -> Option<String> {
    field
        .and_then(|f| f.get("runs"))
        .and_then(Value::as_array)
        .and_then(|runs| runs.first())
        .and_then(|run| run.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
