use serde::{Deserialize, Serialize};

/// One typed chunk of a question's content. The discriminator and field set
/// match the persisted document shape: `{"type": "code", "content": "...",
/// "lang": "python"}`, with `lang` present only on code segments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text { content: String },
    Code { content: String, lang: String },
    Table { content: String },
    Image { content: String },
    Math { content: String },
}

pub const SEGMENT_KINDS: [&str; 5] = ["text", "code", "table", "image", "math"];

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn code(content: impl Into<String>, lang: impl Into<String>) -> Self {
        Segment::Code {
            content: content.into(),
            lang: lang.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Text { .. } => "text",
            Segment::Code { .. } => "code",
            Segment::Table { .. } => "table",
            Segment::Image { .. } => "image",
            Segment::Math { .. } => "math",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content }
            | Segment::Code { content, .. }
            | Segment::Table { content }
            | Segment::Image { content }
            | Segment::Math { content } => content,
        }
    }

    /// Whether this segment carries non-whitespace content and therefore
    /// counts toward a non-empty question.
    pub fn has_content(&self) -> bool {
        !self.content().trim().is_empty()
    }

    /// Best-effort check that a table segment has a consistent cell count
    /// across rows (rows separated by newline, cells by `|`). Inconsistency
    /// is reported, never fatal. Non-table segments are trivially consistent.
    pub fn table_rows_consistent(&self) -> bool {
        let Segment::Table { content } = self else {
            return true;
        };

        let mut rows = content
            .lines()
            .filter(|row| !row.trim().is_empty())
            .map(|row| row.split('|').count());

        match rows.next() {
            Some(first) => rows.all(|count| count == first),
            None => true,
        }
    }
}
