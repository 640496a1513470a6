use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Citation,
    Improvement,
    Expansion,
    Clarification,
    Expert,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Citation => "citation",
            SuggestionKind::Improvement => "improvement",
            SuggestionKind::Expansion => "expansion",
            SuggestionKind::Clarification => "clarification",
            SuggestionKind::Expert => "expert",
        }
    }
}

/// Ordering is `High < Medium < Low` so an ascending sort puts the most
/// urgent suggestions first.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Where an accepted suggestion's insertion text is spliced.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "at", content = "offset")]
pub enum Placement {
    /// At the suggestion's anchor.
    Anchor,
    /// At the editor cursor at acceptance time.
    Cursor,
    /// At a fixed byte offset computed during analysis.
    Offset(usize),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub kind: SuggestionKind,
    /// Rule that produced the suggestion, e.g. `statistical-claim`.
    pub detector: String,
    /// The document text the suggestion refers to.
    pub source_text: String,
    pub insertion_text: String,
    /// Advice shown to the writer.
    pub message: String,
    /// Short label for the accept button.
    pub action: String,
    /// Byte offset into the document.
    pub anchor: usize,
    pub placement: Placement,
    pub priority: Priority,
    pub expert: Option<String>,
    pub confidence: f32,
}

impl Suggestion {
    /// Byte offset the insertion lands at, given the cursor at acceptance.
    pub fn insertion_point(&self, cursor: usize) -> usize {
        match self.placement {
            Placement::Anchor => self.anchor,
            Placement::Cursor => cursor,
            Placement::Offset(offset) => offset,
        }
    }

    /// Move offsets that sit at or after `at` by `by` bytes.
    pub(crate) fn shift_from(&mut self, at: usize, by: usize) {
        if self.anchor >= at {
            self.anchor += by;
        }
        if let Placement::Offset(offset) = &mut self.placement
            && *offset >= at
        {
            *offset += by;
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    PlainText,
    Markdown,
    Pdf,
    Word,
}

impl DocumentKind {
    pub const PLAIN_TEXT_MIME: &'static str = "text/plain";
    pub const MARKDOWN_MIME: &'static str = "text/markdown";
    pub const PDF_MIME: &'static str = "application/pdf";
    pub const WORD_MIME: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            Self::PLAIN_TEXT_MIME => Some(DocumentKind::PlainText),
            Self::MARKDOWN_MIME | "text/x-markdown" => Some(DocumentKind::Markdown),
            Self::PDF_MIME => Some(DocumentKind::Pdf),
            Self::WORD_MIME => Some(DocumentKind::Word),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentKind::PlainText),
            "md" | "markdown" => Some(DocumentKind::Markdown),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Word),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            DocumentKind::PlainText => Self::PLAIN_TEXT_MIME,
            DocumentKind::Markdown => Self::MARKDOWN_MIME,
            DocumentKind::Pdf => Self::PDF_MIME,
            DocumentKind::Word => Self::WORD_MIME,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DocumentKind::PlainText => "Text File",
            DocumentKind::Markdown => "Markdown File",
            DocumentKind::Pdf => "PDF Document",
            DocumentKind::Word => "Word Document",
        }
    }
}

/// Reference material supplied by the writer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: String,
    pub name: String,
    pub byte_size: u64,
    pub kind: DocumentKind,
    pub mime_type: String,
    pub extracted_text: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Premium,
}
