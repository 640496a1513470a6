//! Heuristic content analysis: sentence scan, ordered rules, ranking.

use serde::Serialize;
use std::collections::HashSet;

use crate::citations::CitationCatalog;
use crate::citations::CitationStyle;
use crate::citations::PLACEHOLDER_CITATION;
use crate::context;
use crate::types::Suggestion;
use crate::types::UploadedDocument;

mod detectors;
pub mod sentences;

pub use detectors::citation_count;
pub use detectors::has_citation;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

const SECTION_HEADINGS: &[(&str, &str)] = &[
    ("introduction", "Introduction"),
    ("physical benefits", "Physical Benefits"),
    ("injury prevention", "Injury Prevention"),
    ("on-field performance", "Performance"),
    ("conclusion", "Conclusion"),
];

const CITATION_GUIDELINES_NOTE: &str =
    "Check it against the citation guidelines in your uploaded materials.";

/// Anything that can turn a document and cursor into suggestions. A
/// failing pass is reported as an error and must not clobber earlier
/// results.
pub trait SuggestionSource: Send + Sync {
    fn analyze(&self, text: &str, cursor: usize) -> anyhow::Result<Vec<Suggestion>>;
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub suggestions: Vec<Suggestion>,
    pub current_section: String,
    pub word_count: usize,
}

#[derive(Clone, Debug)]
pub struct ContentAnalyzer {
    max_suggestions: usize,
    catalog: CitationCatalog,
    citation_note: Option<&'static str>,
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            catalog: CitationCatalog::builtin(),
            citation_note: None,
        }
    }

    pub fn with_max_suggestions(mut self, n: usize) -> Self {
        self.max_suggestions = n;
        self
    }

    pub fn with_catalog(mut self, catalog: CitationCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Flavor messages with requirements derived from uploaded documents.
    pub fn with_context(mut self, documents: &[UploadedDocument]) -> Self {
        let wants_citations = context::key_requirements(documents)
            .iter()
            .any(|r| r == context::REQ_SOURCES);
        self.citation_note = wants_citations.then_some(CITATION_GUIDELINES_NOTE);
        self
    }

    /// Ranked suggestions for `text`: high before medium before low, scan
    /// order within a priority, at most `max_suggestions`.
    pub fn analyze(&self, text: &str, _cursor: usize) -> Vec<Suggestion> {
        let sentences = sentences::split_sentences(text);
        let cite = |claim: &str| {
            self.catalog
                .best_match(claim)
                .map(|s| s.in_text(CitationStyle::Apa))
                .unwrap_or_else(|| PLACEHOLDER_CITATION.to_string())
        };
        let mut scan = detectors::Scan {
            lower: text.to_lowercase(),
            citation_for: &cite,
            citation_note: self.citation_note,
            fired_topics: HashSet::new(),
        };

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for sentence in &sentences {
            for rule in detectors::RULES {
                if let Some(s) = rule(&mut scan, sentence)
                    && seen.insert(s.id.clone())
                {
                    out.push(s);
                }
            }
        }
        let found = out.len();
        // sort_by_key is stable, so scan order survives within a priority.
        out.sort_by_key(|s| s.priority);
        out.truncate(self.max_suggestions);
        tracing::debug!(
            "analysis: {} sentences, {found} candidates, {} kept",
            sentences.len(),
            out.len()
        );
        out
    }

    pub fn report(&self, text: &str, cursor: usize) -> AnalysisReport {
        AnalysisReport {
            suggestions: self.analyze(text, cursor),
            current_section: current_section(text, cursor).to_string(),
            word_count: text.split_whitespace().count(),
        }
    }
}

impl SuggestionSource for ContentAnalyzer {
    fn analyze(&self, text: &str, cursor: usize) -> anyhow::Result<Vec<Suggestion>> {
        Ok(ContentAnalyzer::analyze(self, text, cursor))
    }
}

/// Heading whose last mention before the cursor is closest to it.
pub fn current_section(text: &str, cursor: usize) -> &'static str {
    let mut end = cursor.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = text[..end].to_lowercase();
    SECTION_HEADINGS
        .iter()
        .filter_map(|(needle, name)| before.rfind(needle).map(|at| (at, *name)))
        .max_by_key(|(at, _)| *at)
        .map(|(_, name)| name)
        .unwrap_or("Introduction")
}
