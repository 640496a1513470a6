//! One writer's editing session: the document, its suggestions, uploaded
//! context and the usage gate in front of every accepted suggestion.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::analyzer::ContentAnalyzer;
use crate::config::AssistConfig;
use crate::context;
use crate::editor::EditorSurface;
use crate::error::Error;
use crate::error::Result;
use crate::ingest;
use crate::scheduler::AnalysisScheduler;
use crate::suggestions::ActiveSuggestions;
use crate::suggestions::SuggestionState;
use crate::types::Suggestion;
use crate::types::UploadedDocument;
use crate::usage::UsageLimiter;
use crate::usage::UsageState;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AcceptOutcome {
    /// The insertion text now sits at `start..end`; the cursor is at `end`.
    Applied {
        id: String,
        start: usize,
        end: usize,
    },
    /// Free allowance is spent. Nothing changed.
    PaywallRequired,
}

pub struct WritingSession {
    config: AssistConfig,
    editor: EditorSurface,
    limiter: UsageLimiter,
    active: ActiveSuggestions,
    documents: Vec<UploadedDocument>,
}

impl WritingSession {
    pub fn new(config: AssistConfig, limiter: UsageLimiter) -> Self {
        Self {
            editor: EditorSurface::from_config(&config),
            config,
            limiter,
            active: ActiveSuggestions::new(),
            documents: Vec::new(),
        }
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    pub fn editor(&self) -> &EditorSurface {
        &self.editor
    }

    /// A user edit: replaces the text and moves the cursor. Suggestions
    /// stay until the next analysis lands.
    pub fn edit(&mut self, text: impl Into<String>, cursor: usize) {
        self.editor.set_content(text, cursor);
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.editor.set_cursor(pos);
    }

    /// Install an analysis result as the active set. Returns the suggestions
    /// it supersedes.
    pub fn apply_analysis(&mut self, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        let superseded = self.active.replace(suggestions);
        tracing::debug!(
            "session: {} active suggestions, {} superseded",
            self.active.len(),
            superseded.len()
        );
        superseded
    }

    /// Analyze the current text synchronously and apply the result.
    pub fn analyze_now(&mut self) -> &[Suggestion] {
        let found = self
            .analyzer()
            .analyze(self.editor.content(), self.editor.cursor_position());
        self.apply_analysis(found);
        self.active.as_slice()
    }

    /// Debounced analysis bound to the current context documents.
    pub fn scheduler(&self) -> AnalysisScheduler {
        AnalysisScheduler::new(Arc::new(self.analyzer()), self.config.debounce())
    }

    pub fn accept(&mut self, id: &str) -> Result<AcceptOutcome> {
        let Some(suggestion) = self.active.get(id).cloned() else {
            return Err(Error::SuggestionNotFound(id.to_string()));
        };
        if !self.limiter.try_consume_interaction() {
            tracing::info!("session: accept of {id} blocked by usage limit");
            return Ok(AcceptOutcome::PaywallRequired);
        }
        let at = suggestion.insertion_point(self.editor.cursor_position());
        self.editor.set_cursor(at);
        let (start, end) = self.editor.insert_with_highlight(&suggestion.insertion_text);
        self.active.resolve(id, SuggestionState::Accepted);
        self.active.shift_after_insert(start, end - start);
        tracing::info!("session: accepted {id} at {start}");
        Ok(AcceptOutcome::Applied {
            id: suggestion.id,
            start,
            end,
        })
    }

    pub fn reject(&mut self, id: &str) -> Result<Suggestion> {
        let rejected = self
            .active
            .resolve(id, SuggestionState::Rejected)
            .ok_or_else(|| Error::SuggestionNotFound(id.to_string()))?;
        tracing::info!("session: rejected {id}");
        Ok(rejected)
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.active.as_slice()
    }

    pub fn suggestion_state(&self, id: &str) -> Option<SuggestionState> {
        self.active.state(id)
    }

    pub fn inline_suggestions(&self, cursor: usize) -> Vec<&Suggestion> {
        self.active
            .near(cursor, self.config.inline_radius, self.config.inline_limit)
    }

    /// Move the cursor to a suggestion's anchor and highlight around it.
    /// Returns the 1-based line.
    pub fn focus_suggestion(&mut self, id: &str) -> Result<usize> {
        let anchor = self
            .active
            .get(id)
            .map(|s| s.anchor)
            .ok_or_else(|| Error::SuggestionNotFound(id.to_string()))?;
        Ok(self.editor.focus_at_position(anchor))
    }

    /// Ingest a context document at the current plan's size ceiling.
    pub fn upload(&mut self, name: &str, mime: &str, bytes: &[u8]) -> Result<&UploadedDocument> {
        let limit = self.config.upload_limit(self.limiter.tier());
        let doc = ingest::ingest(name, mime, bytes, limit)?;
        Ok(self.add_document(doc))
    }

    pub fn upload_path(&mut self, path: &Path) -> Result<&UploadedDocument> {
        let limit = self.config.upload_limit(self.limiter.tier());
        let doc = ingest::ingest_path(path, limit)?;
        Ok(self.add_document(doc))
    }

    fn add_document(&mut self, doc: UploadedDocument) -> &UploadedDocument {
        self.limiter.record_upload();
        self.documents.push(doc);
        let idx = self.documents.len() - 1;
        &self.documents[idx]
    }

    pub fn remove_document(&mut self, id: &str) -> Option<UploadedDocument> {
        let idx = self.documents.iter().position(|d| d.id == id)?;
        Some(self.documents.remove(idx))
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    pub fn context_summary(&self) -> String {
        context::summarize(&self.documents)
    }

    pub fn analyzer(&self) -> ContentAnalyzer {
        ContentAnalyzer::new()
            .with_max_suggestions(self.config.max_suggestions)
            .with_context(&self.documents)
    }

    pub fn usage(&self) -> &UsageState {
        self.limiter.state()
    }

    pub fn limiter(&self) -> &UsageLimiter {
        &self.limiter
    }

    pub fn upgrade(&mut self) {
        self.limiter.upgrade();
    }
}
