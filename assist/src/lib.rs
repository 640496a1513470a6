//! Writing-assistant engine: heuristic suggestions over an essay, a
//! freemium usage gate, and context documents that flavor the advice.

pub mod analyzer;
pub mod citations;
pub mod config;
pub mod context;
pub mod editor;
mod error;
pub mod experts;
pub mod factory;
pub mod grading;
pub mod ingest;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod suggestions;
pub mod types;
pub mod usage;

pub use analyzer::AnalysisReport;
pub use analyzer::ContentAnalyzer;
pub use analyzer::SuggestionSource;
pub use config::AssistConfig;
pub use editor::EditorSurface;
pub use error::Error;
pub use error::Result;
pub use scheduler::AnalysisScheduler;
pub use session::AcceptOutcome;
pub use session::WritingSession;
pub use types::*;
pub use usage::UsageLimiter;
pub use usage::UsageState;
