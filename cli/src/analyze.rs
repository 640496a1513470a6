use anyhow::Context;
use scholar_assist::AnalysisReport;
use scholar_assist::ContentAnalyzer;
use scholar_assist::ingest;
use scholar_assist::types::PlanTier;
use std::path::PathBuf;

use crate::Workspace;
use crate::read_essay;

#[derive(Debug, clap::Args)]
pub struct AnalyzeArgs {
    /// Essay to analyze; reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Cursor byte offset (default: end of text).
    #[arg(long)]
    pub cursor: Option<usize>,

    /// Context documents (rubric, notes, sources) that flavor the advice.
    #[arg(long = "context", value_name = "FILE")]
    pub context: Vec<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(ws: &Workspace, args: AnalyzeArgs) -> anyhow::Result<()> {
    let text = read_essay(args.file.as_deref())?;
    let tier = if args.context.is_empty() {
        PlanTier::Free
    } else {
        ws.limiter()?.tier()
    };
    let mut docs = Vec::with_capacity(args.context.len());
    for path in &args.context {
        let doc = ingest::ingest_path(path, ws.config.upload_limit(tier))
            .with_context(|| format!("reading context {}", path.display()))?;
        docs.push(doc);
    }
    let analyzer = ContentAnalyzer::new()
        .with_max_suggestions(ws.config.max_suggestions)
        .with_context(&docs);
    let report = analyzer.report(&text, args.cursor.unwrap_or(text.len()));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("Section: {}", report.current_section);
    println!("Words: {}", report.word_count);
    if report.suggestions.is_empty() {
        println!("No suggestions.");
        return;
    }
    for (i, s) in report.suggestions.iter().enumerate() {
        println!(
            "{}. [{}] {} ({}) at {}",
            i + 1,
            s.priority.as_str(),
            s.kind.as_str(),
            s.detector,
            s.anchor
        );
        println!("   {}", s.message);
        if let Some(expert) = &s.expert {
            println!("   from {expert}");
        }
        println!("   {}: {:?}", s.action, s.insertion_text);
    }
}
