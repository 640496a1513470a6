use scholar_assist::grading::HeuristicScorer;
use scholar_assist::grading::predict_grade;
use std::path::PathBuf;

use crate::read_essay;

#[derive(Debug, clap::Args)]
pub struct GradeArgs {
    /// Essay to grade; reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Instructor the prediction is attributed to.
    #[arg(long)]
    pub instructor: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: GradeArgs) -> anyhow::Result<()> {
    let text = read_essay(args.file.as_deref())?;
    let report = predict_grade(&HeuristicScorer, &text, args.instructor.as_deref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("Predicted score: {}/100", report.score);
    println!(
        "Instructor: {} ({})",
        report.instructor.name, report.instructor.initials
    );
    println!("{}", report.feedback);
    for c in &report.categories {
        let mark = if c.checked { "x" } else { " " };
        println!("[{mark}] {} {}/5", c.name, c.score);
    }
    Ok(())
}
