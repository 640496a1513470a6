use anyhow::Context;
use scholar_assist::experts;
use scholar_assist::ingest;
use std::path::PathBuf;

use crate::Workspace;

#[derive(Debug, clap::Args)]
pub struct ReviewArgs {
    /// Context documents to draw comments from.
    #[arg(long = "context", value_name = "FILE")]
    pub context: Vec<PathBuf>,
}

pub fn run(ws: &Workspace, args: ReviewArgs) -> anyhow::Result<()> {
    let limit = ws.config.upload_limit(ws.limiter()?.tier());
    let docs = args
        .context
        .iter()
        .map(|p| {
            ingest::ingest_path(p, limit).with_context(|| format!("reading context {}", p.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    println!("{}", experts::overall_assessment(&docs));
    println!();
    for c in experts::expert_comments(&docs) {
        println!("[{}] {}: {}", c.initials, c.author, c.role);
        println!("    {}", c.comment);
    }
    println!();
    println!("Try next:");
    for prompt in experts::review_prompts(&docs) {
        println!("- {prompt}");
    }
    Ok(())
}
