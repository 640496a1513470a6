use anyhow::Context;
use scholar_assist::WritingSession;
use scholar_assist::context;
use std::path::PathBuf;

use crate::Workspace;

#[derive(Debug, clap::Args)]
pub struct IngestArgs {
    /// TXT, MD, PDF or DOCX files.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(ws: &Workspace, args: IngestArgs) -> anyhow::Result<()> {
    let mut session = WritingSession::new(ws.config.clone(), ws.limiter()?);
    for path in &args.files {
        let doc = session
            .upload_path(path)
            .with_context(|| format!("ingesting {}", path.display()))?;
        println!(
            "Ingested {} ({}, {} bytes, {} chars of text)",
            doc.name,
            doc.kind.description(),
            doc.byte_size,
            doc.extracted_text.chars().count()
        );
    }
    println!();
    println!("{}", session.context_summary());
    println!("Key requirements:");
    for requirement in context::key_requirements(session.documents()) {
        println!("- {requirement}");
    }
    Ok(())
}
