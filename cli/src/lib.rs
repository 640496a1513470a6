use anyhow::Context;
use clap::CommandFactory;
use clap::Parser;
use scholar_assist::AssistConfig;
use scholar_assist::UsageLimiter;
use scholar_assist::config;
use scholar_assist::factory;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

pub mod analyze;
pub mod cite;
pub mod grade;
pub mod ingest;
pub mod review;
pub mod usage;

/// Academic writing assistant.
#[derive(Debug, Parser)]
#[command(name = "scholar", version)]
pub struct Cli {
    /// Data directory for config and usage state (default: $SCHOLAR_HOME or ~/.scholar).
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Suggest citations, clarifications and structure fixes for an essay.
    Analyze(analyze::AnalyzeArgs),
    /// Inspect or change the free-tier usage counters.
    Usage(usage::UsageCli),
    /// Validate context documents and record them as uploads.
    Ingest(ingest::IngestArgs),
    /// Predict a grade for an essay.
    Grade(grade::GradeArgs),
    /// Find catalog sources for a claim.
    Cite(cite::CiteArgs),
    /// Show expert comments and revision prompts.
    Review(review::ReviewArgs),
    /// Generate shell completion scripts.
    Completion {
        #[arg(value_enum, default_value_t = clap_complete::Shell::Bash)]
        shell: clap_complete::Shell,
    },
}

/// Everything a command needs from the data directory.
pub struct Workspace {
    pub home: PathBuf,
    pub config: AssistConfig,
}

impl Workspace {
    pub fn open(home: Option<PathBuf>) -> anyhow::Result<Self> {
        let home = home.unwrap_or_else(config::home_dir);
        tracing::debug!("data directory {}", home.display());
        let config = AssistConfig::load(&home)
            .with_context(|| format!("loading {}", home.join("config.toml").display()))?;
        Ok(Self { home, config })
    }

    pub fn limiter(&self) -> anyhow::Result<UsageLimiter> {
        let store = factory::open_store(&self.home, None)?;
        Ok(UsageLimiter::load_with_allowance(
            store,
            &self.config.storage_key,
            self.config.free_interactions,
        ))
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Completion { shell } = cli.cmd {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "scholar", &mut std::io::stdout());
        return Ok(());
    }
    let ws = Workspace::open(cli.home)?;
    match cli.cmd {
        Command::Analyze(args) => analyze::run(&ws, args),
        Command::Usage(args) => usage::run(&ws, args),
        Command::Ingest(args) => ingest::run(&ws, args),
        Command::Grade(args) => grade::run(args),
        Command::Cite(args) => cite::run(args),
        Command::Review(args) => review::run(&ws, args),
        Command::Completion { .. } => Ok(()),
    }
}

/// Read the essay from `file`, or from stdin when no file is given.
pub(crate) fn read_essay(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading essay from stdin")?;
            Ok(text)
        }
    }
}
