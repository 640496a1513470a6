use scholar_assist::citations::CitationCatalog;
use scholar_assist::citations::CitationStyle;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StyleArg {
    Apa,
    Mla,
}

impl From<StyleArg> for CitationStyle {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::Apa => CitationStyle::Apa,
            StyleArg::Mla => CitationStyle::Mla,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct CiteArgs {
    /// Claim to find supporting sources for.
    pub claim: String,

    #[arg(long, value_enum, default_value_t = StyleArg::Apa)]
    pub style: StyleArg,

    /// Maximum number of sources.
    #[arg(long, default_value_t = 3)]
    pub limit: usize,
}

pub fn run(args: CiteArgs) -> anyhow::Result<()> {
    let catalog = CitationCatalog::builtin();
    let style = CitationStyle::from(args.style);
    let found = catalog.find_sources(&args.claim, args.limit);
    if found.is_empty() {
        println!("No matching sources.");
        return Ok(());
    }
    for source in found {
        println!("{}", source.in_text(style));
        println!("  {}", source.reference(style));
        println!("  {}", source.url);
    }
    Ok(())
}
