use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum DiscoveriesCommands {
    /// List discoveries, narrowed by any filters given.
    List(ListArgs),
    /// Full-text search.
    Search(SearchArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Biblical era ("Old Testament", "nt", ... or "All").
    #[arg(long)]
    pub era: Option<String>,
    /// Region name (free text, or "All").
    #[arg(long)]
    pub region: Option<String>,
    /// Discovery type (scroll, inscription, ruin, artifact, altar, church, or "All").
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Text sent alongside the filters.
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Search text; empty lists everything.
    pub text: String,
}
