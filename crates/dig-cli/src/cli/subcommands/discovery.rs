use clap::{Args, Subcommand};
use dig_core::{DiscoveryType, Era};

#[derive(Clone, Debug, Subcommand)]
pub enum DiscoveryCommands {
    /// Add a new discovery (ADMIN).
    Create(DiscoveryCreateArgs),
    /// Change fields of an existing discovery (ADMIN).
    Update(UpdateArgs),
    /// Remove a discovery after confirmation (ADMIN).
    Delete(DeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DiscoveryCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub era: Era,
    #[arg(long, default_value = "")]
    pub region: String,
    #[arg(long = "type")]
    pub kind: DiscoveryType,
    #[arg(long, default_value = "")]
    pub source_link: String,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

/// Overrides applied to the edit form. Values stay text: the form validates them.
#[derive(Clone, Debug, Default, Args)]
pub struct DiscoveryFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub era: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub source_link: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    /// Discovery id.
    pub id: String,
    #[command(flatten)]
    pub fields: DiscoveryFields,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    /// Discovery id.
    pub id: String,
    /// Skip the interactive confirmation.
    #[arg(short, long)]
    pub yes: bool,
}
