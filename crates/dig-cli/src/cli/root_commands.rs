use clap::{Args, Subcommand};

use crate::cli::subcommands::{AdminCommands, AuthCommands, DiscoveriesCommands, DiscoveryCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Read discoveries (all, filtered, or by text search).
    Discoveries {
        #[command(subcommand)]
        action: DiscoveriesCommands,
    },
    /// Create, update, or delete one discovery.
    Discovery {
        #[command(subcommand)]
        action: DiscoveryCommands,
    },
    /// Print the map markers and their popup state.
    Markers(MarkersArgs),
    /// Interactive map session over stdin.
    Browse,
    /// Sign in, sign out, and inspect the stored credential.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Manage admin accounts (SUPER-ADMIN).
    Admins {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Print the JSON schema of a domain type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MarkersArgs {
    /// Open the popup of this discovery id (repeatable).
    #[arg(long = "open", value_name = "ID")]
    pub open: Vec<String>,
    /// Use the compact-screen zoom level.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. discovery, discovery-draft, admin, new-admin, filters.
    pub type_name: String,
}
