use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `digmap` binary.
#[derive(Debug, Parser)]
#[command(
    name = "digmap",
    version,
    about = "Browse and curate archaeological discoveries on the map backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging, including request URLs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend origin, overriding DIGMAP_API__URL and config files
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use dig_core::Role;
    use pretty_assertions::assert_eq;

    use super::subcommands::{AdminCommands, AuthCommands, DiscoveriesCommands, DiscoveryCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "digmap",
            "--format",
            "table",
            "--verbose",
            "discoveries",
            "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Discoveries {
                action: DiscoveriesCommands::List(_)
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["digmap", "markers", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Markers(_)));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let parsed = Cli::try_parse_from(["digmap", "-q", "-v", "markers"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["digmap", "--format", "xml", "markers"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn api_url_is_carried_into_flags() {
        let cli = Cli::try_parse_from([
            "digmap",
            "--api-url",
            "http://localhost:8080",
            "discoveries",
            "search",
            "jericho",
        ])
        .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.api_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn list_filters_are_optional_and_named() {
        let cli = Cli::try_parse_from([
            "digmap",
            "discoveries",
            "list",
            "--era",
            "Old Testament",
            "--type",
            "ruin",
        ])
        .expect("cli should parse");

        let Commands::Discoveries {
            action: DiscoveriesCommands::List(args),
        } = cli.command
        else {
            panic!("expected discoveries list");
        };
        assert_eq!(args.era.as_deref(), Some("Old Testament"));
        assert_eq!(args.kind.as_deref(), Some("ruin"));
        assert_eq!(args.region, None);
        assert_eq!(args.query, None);
    }

    #[test]
    fn delete_takes_id_and_yes() {
        let cli = Cli::try_parse_from(["digmap", "discovery", "delete", "42", "--yes"])
            .expect("cli should parse");
        let Commands::Discovery {
            action: DiscoveryCommands::Delete(args),
        } = cli.command
        else {
            panic!("expected discovery delete");
        };
        assert_eq!(args.id, "42");
        assert!(args.yes);
    }

    #[test]
    fn update_accepts_partial_overrides() {
        let cli = Cli::try_parse_from([
            "digmap",
            "discovery",
            "update",
            "7",
            "--title",
            "Tel Dan Stele",
            "--lat",
            "33.248",
        ])
        .expect("cli should parse");
        let Commands::Discovery {
            action: DiscoveryCommands::Update(args),
        } = cli.command
        else {
            panic!("expected discovery update");
        };
        assert_eq!(args.id, "7");
        assert_eq!(args.fields.title.as_deref(), Some("Tel Dan Stele"));
        assert_eq!(args.fields.lat.as_deref(), Some("33.248"));
        assert_eq!(args.fields.description, None);
    }

    #[test]
    fn create_requires_title_and_coordinates() {
        let parsed = Cli::try_parse_from(["digmap", "discovery", "create", "--title", "x"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn login_requires_username() {
        let parsed = Cli::try_parse_from(["digmap", "auth", "login", "--password", "pw"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "digmap", "auth", "login", "--username", "ada", "--password", "pw",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Login(_)
            }
        ));
    }

    #[test]
    fn admin_create_defaults_to_admin_role() {
        let cli = Cli::try_parse_from([
            "digmap",
            "admins",
            "create",
            "--username",
            "petrie",
            "--first-name",
            "Flinders",
            "--last-name",
            "Petrie",
            "--password",
            "pw",
        ])
        .expect("cli should parse");
        let Commands::Admins {
            action: AdminCommands::Create(args),
        } = cli.command
        else {
            panic!("expected admins create");
        };
        assert_eq!(args.role, Role::Admin);
    }
}
