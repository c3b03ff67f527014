use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Discoveries { action } => commands::discoveries::handle(&action, &ctx, flags).await,
        Commands::Discovery { action } => commands::discovery::handle(&action, ctx, flags).await,
        Commands::Markers(args) => commands::markers::handle(&args, ctx, flags).await,
        Commands::Browse => commands::browse::handle(ctx, flags).await,
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Admins { action } => commands::admins::handle(&action, &ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
