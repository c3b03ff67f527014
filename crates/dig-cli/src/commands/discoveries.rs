use dig_client::DiscoveryQuery;
use dig_core::FilterState;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{DiscoveriesCommands, ListArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `digmap discoveries <subcommand>`.
pub async fn handle(
    action: &DiscoveriesCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let query = match action {
        DiscoveriesCommands::List(args) => list_query(args)?,
        DiscoveriesCommands::Search(args) => DiscoveryQuery::from_search(&args.text),
    };

    let client = ctx.client()?;
    let discoveries = client.list_discoveries(&query).await?;
    output(&discoveries, flags.format)
}

fn list_query(args: &ListArgs) -> anyhow::Result<DiscoveryQuery> {
    let mut filters = FilterState::default();
    if let Some(era) = &args.era {
        filters.select_era(era)?;
    }
    if let Some(region) = &args.region {
        filters.select_region(region);
    }
    if let Some(kind) = &args.kind {
        filters.select_kind(kind)?;
    }
    Ok(DiscoveryQuery::from_filters(
        &filters,
        args.query.as_deref().unwrap_or_default(),
    ))
}
