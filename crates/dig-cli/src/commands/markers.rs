use dig_core::DiscoveryId;
use dig_view::{Marker, Viewport};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::OutputFormat;
use crate::cli::root_commands::MarkersArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct MarkersResponse {
    viewport: Viewport,
    markers: Vec<Marker>,
}

/// Handle `digmap markers`.
pub async fn handle(args: &MarkersArgs, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let viewport = Viewport::from_config(&ctx.config.map, args.compact);
    let mut map = ctx.into_map().await?;

    for raw in &args.open {
        let id = DiscoveryId::new(raw.clone());
        if map.open_popup(&id).is_none() {
            tracing::warn!(%id, "no discovery with this id; popup not opened");
        }
    }

    let markers = map.view().marker_list();
    // A table has no room for the viewport header; print just the markers.
    if flags.format == OutputFormat::Table {
        return output(&markers, flags.format);
    }
    output(&MarkersResponse { viewport, markers }, flags.format)
}
