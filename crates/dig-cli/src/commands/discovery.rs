use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, bail};
use dig_client::DiscoveryClient;
use dig_core::{DiscoveryDraft, DiscoveryId};
use dig_view::{Field, MapController, PanelState};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{
    DeleteArgs, DiscoveryCommands, DiscoveryCreateArgs, DiscoveryFields, UpdateArgs,
};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CreatedResponse {
    created: bool,
    discovery: DiscoveryDraft,
}

#[derive(Serialize)]
struct DeletedResponse {
    id: DiscoveryId,
    deleted: bool,
}

/// Handle `digmap discovery <subcommand>`.
pub async fn handle(
    action: &DiscoveryCommands,
    ctx: AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !ctx.session.access().can_edit_discoveries() {
        tracing::warn!("credential carries no edit role; the backend may reject this");
    }
    match action {
        DiscoveryCommands::Create(args) => create(args, &ctx, flags).await,
        DiscoveryCommands::Update(args) => update(args, ctx, flags).await,
        DiscoveryCommands::Delete(args) => delete(args, ctx, flags).await,
    }
}

async fn create(
    args: &DiscoveryCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft = DiscoveryDraft {
        title: args.title.clone(),
        description: args.description.clone(),
        bible_era: args.era,
        region: args.region.clone(),
        kind: args.kind,
        source_link: args.source_link.clone(),
        latitude: args.lat,
        longitude: args.lng,
    };
    draft.validate()?;

    ctx.client()?
        .create_discovery(&ctx.session, &draft)
        .await
        .context("failed to create discovery")?;

    output(
        &CreatedResponse {
            created: true,
            discovery: draft,
        },
        flags.format,
    )
}

async fn update(args: &UpdateArgs, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = DiscoveryId::new(args.id.clone());
    let mut map = ctx.into_map().await?;
    map.edit(&id)?;

    for (field, value) in overrides(&args.fields) {
        map.panel_mut().set_field(field, value)?;
    }
    map.save().await?;
    ensure_not_failed(&map)?;

    let updated = map
        .view()
        .discovery(&id)
        .cloned()
        .with_context(|| format!("discovery {id} vanished after update"))?;
    output(&updated, flags.format)
}

async fn delete(args: &DeleteArgs, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = DiscoveryId::new(args.id.clone());
    let mut map = ctx.into_map().await?;
    map.edit(&id)?;
    map.panel_mut().request_delete()?;

    let title = map.view().discovery(&id).map(|d| d.title.clone());
    if !args.yes && !confirm(title.as_deref().unwrap_or_default())? {
        map.panel_mut().cancel_delete();
        map.panel_mut().close();
        return output(&DeletedResponse { id, deleted: false }, flags.format);
    }

    map.delete().await?;
    ensure_not_failed(&map)?;
    output(&DeletedResponse { id, deleted: true }, flags.format)
}

/// The form edits requested on the command line, in form order.
fn overrides(fields: &DiscoveryFields) -> Vec<(Field, &str)> {
    [
        (Field::Title, &fields.title),
        (Field::Description, &fields.description),
        (Field::BibleEra, &fields.era),
        (Field::Region, &fields.region),
        (Field::Type, &fields.kind),
        (Field::SourceLink, &fields.source_link),
        (Field::Latitude, &fields.lat),
        (Field::Longitude, &fields.lng),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
    .collect()
}

fn ensure_not_failed(map: &MapController<DiscoveryClient>) -> anyhow::Result<()> {
    if let PanelState::Failed {
        operation, message, ..
    } = map.panel().state()
    {
        bail!("{operation} failed: {message}");
    }
    Ok(())
}

fn confirm(title: &str) -> anyhow::Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        bail!("refusing to delete without confirmation; pass --yes");
    }

    let mut stderr = std::io::stderr();
    write!(stderr, "Delete '{title}'? [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn only_given_fields_are_overridden() {
        let fields = DiscoveryFields {
            title: Some("Pool of Siloam".into()),
            lng: Some("35.2345".into()),
            ..DiscoveryFields::default()
        };
        assert_eq!(
            overrides(&fields),
            vec![(Field::Title, "Pool of Siloam"), (Field::Longitude, "35.2345")]
        );
    }

    #[test]
    fn no_flags_no_overrides() {
        assert!(overrides(&DiscoveryFields::default()).is_empty());
    }
}
