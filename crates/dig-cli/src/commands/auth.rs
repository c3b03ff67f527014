use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AuthCommands, AuthLoginArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    role: Option<String>,
    subject: Option<String>,
    can_edit_discoveries: bool,
    can_manage_admins: bool,
    expires_at: Option<String>,
    expired: bool,
    token_source: Option<&'static str>,
    store: &'static str,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

/// Handle `digmap auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    mut ctx: AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, &mut ctx).await?,
        AuthCommands::Logout => {
            ctx.session
                .logout()
                .context("failed to clear stored credentials")?;
            return output(&AuthLogoutResponse { cleared: true }, flags.format);
        }
        AuthCommands::Status => {}
    }
    output(&status(&ctx), flags.format)
}

async fn login(args: &AuthLoginArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let client = ctx.client()?;
    client
        .sign_in(&mut ctx.session, &args.username, &args.password)
        .await
        .with_context(|| format!("login failed for '{}'", args.username))?;
    tracing::info!(username = %args.username, store = ctx.session.store_name(), "signed in");
    Ok(())
}

fn status(ctx: &AppContext) -> AuthStatusResponse {
    let session = &ctx.session;
    let access = session.access();
    let expires_at = session.expires_at();
    AuthStatusResponse {
        authenticated: session.is_authenticated(),
        role: access.role().map(|role| role.to_string()),
        subject: access.subject().map(str::to_string),
        can_edit_discoveries: access.can_edit_discoveries(),
        can_manage_admins: access.can_manage_admins(),
        expires_at: expires_at.map(|at| at.to_rfc3339()),
        expired: expires_at.is_some_and(|at| at <= chrono::Utc::now()),
        token_source: session.source(),
        store: session.store_name(),
    }
}
