use anyhow::bail;
use dig_core::NewAdmin;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdminCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AdminChangeResponse<'a> {
    username: &'a str,
    created: bool,
    deleted: bool,
}

/// Handle `digmap admins <subcommand>`.
pub async fn handle(
    action: &AdminCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !ctx.session.access().can_manage_admins() {
        bail!("admin management needs a SUPER-ADMIN credential (run `digmap auth login`)");
    }
    let client = ctx.client()?;

    match action {
        AdminCommands::List => {
            let admins = client.list_admins(&ctx.session).await?;
            output(&admins, flags.format)
        }
        AdminCommands::Create(args) => {
            let admin = NewAdmin {
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                username: args.username.clone(),
                password: args.password.clone(),
                role: args.role,
            };
            client.create_admin(&ctx.session, &admin).await?;
            output(
                &AdminChangeResponse {
                    username: &args.username,
                    created: true,
                    deleted: false,
                },
                flags.format,
            )
        }
        AdminCommands::Delete(args) => {
            client.delete_admin(&ctx.session, &args.username).await?;
            output(
                &AdminChangeResponse {
                    username: &args.username,
                    created: false,
                    deleted: true,
                },
                flags.format,
            )
        }
    }
}
