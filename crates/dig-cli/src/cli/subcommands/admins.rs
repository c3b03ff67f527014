use clap::{Args, Subcommand};
use dig_core::Role;

#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// List admin accounts.
    List,
    /// Create an admin account.
    Create(AdminCreateArgs),
    /// Delete an admin account.
    Delete(AdminDeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AdminCreateArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub password: String,
    /// ADMIN or SUPER-ADMIN.
    #[arg(long, default_value = "ADMIN")]
    pub role: Role,
}

#[derive(Clone, Debug, Args)]
pub struct AdminDeleteArgs {
    pub username: String,
}
