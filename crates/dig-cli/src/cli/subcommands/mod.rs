mod admins;
mod auth;
mod discoveries;
mod discovery;

pub use admins::AdminCommands;
pub use auth::{AuthCommands, AuthLoginArgs};
pub use discoveries::{DiscoveriesCommands, ListArgs};
pub use discovery::{
    DeleteArgs, DiscoveryCommands, DiscoveryCreateArgs, DiscoveryFields, UpdateArgs,
};
