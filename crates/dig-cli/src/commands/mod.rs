pub mod admins;
pub mod auth;
pub mod browse;
pub mod discoveries;
pub mod discovery;
pub mod dispatch;
pub mod markers;
pub mod schema;
