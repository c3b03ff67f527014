use anyhow::anyhow;
use dig_core::{
    Admin, Discovery, DiscoveryDraft, DiscoveryType, Era, FilterState, GeoPoint, LoginRequest,
    LoginResponse, NewAdmin, Role,
};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const TYPE_NAMES: [&str; 11] = [
    "discovery",
    "discovery-draft",
    "geo-point",
    "era",
    "discovery-type",
    "role",
    "admin",
    "new-admin",
    "login-request",
    "login-response",
    "filters",
];

/// Handle `digmap schema <type>`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_named(&args.type_name).ok_or_else(|| {
        anyhow!(
            "unknown type '{}' (expected one of: {})",
            args.type_name,
            TYPE_NAMES.join(", ")
        )
    })?;
    output(&schema, flags.format)
}

fn schema_named(name: &str) -> Option<Schema> {
    let name = name.trim().to_ascii_lowercase().replace('_', "-");
    Some(match name.as_str() {
        "discovery" => schema_for!(Discovery),
        "discovery-draft" | "draft" => schema_for!(DiscoveryDraft),
        "geo-point" => schema_for!(GeoPoint),
        "era" => schema_for!(Era),
        "discovery-type" | "type" => schema_for!(DiscoveryType),
        "role" => schema_for!(Role),
        "admin" => schema_for!(Admin),
        "new-admin" => schema_for!(NewAdmin),
        "login-request" => schema_for!(LoginRequest),
        "login-response" => schema_for!(LoginResponse),
        "filters" | "filter-state" => schema_for!(FilterState),
        _ => return None,
    })
}
