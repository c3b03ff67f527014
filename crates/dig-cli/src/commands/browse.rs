//! `digmap browse`: the map as a line-oriented session.
//!
//! Plain lines are search text and go through the debouncer, so pasting
//! several lines quickly issues one search. Lines starting with `:` are
//! commands. A frame (filters, search, markers) is printed each time the
//! displayed list changes.

use anyhow::Context;
use dig_client::DiscoveryClient;
use dig_core::{DiscoveryId, FilterState};
use dig_view::{MapController, MapEvent, Marker, Settled};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

const HELP: &str = "commands: :era <v>  :region <v>  :type <v>  :clear  :open <id>  :close <id>  :quit  (other lines search)";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Search(String),
    Era(String),
    Region(String),
    Type(String),
    Clear,
    Open(String),
    Close(String),
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return Input::Search(line.to_string());
    };
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, rest)| (name, rest.trim()));
    match name {
        "era" => Input::Era(rest.to_string()),
        "region" => Input::Region(rest.to_string()),
        "type" => Input::Type(rest.to_string()),
        "clear" => Input::Clear,
        "open" if !rest.is_empty() => Input::Open(rest.to_string()),
        "close" if !rest.is_empty() => Input::Close(rest.to_string()),
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

#[derive(Serialize)]
struct Frame<'a> {
    filters: &'a FilterState,
    search: &'a str,
    count: usize,
    markers: Vec<Marker>,
}

/// Handle `digmap browse`.
pub async fn handle(ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut map = ctx.into_map().await?;
    print_frame(&map, flags)?;
    if !flags.quiet {
        eprintln!("{HELP}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Input::Quit => return Ok(()),
                    input => apply(&mut map, input, flags)?,
                }
            }
            Some(event) = map.step() => on_event(&map, &event, flags)?,
        }
    }

    // Input closed: let the last search settle before leaving.
    for event in map.run_until_idle().await {
        on_event(&map, &event, flags)?;
    }
    Ok(())
}

fn apply(
    map: &mut MapController<DiscoveryClient>,
    input: Input,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rejected = match input {
        Input::Search(text) => {
            map.type_search(text);
            None
        }
        Input::Era(value) => map.select_era(&value).err().map(|e| e.to_string()),
        Input::Region(value) => {
            map.select_region(&value);
            None
        }
        Input::Type(value) => map.select_kind(&value).err().map(|e| e.to_string()),
        Input::Clear => {
            map.clear_filters();
            None
        }
        Input::Open(raw) => {
            let id = DiscoveryId::new(raw);
            match map.open_popup(&id) {
                Some(detail) => {
                    output(&detail, flags.format)?;
                    None
                }
                None => Some(format!("no discovery with id {id} on the map")),
            }
        }
        Input::Close(raw) => {
            map.close_popup(&DiscoveryId::new(raw));
            None
        }
        Input::Help => Some(HELP.to_string()),
        Input::Unknown(line) => Some(format!("unknown command '{line}'; {HELP}")),
        Input::Quit => None,
    };
    if let Some(message) = rejected {
        eprintln!("{message}");
    }
    Ok(())
}

fn on_event(
    map: &MapController<DiscoveryClient>,
    event: &MapEvent,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match event {
        MapEvent::SearchSettled(text) => {
            tracing::debug!(%text, "search settled");
            Ok(())
        }
        MapEvent::Settled(Settled::Stale { .. }) => Ok(()),
        MapEvent::Settled(Settled::Failed(message)) => {
            eprintln!("no data: {message}");
            print_frame(map, flags)
        }
        MapEvent::Settled(Settled::Applied(_)) => print_frame(map, flags),
    }
}

fn print_frame(map: &MapController<DiscoveryClient>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let view = map.view();
    let markers = view.marker_list();
    if flags.format == OutputFormat::Table {
        return output(&markers, flags.format);
    }
    output(
        &Frame {
            filters: view.filters(),
            search: view.search(),
            count: view.discoveries().len(),
            markers,
        },
        flags.format,
    )
}
