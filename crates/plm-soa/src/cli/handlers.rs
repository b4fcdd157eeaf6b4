//! Subcommand dispatch
//!
//! The session is always closed before output is written, so a failing
//! command never leaves a server session behind.

use std::{collections::BTreeMap, io::Write};

use anyhow::Result;
use clap::ArgMatches;
use plm_soa_core::{
    operations::{
        item_types::TypeQuery,
        items::{CreateItemParams, GetItemParams},
    },
    CommandResult, ErrorCode, ErrorDetail, ResponseEnvelope,
};
use serde::Serialize;
use serde_json::Value;

use super::setup::{credentials, resolve_config};
use crate::service::PlmService;

/// Run the CLI. `Ok(true)` when the command produced data.
///
/// # Errors
/// Returns an error for setup failures (configuration, HTTP client, stdout)
pub async fn run_cli(matches: &ArgMatches) -> Result<bool> {
    let config = resolve_config(matches)?;
    let service = PlmService::from_config(&config)?;

    if let Err(error) = service.login(credentials(&config)).await {
        return print_envelope(&ResponseEnvelope::<Value>::failure(error));
    }

    let outcome = dispatch(&service, matches).await;

    if let Err(error) = service.logout().await {
        tracing::warn!(code = %error.code, "Logout failed: {}", error.message);
    }

    print_envelope(&ResponseEnvelope::from(outcome))
}

async fn dispatch(service: &PlmService, matches: &ArgMatches) -> CommandResult<Value> {
    match matches.subcommand() {
        Some(("search", sub)) => {
            let query = sub.get_one::<String>("query").cloned().unwrap_or_default();
            let params = service.search_params(query);
            let params = match sub.get_one::<i64>("limit") {
                Some(limit) => params.with_limit(*limit),
                None => params,
            };
            let params = match sub.get_one::<i64>("start") {
                Some(start) => params.with_start_index(*start),
                None => params,
            };
            let params = match sub.get_one::<String>("type") {
                Some(object_type) => params.with_type(object_type.clone()),
                None => params,
            };
            to_value(service.search(params).await)
        }
        Some(("get", sub)) => {
            let params = GetItemParams::new(sub.get_one::<String>("id").cloned().unwrap_or_default());
            let params = match sub.get_one::<String>("type") {
                Some(object_type) => params.with_type(object_type.clone()),
                None => params,
            };
            to_value(service.get_item(params).await)
        }
        Some(("create", sub)) => {
            let item_type = sub.get_one::<String>("type").cloned().unwrap_or_default();
            let name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            let params = CreateItemParams {
                description: sub.get_one::<String>("description").cloned(),
                properties: properties(sub),
                ..CreateItemParams::new(item_type, name)
            };
            to_value(service.create_item(params).await)
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").cloned().unwrap_or_default();
            to_value(service.update_item(id, properties(sub)).await)
        }
        Some(("types", sub)) => {
            let names = sub
                .get_many::<String>("names")
                .map(|names| names.cloned().collect::<Vec<_>>())
                .unwrap_or_default();
            to_value(service.item_types(TypeQuery::new(names)).await)
        }
        Some(("favorites", _)) => to_value(service.favorites().await),
        Some(("session-info", _)) => to_value(service.session_info().await),
        Some((other, _)) => Err(ErrorDetail::invalid_parameter(format!("Unknown command '{other}'"))),
        None => Err(ErrorDetail::invalid_parameter("No command given")),
    }
}

fn properties(matches: &ArgMatches) -> BTreeMap<String, Value> {
    matches
        .get_many::<(String, Value)>("prop")
        .map(|pairs| pairs.cloned().collect())
        .unwrap_or_default()
}

/// Erase the result type so every subcommand shares one output path.
fn to_value<T: Serialize>(result: CommandResult<T>) -> CommandResult<Value> {
    result.and_then(|data| {
        serde_json::to_value(data).map_err(|e| {
            ErrorDetail::error(ErrorCode::ApiError, format!("Failed to serialize result: {e}"))
        })
    })
}

fn print_envelope(envelope: &ResponseEnvelope<Value>) -> Result<bool> {
    let rendered = serde_json::to_string_pretty(envelope)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(envelope.is_success())
}
