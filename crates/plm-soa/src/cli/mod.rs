//! Command-line interface
//!
//! Every subcommand logs in, runs one operation, logs out and prints the
//! `{ data }` / `{ error }` envelope as JSON on stdout.

pub mod handlers;
pub mod setup;

use clap::{value_parser, Arg, ArgAction, Command};
use serde_json::Value;

pub fn build_cli() -> Command {
    Command::new("plm-soa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search, load, create and update PLM items over the SOA protocol")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Explicit config file, applied over global and project config"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .global(true)
                .help("Server base URL, e.g. https://plm.example.com/tc"),
        )
        .arg(Arg::new("user").long("user").short('u').global(true).help("Login user"))
        .arg(
            Arg::new("password")
                .long("password")
                .global(true)
                .help("Login password (prefer PLM_SOA_PASSWORD)"),
        )
        .subcommand(cmd_search())
        .subcommand(cmd_get())
        .subcommand(cmd_create())
        .subcommand(cmd_update())
        .subcommand(cmd_types())
        .subcommand(Command::new("favorites").about("List the user's favorites"))
        .subcommand(Command::new("session-info").about("Show details of the server session"))
}

fn cmd_search() -> Command {
    Command::new("search")
        .about("Full-text item search")
        .arg(Arg::new("query").required(true).help("Search string, wildcards allowed"))
        .arg(
            Arg::new("limit")
                .long("limit")
                .short('n')
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Maximum results (1-100, default from config)"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Index of the first result"),
        )
        .arg(Arg::new("type").long("type").short('t').help("Restrict to one object type"))
}

fn cmd_get() -> Command {
    Command::new("get")
        .about("Load one object by uid")
        .arg(Arg::new("id").required(true).help("Object uid"))
        .arg(Arg::new("type").long("type").short('t').help("Object type, if known"))
}

fn property_arg() -> Arg {
    Arg::new("prop")
        .long("prop")
        .short('p')
        .action(ArgAction::Append)
        .value_parser(parse_property)
        .help("Property as name=value; JSON values are accepted")
}

fn cmd_create() -> Command {
    Command::new("create")
        .about("Create an item")
        .arg(Arg::new("type").required(true).help("Business object type, e.g. Item"))
        .arg(Arg::new("name").required(true).help("Object name"))
        .arg(Arg::new("description").long("description").short('d'))
        .arg(property_arg())
}

fn cmd_update() -> Command {
    Command::new("update")
        .about("Set properties on an object")
        .arg(Arg::new("id").required(true).help("Object uid"))
        .arg(property_arg().required(true))
}

fn cmd_types() -> Command {
    Command::new("types")
        .about("Describe business object types")
        .arg(
            Arg::new("names")
                .num_args(1..)
                .help("Type names; empty for the server default set"),
        )
}

/// `name=value`; the value is parsed as JSON when it is valid JSON and kept
/// as a string otherwise.
pub fn parse_property(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("property name missing in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}
