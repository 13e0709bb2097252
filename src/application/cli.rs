use serde::Serialize;

use crate::domain::config::AppConfig;
use crate::domain::criteria::FilterCriteria;
use crate::domain::models::{DateRange, TimesheetEntry};
use crate::domain::search::filter_timesheet;
use crate::domain::status::{TimesheetStatus, TimesheetViewMode};
use crate::domain::summary::{Summary, status_counts};
use crate::error::TimesheetError;
use crate::infrastructure::config::{load_config, server_config};
use crate::infrastructure::file_source::{FileSource, TimesheetQuery, TimesheetSource};
use crate::utils::parsing::{initial_date_range, parse_date_range};

const CLI_HELP: &str = "  cli search [--query <TEXT>] [--range <WEEK|MONTH|YYYY-MM-DD..YYYY-MM-DD>] [--status <LABEL>]... [--pretty]\n  cli summary [--range <WEEK|MONTH|YYYY-MM-DD..YYYY-MM-DD>] [--pretty]\n  cli server-config [--pretty]";

const SEARCH_HELP: &str = "Usage:\n  cli search [--query <TEXT>] [--range <WEEK|MONTH|YYYY-MM-DD..YYYY-MM-DD>] [--status <LABEL>]... [--pretty]";

const SUMMARY_HELP: &str =
    "Usage:\n  cli summary [--range <WEEK|MONTH|YYYY-MM-DD..YYYY-MM-DD>] [--pretty]";

const SERVER_CONFIG_HELP: &str = "Usage:\n  cli server-config [--pretty]";

#[derive(Serialize)]
struct SearchOutput<'a> {
    range: String,
    query: &'a str,
    entries: Vec<&'a TimesheetEntry>,
}

#[derive(Serialize)]
struct StatusCount {
    status: &'static str,
    count: usize,
}

#[derive(Serialize)]
struct SummaryOutput {
    range: String,
    hours: String,
    #[serde(flatten)]
    summary: Summary,
    badge_label: String,
    statuses: Vec<StatusCount>,
}

pub fn run_cli(args: &[String]) -> Result<(), TimesheetError> {
    if args.is_empty() || is_help(args[0].as_str()) {
        println!("Subcommands:\n{CLI_HELP}");
        return Ok(());
    }

    match args[0].as_str() {
        "search" => cmd_search(&args[1..]),
        "summary" => cmd_summary(&args[1..]),
        "server-config" => cmd_server_config(&args[1..]),
        other => Err(TimesheetError::Usage(format!(
            "unknown cli command: {other}\n\n{CLI_HELP}"
        ))),
    }
}

pub fn cli_help() -> &'static str {
    CLI_HELP
}

#[derive(Debug, Default, PartialEq)]
struct ListOptions {
    query: String,
    range: Option<String>,
    statuses: Vec<String>,
    pretty: bool,
}

fn cmd_search(args: &[String]) -> Result<(), TimesheetError> {
    if contains_help(args) {
        println!("{SEARCH_HELP}");
        return Ok(());
    }

    let options = parse_list_options(args, SEARCH_HELP)?;
    let config = load_config();
    let range = resolve_range(options.range.clone(), &config)?;
    let mut criteria = FilterCriteria::default();
    for raw in &options.statuses {
        let status = TimesheetStatus::from_label(raw)
            .or_else(|| TimesheetStatus::from_key(raw))
            .ok_or_else(|| TimesheetError::Usage(format!("unknown status: {raw}")))?;
        criteria.statuses.insert(status.label().to_string());
    }

    let snapshot = FileSource::new(&config.data_file).load(&TimesheetQuery {
        range,
        view_mode: TimesheetViewMode::ListView,
        criteria,
    })?;
    let output = SearchOutput {
        range: range.label(),
        query: &options.query,
        entries: filter_timesheet(&snapshot.entries, &options.query),
    };

    print_json(&output, options.pretty)
}

fn cmd_summary(args: &[String]) -> Result<(), TimesheetError> {
    if contains_help(args) {
        println!("{SUMMARY_HELP}");
        return Ok(());
    }

    let options = parse_list_options(args, SUMMARY_HELP)?;
    if !options.query.is_empty() || !options.statuses.is_empty() {
        return Err(TimesheetError::Usage(SUMMARY_HELP.to_string()));
    }
    let config = load_config();
    let range = resolve_range(options.range, &config)?;
    let snapshot = FileSource::new(&config.data_file).load(&TimesheetQuery {
        range,
        view_mode: TimesheetViewMode::ListView,
        criteria: FilterCriteria::default(),
    })?;

    let summary = Summary::from_buckets(&snapshot.buckets);
    let output = SummaryOutput {
        range: range.card_label(),
        hours: summary.duration.to_string(),
        badge_label: summary.badge.to_string(),
        statuses: status_counts(&snapshot.buckets)
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.key(),
                count,
            })
            .collect(),
        summary,
    };

    print_json(&output, options.pretty)
}

fn cmd_server_config(args: &[String]) -> Result<(), TimesheetError> {
    if contains_help(args) {
        println!("{SERVER_CONFIG_HELP}");
        return Ok(());
    }

    let mut pretty = false;
    for arg in args {
        match arg.as_str() {
            "--pretty" => pretty = true,
            unknown => {
                return Err(TimesheetError::Usage(format!(
                    "unknown flag: {unknown}\n\n{SERVER_CONFIG_HELP}"
                )));
            }
        }
    }
    print_json(&server_config(), pretty)
}

fn resolve_range(input: Option<String>, config: &AppConfig) -> Result<DateRange, TimesheetError> {
    match input.or_else(|| config.default_date_range.clone()) {
        Some(raw) => parse_date_range(&raw),
        None => Ok(initial_date_range()),
    }
}

fn parse_list_options(args: &[String], help_text: &str) -> Result<ListOptions, TimesheetError> {
    let mut options = ListOptions::default();
    let missing = |flag: &str| TimesheetError::Usage(format!("missing value for {flag}"));

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--query" => {
                i += 1;
                options.query = args.get(i).ok_or_else(|| missing("--query"))?.clone();
            }
            "--range" => {
                i += 1;
                options.range = Some(args.get(i).ok_or_else(|| missing("--range"))?.clone());
            }
            "--status" => {
                i += 1;
                options
                    .statuses
                    .push(args.get(i).ok_or_else(|| missing("--status"))?.clone());
            }
            "--pretty" => options.pretty = true,
            unknown => {
                return Err(TimesheetError::Usage(format!(
                    "unknown flag: {unknown}\n\n{help_text}"
                )));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), TimesheetError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    println!("{json}");
    Ok(())
}

pub fn is_help(value: &str) -> bool {
    matches!(value, "-h" | "--help" | "help")
}

fn contains_help(args: &[String]) -> bool {
    args.iter().any(|value| is_help(value.as_str()))
}
