//! Output formatting for route, listing and mutation results.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use airnet_lib::{AirportChange, FlightNetwork, RouteRenderMode, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, one line per airport.
    #[default]
    Text,
    /// Total cost and codes only.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

/// Result of an add-airport or add-flight command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MutationOutcome {
    AirportAdded { code: String, name: String },
    AirportReplaced { code: String, name: String },
    FlightAdded { from: String, to: String, cost: u32 },
}

impl MutationOutcome {
    pub fn airport(change: AirportChange, code: &str, name: &str) -> Self {
        let (code, name) = (code.to_string(), name.to_string());
        match change {
            AirportChange::Added => MutationOutcome::AirportAdded { code, name },
            AirportChange::Replaced => MutationOutcome::AirportReplaced { code, name },
        }
    }

    fn message(&self) -> String {
        match self {
            MutationOutcome::AirportAdded { code, .. } => format!("Airport {code} added."),
            MutationOutcome::AirportReplaced { code, .. } => format!("Airport {code} updated."),
            MutationOutcome::FlightAdded { from, to, cost } => {
                format!("Flight from {from} to {to} added (cost {cost}).")
            }
        }
    }
}

pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => summary.render(RouteRenderMode::PlainText),
        OutputFormat::Compact => summary.render(RouteRenderMode::Compact),
        OutputFormat::Json => to_json(summary)?,
    })
}

pub fn render_airports(network: &FlightNetwork, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&network.airports().collect::<Vec<_>>());
    }

    let mut buffer = String::new();
    for airport in network.airports() {
        match format {
            OutputFormat::Compact => {
                let _ = writeln!(buffer, "{}", airport.code);
            }
            _ => {
                let _ = writeln!(buffer, "{:<6} {}", airport.code, airport.name);
            }
        }
    }
    Ok(buffer)
}

pub fn render_flights(network: &FlightNetwork, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&network.flights().collect::<Vec<_>>());
    }

    let mut buffer = String::new();
    for flight in network.flights() {
        match format {
            OutputFormat::Compact => {
                let _ = writeln!(buffer, "{} {} {}", flight.from, flight.to, flight.cost);
            }
            _ => {
                let _ = writeln!(
                    buffer,
                    "{:<6} -> {:<6} cost {}",
                    flight.from, flight.to, flight.cost
                );
            }
        }
    }
    Ok(buffer)
}

pub fn render_mutation(outcome: &MutationOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(outcome),
        _ => Ok(format!("{}\n", outcome.message())),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
