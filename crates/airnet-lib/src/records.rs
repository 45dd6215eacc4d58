//! Line-based airport and flight records.
//!
//! Airport records are `CODE Name with spaces`: the code, one space, then the
//! rest of the line as the display name. Flight records are three
//! whitespace-separated fields, `FROM TO COST`, with a non-negative integer
//! cost. Blank lines are ignored in both formats.
//!
//! Loading applies records to a [`FlightNetwork`] airports first, then
//! flights, so every flight is validated against the complete node set.

use std::fmt;
use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mutation::validate_airport;
use crate::network::{Airport, Cost, FlightEdge, FlightNetwork};

/// Which of the two record formats a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Airport,
    Flight,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RecordKind::Airport => "airport",
            RecordKind::Flight => "flight",
        };
        f.write_str(value)
    }
}

/// What to do with a record that cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Stop at the first bad record and return its error.
    Abort,
    /// Skip bad records, log them and list them in the [`LoadReport`].
    #[default]
    SkipInvalid,
}

/// Record that was skipped under [`LoadPolicy::SkipInvalid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub kind: RecordKind,
    pub line: usize,
    pub reason: String,
}

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub airports: usize,
    pub flights: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse a single airport record. `line` is 1-based and only used for errors.
pub fn parse_airport(text: &str, line: usize) -> Result<Airport> {
    let text = text.trim_end_matches(['\r', '\n']);
    let invalid = |reason: String| Error::InvalidRecord {
        kind: RecordKind::Airport,
        line,
        reason,
    };

    let (code, name) = text
        .split_once(' ')
        .ok_or_else(|| invalid(format!("expected 'CODE NAME', got '{text}'")))?;
    let name = name.trim_end();

    validate_airport(code, name).map_err(|err| invalid(err.to_string()))?;
    Ok(Airport::new(code, name))
}

/// Parse a single flight record. `line` is 1-based and only used for errors.
pub fn parse_flight(text: &str, line: usize) -> Result<FlightEdge> {
    let invalid = |reason: String| Error::InvalidRecord {
        kind: RecordKind::Flight,
        line,
        reason,
    };

    let fields: Vec<&str> = text.split_whitespace().collect();
    let [from, to, cost] = fields.as_slice() else {
        return Err(invalid(format!(
            "expected 'FROM TO COST', got {} field(s)",
            fields.len()
        )));
    };

    let cost: Cost = cost
        .parse()
        .map_err(|_| invalid(format!("cost '{cost}' is not a non-negative integer")))?;

    Ok(FlightEdge {
        from: from.to_string(),
        to: to.to_string(),
        cost,
    })
}

pub fn format_airport(airport: &Airport) -> String {
    format!("{} {}", airport.code, airport.name)
}

pub fn format_flight(flight: &FlightEdge) -> String {
    format!("{} {} {}", flight.from, flight.to, flight.cost)
}

/// Load airport records and then flight records into `network`.
///
/// IO errors always abort. Malformed lines and flights that reference an
/// airport absent from the network are handled according to `policy`.
pub fn load_network<A, F>(
    network: &mut FlightNetwork,
    airports: A,
    flights: F,
    policy: LoadPolicy,
) -> Result<LoadReport>
where
    A: BufRead,
    F: BufRead,
{
    let mut report = LoadReport::default();

    for (index, text) in airports.lines().enumerate() {
        let text = text?;
        if text.trim().is_empty() {
            continue;
        }
        match parse_airport(&text, index + 1) {
            Ok(airport) => {
                network.upsert_airport(airport.code, airport.name);
                report.airports += 1;
            }
            Err(err) => skip_or_abort(&mut report, policy, err)?,
        }
    }

    for (index, text) in flights.lines().enumerate() {
        let text = text?;
        if text.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let applied = parse_flight(&text, line).and_then(|flight| {
            network
                .add_edge(&flight.from, &flight.to, flight.cost)
                .map_err(|err| Error::InvalidRecord {
                    kind: RecordKind::Flight,
                    line,
                    reason: err.to_string(),
                })
        });
        match applied {
            Ok(()) => report.flights += 1,
            Err(err) => skip_or_abort(&mut report, policy, err)?,
        }
    }

    debug!(
        airports = report.airports,
        flights = report.flights,
        skipped = report.skipped.len(),
        "records loaded"
    );
    Ok(report)
}

fn skip_or_abort(report: &mut LoadReport, policy: LoadPolicy, err: Error) -> Result<()> {
    match (policy, err) {
        (LoadPolicy::SkipInvalid, Error::InvalidRecord { kind, line, reason }) => {
            warn!(%kind, line, %reason, "skipping invalid record");
            report.skipped.push(SkippedRecord { kind, line, reason });
            Ok(())
        }
        (_, err) => Err(err),
    }
}

/// Write every airport, ordered by code.
pub fn write_airports<W: Write>(network: &FlightNetwork, mut writer: W) -> Result<()> {
    for airport in network.airports() {
        writeln!(writer, "{}", format_airport(airport))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every flight, grouped by source code in insertion order.
pub fn write_flights<W: Write>(network: &FlightNetwork, mut writer: W) -> Result<()> {
    for flight in network.flights() {
        writeln!(writer, "{}", format_flight(flight))?;
    }
    writer.flush()?;
    Ok(())
}
