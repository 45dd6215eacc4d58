use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::{Error, Result};

/// Unique identifier for an airport, e.g. `JFK`.
pub type AirportCode = String;

/// Integer cost of a single flight. Costs are non-negative by construction.
pub type Cost = u32;

/// Codes up to this length only accept a single edit as a near miss.
const SHORT_CODE_LEN: usize = 3;

/// Airport node identified by its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
}

impl Airport {
    pub fn new(code: impl Into<AirportCode>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Directed, weighted connection between two airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightEdge {
    pub from: AirportCode,
    pub to: AirportCode,
    pub cost: Cost,
}

/// In-memory flight network: the airport node set plus per-airport adjacency.
///
/// Airports are kept ordered by code so that iteration (and therefore
/// persistence) is deterministic. Outgoing edges preserve insertion order and
/// parallel edges between the same pair are kept as distinct alternatives.
#[derive(Debug, Clone, Default)]
pub struct FlightNetwork {
    airports: BTreeMap<AirportCode, Airport>,
    adjacency: HashMap<AirportCode, Vec<FlightEdge>>,
}

impl FlightNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an airport, replacing any existing airport with the same code.
    ///
    /// Returns the airport that was replaced, if any. Outgoing and incoming
    /// edges of a replaced airport are untouched.
    pub fn upsert_airport(
        &mut self,
        code: impl Into<AirportCode>,
        name: impl Into<String>,
    ) -> Option<Airport> {
        let airport = Airport::new(code, name);
        self.airports.insert(airport.code.clone(), airport)
    }

    /// Append a flight edge from `from` to `to`.
    ///
    /// Both endpoints must already be present; otherwise the network is left
    /// unchanged and [`Error::UnknownAirport`] names the first missing code.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: Cost) -> Result<()> {
        for code in [from, to] {
            if !self.has_airport(code) {
                return Err(Error::UnknownAirport {
                    code: code.to_string(),
                    suggestions: self.suggest_codes(code, 3),
                });
            }
        }

        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push(FlightEdge {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            });
        Ok(())
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn has_airport(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    /// Outgoing edges of `code` in insertion order.
    ///
    /// Returns an empty slice both for airports without departures and for
    /// codes that are not in the network; use [`Self::has_airport`] to tell
    /// the two apart.
    pub fn edges_from(&self, code: &str) -> &[FlightEdge] {
        self.adjacency
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All airports ordered by code.
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    /// All edges grouped by source code (sources ordered by code, edges in
    /// insertion order within each source).
    pub fn flights(&self) -> impl Iterator<Item = &FlightEdge> {
        self.airports
            .keys()
            .flat_map(move |code| self.edges_from(code).iter())
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn flight_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Return up to `limit` known codes that closely resemble `code`, best first.
    pub fn suggest_codes(&self, code: &str, limit: usize) -> Vec<String> {
        let needle = code.to_ascii_uppercase();
        let max_edits = if needle.chars().count() <= SHORT_CODE_LEN {
            1
        } else {
            2
        };
        let mut scored: Vec<(usize, &str)> = self
            .airports
            .keys()
            .map(|candidate| {
                let edits = strsim::damerau_levenshtein(&needle, &candidate.to_ascii_uppercase());
                (edits, candidate.as_str())
            })
            .filter(|(edits, _)| *edits <= max_edits)
            .collect();

        scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}
