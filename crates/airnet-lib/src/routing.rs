//! Itinerary queries.
//!
//! [`compute_route`] is the entry point used by the CLI and by
//! [`crate::SharedNetwork`]. It validates both endpoints, runs
//! [`compute_shortest_paths`] from the start airport and hands the result to
//! [`reconstruct_path`].
//!
//! # Example
//!
//! ```
//! use airnet_lib::{compute_route, FlightNetwork};
//!
//! let mut network = FlightNetwork::new();
//! network.upsert_airport("A", "Alpha");
//! network.upsert_airport("B", "Bravo");
//! network.add_edge("A", "B", 4)?;
//!
//! let route = compute_route(&network, "A", "B")?;
//! assert_eq!(route.distance, 4);
//! assert_eq!(route.steps, vec!["A", "B"]);
//! # Ok::<(), airnet_lib::Error>(())
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{AirportCode, FlightNetwork};
use crate::path::{compute_shortest_paths, reconstruct_path, Distance};

/// Least-cost itinerary between two airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub start: AirportCode,
    pub goal: AirportCode,
    /// Sum of the flight costs along `steps`.
    pub distance: u64,
    /// Airports from `start` to `goal`, both inclusive.
    pub steps: Vec<AirportCode>,
}

impl Route {
    /// Number of flights in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute the cheapest route from `start` to `goal`.
pub fn compute_route(network: &FlightNetwork, start: &str, goal: &str) -> Result<Route> {
    for code in [start, goal] {
        if !network.has_airport(code) {
            return Err(Error::UnknownAirport {
                code: code.to_string(),
                suggestions: network.suggest_codes(code, 3),
            });
        }
    }

    let paths = compute_shortest_paths(network, start)?;
    let steps = reconstruct_path(&paths, goal)?;
    let distance = paths
        .distance(goal)
        .and_then(Distance::finite)
        .ok_or_else(|| Error::Unreachable {
            start: start.to_string(),
            goal: goal.to_string(),
        })?;

    debug!(start, goal, distance, hops = steps.len().saturating_sub(1), "route computed");

    Ok(Route {
        start: start.to_string(),
        goal: goal.to_string(),
        distance,
        steps,
    })
}
