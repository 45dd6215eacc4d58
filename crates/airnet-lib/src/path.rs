use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::network::{AirportCode, FlightNetwork};

/// Best known cost to reach an airport.
///
/// `Finite` orders before `Unreachable`, so the derived ordering matches the
/// usual "infinity is larger than everything" convention without reserving a
/// sentinel integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Finite(u64),
    Unreachable,
}

impl Distance {
    pub fn finite(self) -> Option<u64> {
        match self {
            Distance::Finite(value) => Some(value),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(value) => write!(f, "{value}"),
            Distance::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Distance and predecessor recorded for a single airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub distance: Distance,
    /// Previous airport on the best known path. `None` for the source and for
    /// unreachable airports.
    pub predecessor: Option<AirportCode>,
}

impl PathEntry {
    fn unreachable() -> Self {
        Self {
            distance: Distance::Unreachable,
            predecessor: None,
        }
    }
}

/// Result of a single-source shortest-path run over every airport known at
/// call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: AirportCode,
    entries: HashMap<AirportCode, PathEntry>,
}

impl ShortestPaths {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entry(&self, code: &str) -> Option<&PathEntry> {
        self.entries.get(code)
    }

    /// Distance to `code`, or `None` if the airport was not part of the run.
    pub fn distance(&self, code: &str) -> Option<Distance> {
        self.entries.get(code).map(|entry| entry.distance)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathEntry)> {
        self.entries
            .iter()
            .map(|(code, entry)| (code.as_str(), entry))
    }
}

/// Run Dijkstra's algorithm from `source` over the whole network.
///
/// The heap is seeded with every airport, unreachable ones included. Since a
/// binary heap cannot lower the key of an entry in place, improved distances
/// are pushed as fresh entries and outdated ones are discarded when popped.
pub fn compute_shortest_paths(network: &FlightNetwork, source: &str) -> Result<ShortestPaths> {
    if !network.has_airport(source) {
        return Err(Error::UnknownAirport {
            code: source.to_string(),
            suggestions: network.suggest_codes(source, 3),
        });
    }

    let mut entries: HashMap<AirportCode, PathEntry> =
        HashMap::with_capacity(network.airport_count());
    let mut queue = BinaryHeap::with_capacity(network.airport_count());

    for airport in network.airports() {
        let entry = if airport.code == source {
            PathEntry {
                distance: Distance::Finite(0),
                predecessor: None,
            }
        } else {
            PathEntry::unreachable()
        };
        queue.push(QueueEntry::new(entry.distance, &airport.code));
        entries.insert(airport.code.clone(), entry);
    }

    let mut stale = 0usize;
    while let Some(QueueEntry { distance, node }) = queue.pop() {
        let recorded = entries
            .get(node)
            .map(|entry| entry.distance)
            .unwrap_or(Distance::Unreachable);

        // Lazy deletion: a cheaper path was already recorded after this push.
        if distance > recorded {
            stale += 1;
            continue;
        }

        let Distance::Finite(current) = recorded else {
            continue;
        };

        for edge in network.edges_from(node) {
            let candidate = Distance::Finite(current.saturating_add(u64::from(edge.cost)));
            let Some(target) = entries.get_mut(edge.to.as_str()) else {
                continue;
            };
            if candidate < target.distance {
                target.distance = candidate;
                target.predecessor = Some(node.to_string());
                queue.push(QueueEntry::new(candidate, &edge.to));
            }
        }
    }

    trace!(source, airports = entries.len(), stale, "shortest paths computed");

    Ok(ShortestPaths {
        source: source.to_string(),
        entries,
    })
}

/// Materialise the route from the run's source to `destination`.
///
/// The predecessor chain is walked backwards until the source (the entry
/// without a predecessor) and then reversed.
pub fn reconstruct_path(paths: &ShortestPaths, destination: &str) -> Result<Vec<AirportCode>> {
    let entry = paths
        .entry(destination)
        .ok_or_else(|| Error::unknown_airport(destination))?;

    if !entry.distance.is_reachable() {
        return Err(Error::Unreachable {
            start: paths.source.clone(),
            goal: destination.to_string(),
        });
    }

    let mut route = vec![destination.to_string()];
    let mut current = entry.predecessor.as_deref();
    while let Some(code) = current {
        route.push(code.to_string());
        current = paths
            .entry(code)
            .and_then(|entry| entry.predecessor.as_deref());
    }
    route.reverse();
    Ok(route)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry<'a> {
    distance: Distance,
    node: &'a str,
}

impl<'a> QueueEntry<'a> {
    fn new(distance: Distance, node: &'a str) -> Self {
        Self { distance, node }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by distance.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> FlightNetwork {
        let mut network = FlightNetwork::new();
        for code in ["A", "B", "C", "D"] {
            network.upsert_airport(code, format!("Airport {code}"));
        }
        network.add_edge("A", "B", 5).unwrap();
        network.add_edge("B", "C", 3).unwrap();
        network.add_edge("A", "C", 10).unwrap();
        network
    }

    #[test]
    fn distance_orders_finite_before_unreachable() {
        assert!(Distance::Finite(u64::MAX) < Distance::Unreachable);
        assert!(Distance::Finite(1) < Distance::Finite(2));
    }

    #[test]
    fn source_entry_is_zero_without_predecessor() {
        let paths = compute_shortest_paths(&scenario(), "A").unwrap();
        assert_eq!(
            paths.entry("A"),
            Some(&PathEntry {
                distance: Distance::Finite(0),
                predecessor: None,
            })
        );
    }

    #[test]
    fn result_covers_every_airport() {
        let paths = compute_shortest_paths(&scenario(), "A").unwrap();
        assert_eq!(paths.len(), 4);
        assert_eq!(paths.distance("B"), Some(Distance::Finite(5)));
        assert_eq!(paths.distance("C"), Some(Distance::Finite(8)));
        assert_eq!(paths.entry("D"), Some(&PathEntry::unreachable()));
    }

    #[test]
    fn cheaper_indirect_path_replaces_direct_edge() {
        let paths = compute_shortest_paths(&scenario(), "A").unwrap();
        assert_eq!(
            paths.entry("C").and_then(|e| e.predecessor.as_deref()),
            Some("B")
        );
        assert_eq!(reconstruct_path(&paths, "C").unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn unreachable_destination_has_no_partial_path() {
        let paths = compute_shortest_paths(&scenario(), "A").unwrap();
        let err = reconstruct_path(&paths, "D").unwrap_err();
        assert!(matches!(
            err,
            Error::Unreachable { ref start, ref goal } if start == "A" && goal == "D"
        ));
    }

    #[test]
    fn source_reconstructs_to_single_airport() {
        let paths = compute_shortest_paths(&scenario(), "C").unwrap();
        assert_eq!(reconstruct_path(&paths, "C").unwrap(), vec!["C"]);
        // Edges are directed: nothing leaves C.
        assert_eq!(paths.distance("A"), Some(Distance::Unreachable));
    }

    #[test]
    fn unknown_source_and_destination_are_reported() {
        let network = scenario();
        assert!(matches!(
            compute_shortest_paths(&network, "Z"),
            Err(Error::UnknownAirport { .. })
        ));

        let paths = compute_shortest_paths(&network, "A").unwrap();
        assert!(matches!(
            reconstruct_path(&paths, "Z"),
            Err(Error::UnknownAirport { .. })
        ));
    }

    #[test]
    fn large_costs_do_not_overflow() {
        let mut network = FlightNetwork::new();
        for code in ["A", "B", "C"] {
            network.upsert_airport(code, code);
        }
        network.add_edge("A", "B", u32::MAX).unwrap();
        network.add_edge("B", "C", u32::MAX).unwrap();

        let paths = compute_shortest_paths(&network, "A").unwrap();
        assert_eq!(
            paths.distance("C"),
            Some(Distance::Finite(2 * u64::from(u32::MAX)))
        );
    }

    #[test]
    fn self_loops_and_cycles_terminate() {
        let mut network = scenario();
        network.add_edge("A", "A", 0).unwrap();
        network.add_edge("C", "A", 1).unwrap();
        network.add_edge("B", "A", 0).unwrap();

        let paths = compute_shortest_paths(&network, "A").unwrap();
        assert_eq!(paths.distance("A"), Some(Distance::Finite(0)));
        assert_eq!(paths.distance("C"), Some(Distance::Finite(8)));
    }
}
