use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::{AirportCode, FlightNetwork};
use crate::routing::Route;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteRenderMode {
    /// One line per airport with leg and cumulative costs.
    #[default]
    PlainText,
    /// Total cost plus the codes on a single line.
    Compact,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub code: AirportCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Airport visited along a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub code: AirportCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cost of the flight into this airport; absent for the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_cost: Option<u64>,
    pub cumulative: u64,
}

impl RouteStep {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub distance: u64,
    pub hops: usize,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with resolved airport names and
    /// per-leg costs.
    ///
    /// Where parallel flights exist the cheapest one is reported, which is
    /// the one the shortest-path search used.
    pub fn from_route(network: &FlightNetwork, route: &Route) -> Result<Self> {
        let Some(first) = route.steps.first() else {
            return Err(Error::Unreachable {
                start: route.start.clone(),
                goal: route.goal.clone(),
            });
        };

        let mut steps = Vec::with_capacity(route.steps.len());
        let mut cumulative = 0u64;
        let mut previous: Option<&str> = None;
        for (index, code) in route.steps.iter().enumerate() {
            let leg_cost = match previous {
                Some(from) => Some(cheapest_leg(network, from, code)?),
                None => None,
            };
            cumulative += leg_cost.unwrap_or(0);
            steps.push(RouteStep {
                index,
                code: code.clone(),
                name: airport_name(network, code),
                leg_cost,
                cumulative,
            });
            previous = Some(code.as_str());
        }

        Ok(Self {
            start: RouteEndpoint {
                code: first.clone(),
                name: airport_name(network, first),
            },
            goal: RouteEndpoint {
                code: route.goal.clone(),
                name: airport_name(network, &route.goal),
            },
            distance: route.distance,
            hops: route.hop_count(),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} (cost {}, {} flights)",
            self.start.code, self.goal.code, self.distance, self.hops
        );
        for step in &self.steps {
            let leg = step
                .leg_cost
                .map(|cost| format!("+{cost}"))
                .unwrap_or_else(|| "start".to_string());
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) [{}, total {}]",
                step.index,
                step.code,
                step.display_name(),
                leg,
                step.cumulative
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let path = self
            .steps
            .iter()
            .map(|step| step.code.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "Shortest distance from {} to {}: {}\nPath: {}\n",
            self.start.code, self.goal.code, self.distance, path
        )
    }
}

fn airport_name(network: &FlightNetwork, code: &str) -> Option<String> {
    network.airport(code).map(|airport| airport.name.clone())
}

fn cheapest_leg(network: &FlightNetwork, from: &str, to: &str) -> Result<u64> {
    network
        .edges_from(from)
        .iter()
        .filter(|edge| edge.to == to)
        .map(|edge| u64::from(edge.cost))
        .min()
        .ok_or_else(|| Error::Unreachable {
            start: from.to_string(),
            goal: to.to_string(),
        })
}
