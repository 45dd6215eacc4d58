use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::network::{Cost, FlightNetwork};

/// Behaviour when an airport is added under a code that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AirportPolicy {
    /// Replace the stored name; last write wins.
    #[default]
    Overwrite,
    /// Fail with [`Error::DuplicateAirport`] and keep the stored airport.
    Reject,
}

/// Outcome of a successful [`NetworkEditor::add_airport`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirportChange {
    Added,
    Replaced,
}

/// Validating front door for mutating a [`FlightNetwork`].
///
/// Every check runs before the network is touched, so a failed call never
/// leaves a partial mutation behind.
#[derive(Debug)]
pub struct NetworkEditor<'a> {
    network: &'a mut FlightNetwork,
    policy: AirportPolicy,
}

impl<'a> NetworkEditor<'a> {
    /// Editor with the default [`AirportPolicy::Overwrite`] policy.
    pub fn new(network: &'a mut FlightNetwork) -> Self {
        Self::with_policy(network, AirportPolicy::default())
    }

    pub fn with_policy(network: &'a mut FlightNetwork, policy: AirportPolicy) -> Self {
        Self { network, policy }
    }

    pub fn policy(&self) -> AirportPolicy {
        self.policy
    }

    pub fn add_airport(&mut self, code: &str, name: &str) -> Result<AirportChange> {
        validate_airport(code, name)?;

        let exists = self.network.has_airport(code);
        if exists && self.policy == AirportPolicy::Reject {
            return Err(Error::DuplicateAirport {
                code: code.to_string(),
            });
        }

        self.network.upsert_airport(code, name);
        if exists {
            info!(code, name, "airport replaced");
            Ok(AirportChange::Replaced)
        } else {
            info!(code, name, "airport added");
            Ok(AirportChange::Added)
        }
    }

    pub fn add_flight(&mut self, from: &str, to: &str, cost: Cost) -> Result<()> {
        if let Err(err) = self.network.add_edge(from, to, cost) {
            debug!(from, to, cost, error = %err, "flight rejected");
            return Err(err);
        }
        info!(from, to, cost, "flight added");
        Ok(())
    }
}

/// Check that an airport survives a round trip through the airport record format.
pub(crate) fn validate_airport(code: &str, name: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::InvalidAirport {
            reason: "code must not be empty".to_string(),
        });
    }
    if code.chars().any(char::is_whitespace) {
        return Err(Error::InvalidAirport {
            reason: format!("code '{code}' must not contain whitespace"),
        });
    }
    if name.trim().is_empty() {
        return Err(Error::InvalidAirport {
            reason: format!("name for '{code}' must not be empty"),
        });
    }
    if name.contains(['\n', '\r']) {
        return Err(Error::InvalidAirport {
            reason: format!("name for '{code}' must be a single line"),
        });
    }
    Ok(())
}
