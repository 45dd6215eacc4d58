//! Thread-safe handle around a [`FlightNetwork`].
//!
//! The core types assume exclusive access for the duration of a call. When a
//! network is shared between threads, [`SharedNetwork`] serialises writers
//! and lets readers run concurrently: every mutation takes the write lock and
//! every query holds the read lock until its result is fully built, so a
//! query never observes a half-applied change.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::mutation::{AirportChange, AirportPolicy, NetworkEditor};
use crate::network::{Cost, FlightNetwork};
use crate::routing::{compute_route, Route};

/// Cheaply cloneable, reader/writer-locked flight network.
#[derive(Debug, Clone, Default)]
pub struct SharedNetwork {
    inner: Arc<RwLock<FlightNetwork>>,
    policy: AirportPolicy,
}

impl SharedNetwork {
    pub fn new(network: FlightNetwork) -> Self {
        Self::with_policy(network, AirportPolicy::default())
    }

    pub fn with_policy(network: FlightNetwork, policy: AirportPolicy) -> Self {
        Self {
            inner: Arc::new(RwLock::new(network)),
            policy,
        }
    }

    pub fn add_airport(&self, code: &str, name: &str) -> Result<AirportChange> {
        let mut network = self.write();
        NetworkEditor::with_policy(&mut network, self.policy).add_airport(code, name)
    }

    pub fn add_flight(&self, from: &str, to: &str, cost: Cost) -> Result<()> {
        let mut network = self.write();
        NetworkEditor::with_policy(&mut network, self.policy).add_flight(from, to, cost)
    }

    pub fn route(&self, start: &str, goal: &str) -> Result<Route> {
        compute_route(&self.read(), start, goal)
    }

    /// Run `f` against a consistent snapshot of the network.
    pub fn with_network<T>(&self, f: impl FnOnce(&FlightNetwork) -> T) -> T {
        f(&self.read())
    }

    /// Copy of the current network.
    pub fn snapshot(&self) -> FlightNetwork {
        self.read().clone()
    }

    // Mutations validate before writing, so a poisoned lock still guards a
    // consistent network.
    fn read(&self) -> RwLockReadGuard<'_, FlightNetwork> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FlightNetwork> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<FlightNetwork> for SharedNetwork {
    fn from(network: FlightNetwork) -> Self {
        Self::new(network)
    }
}
