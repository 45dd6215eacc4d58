//! airnet library entry points.
//!
//! This crate models a directed, weighted network of airports and flights,
//! answers least-cost itinerary queries over it, and reads and writes the
//! line-based record files the network is persisted in. Higher-level
//! consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod mutation;
pub mod network;
pub mod output;
pub mod path;
pub mod records;
pub mod routing;
pub mod shared;
pub mod store;

pub use error::{Error, Result};
pub use mutation::{AirportChange, AirportPolicy, NetworkEditor};
pub use network::{Airport, AirportCode, Cost, FlightEdge, FlightNetwork};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{compute_shortest_paths, reconstruct_path, Distance, PathEntry, ShortestPaths};
pub use records::{load_network, LoadPolicy, LoadReport, RecordKind, SkippedRecord};
pub use routing::{compute_route, Route};
pub use shared::SharedNetwork;
pub use store::NetworkStore;
