#![allow(dead_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use airnet_lib::{load_network, FlightNetwork, LoadPolicy};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

fn open_fixture(name: &str) -> BufReader<File> {
    let path = fixtures_dir().join(name);
    BufReader::new(File::open(&path).unwrap_or_else(|err| panic!("open {}: {err}", path.display())))
}

/// Load the checked-in airports with the given flights file.
pub fn fixture_network_with(flights: &str, policy: LoadPolicy) -> FlightNetwork {
    let mut network = FlightNetwork::new();
    load_network(
        &mut network,
        open_fixture("airports.txt"),
        open_fixture(flights),
        policy,
    )
    .expect("fixture records load");
    network
}

pub fn fixture_network() -> FlightNetwork {
    fixture_network_with("flights.txt", LoadPolicy::Abort)
}

/// The four-airport network: A->B (5), B->C (3), A->C (10), D isolated.
pub fn scenario_network() -> FlightNetwork {
    let mut network = FlightNetwork::new();
    for code in ["A", "B", "C", "D"] {
        network.upsert_airport(code, format!("Airport {code}"));
    }
    network.add_edge("A", "B", 5).expect("A and B exist");
    network.add_edge("B", "C", 3).expect("B and C exist");
    network.add_edge("A", "C", 10).expect("A and C exist");
    network
}
