mod common;

use std::fs;
use std::io::Cursor;

use airnet_lib::records::{write_airports, write_flights};
use airnet_lib::{load_network, Error, FlightNetwork, LoadPolicy, NetworkStore, RecordKind};
use tempfile::tempdir;

use common::{fixture_network, fixture_network_with, fixtures_dir};

#[test]
fn fixture_loads_every_record() {
    let network = fixture_network();
    assert_eq!(network.airport_count(), 8);
    assert_eq!(network.flight_count(), 12);
    assert_eq!(
        network.airport("JFK").map(|a| a.name.as_str()),
        Some("John F. Kennedy International")
    );
}

#[test]
fn skip_policy_reports_bad_flight_lines() {
    let mut network = FlightNetwork::new();
    let airports = fs::read(fixtures_dir().join("airports.txt")).unwrap();
    let flights = fs::read(fixtures_dir().join("malformed_flights.txt")).unwrap();

    let report = load_network(
        &mut network,
        Cursor::new(airports),
        Cursor::new(flights),
        LoadPolicy::SkipInvalid,
    )
    .expect("skip policy never aborts on bad records");

    assert_eq!(report.airports, 8);
    assert_eq!(report.flights, 2);
    let skipped: Vec<_> = report.skipped.iter().map(|s| (s.kind, s.line)).collect();
    assert_eq!(
        skipped,
        vec![
            (RecordKind::Flight, 3),
            (RecordKind::Flight, 4),
            (RecordKind::Flight, 5),
        ]
    );
    assert!(report.skipped[1].reason.contains("ORD"));
    assert_eq!(network.flight_count(), 2);
}

#[test]
fn abort_policy_stops_at_first_bad_record() {
    let mut network = FlightNetwork::new();
    let error = load_network(
        &mut network,
        Cursor::new("AAA Alpha\nBBB Bravo\n"),
        Cursor::new("AAA BBB 1\nAAA BBB x\nBBB AAA 2\n"),
        LoadPolicy::Abort,
    )
    .expect_err("cost is not a number");

    assert!(matches!(
        error,
        Error::InvalidRecord {
            kind: RecordKind::Flight,
            line: 2,
            ..
        }
    ));
    assert_eq!(network.flight_count(), 1);
}

#[test]
fn flights_before_their_airports_are_rejected() {
    let mut network = FlightNetwork::new();
    let report = load_network(
        &mut network,
        Cursor::new("AAA Alpha\n"),
        Cursor::new("AAA ZZZ 4\n"),
        LoadPolicy::SkipInvalid,
    )
    .unwrap();

    assert_eq!(report.flights, 0);
    assert_eq!(report.skipped.len(), 1);
    assert!(network.edges_from("AAA").is_empty());
}

#[test]
fn duplicate_airport_records_keep_the_last_name() {
    let mut network = FlightNetwork::new();
    let report = load_network(
        &mut network,
        Cursor::new("AAA First\nAAA Second\n"),
        Cursor::new(""),
        LoadPolicy::Abort,
    )
    .unwrap();

    assert_eq!(report.airports, 2);
    assert_eq!(network.airport_count(), 1);
    assert_eq!(network.airport("AAA").unwrap().name, "Second");
}

#[test]
fn writers_emit_sorted_airports_and_grouped_flights() {
    let mut network = FlightNetwork::new();
    network.upsert_airport("ZRH", "Zurich");
    network.upsert_airport("AMS", "Amsterdam Schiphol");
    network.add_edge("ZRH", "AMS", 4).unwrap();
    network.add_edge("AMS", "ZRH", 6).unwrap();
    network.add_edge("ZRH", "AMS", 3).unwrap();

    let mut airports = Vec::new();
    write_airports(&network, &mut airports).unwrap();
    assert_eq!(
        String::from_utf8(airports).unwrap(),
        "AMS Amsterdam Schiphol\nZRH Zurich\n"
    );

    let mut flights = Vec::new();
    write_flights(&network, &mut flights).unwrap();
    assert_eq!(
        String::from_utf8(flights).unwrap(),
        "AMS ZRH 6\nZRH AMS 4\nZRH AMS 3\n"
    );
}

#[test]
fn store_round_trip_preserves_network() {
    let dir = tempdir().unwrap();
    let store = NetworkStore::new(dir.path().join("nested"));
    let original = fixture_network();

    store.save(&original).expect("save succeeds");
    let (reloaded, report) = store.load(LoadPolicy::Abort).expect("reload succeeds");

    assert!(report.skipped.is_empty());
    assert_eq!(
        reloaded.airports().collect::<Vec<_>>(),
        original.airports().collect::<Vec<_>>()
    );
    assert_eq!(
        reloaded.flights().collect::<Vec<_>>(),
        original.flights().collect::<Vec<_>>()
    );
}

#[test]
fn store_overwrites_previous_files() {
    let dir = tempdir().unwrap();
    let store = NetworkStore::new(dir.path());

    let mut network = FlightNetwork::new();
    network.upsert_airport("AAA", "Alpha");
    store.save(&network).unwrap();

    network.upsert_airport("AAA", "Alpha Renamed");
    store.save(&network).unwrap();

    let contents = fs::read_to_string(store.airports_path()).unwrap();
    assert_eq!(contents, "AAA Alpha Renamed\n");
    assert_eq!(fs::read_to_string(store.flights_path()).unwrap(), "");
}

#[test]
fn skipped_flights_do_not_block_valid_ones() {
    let network = fixture_network_with("malformed_flights.txt", LoadPolicy::SkipInvalid);
    assert!(network.has_airport("ATL"));
    assert_eq!(network.edges_from("ATL").len(), 1);
}
