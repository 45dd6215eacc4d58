use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airnet_cli::output::{
    render_airports, render_flights, render_mutation, render_route, MutationOutcome, OutputFormat,
};
use airnet_lib::{
    compute_route, AirportPolicy, FlightNetwork, LoadPolicy, LoadReport, NetworkEditor,
    NetworkStore, RouteSummary,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Flight network and itinerary planning utilities")]
struct Cli {
    /// Directory holding airports.txt and flights.txt (defaults to AIRNET_DATA_DIR
    /// or the platform data directory).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Fail on malformed records instead of skipping them.
    #[arg(long, global = true)]
    strict: bool,

    /// Let add-airport and add-flight save even though skipped records will
    /// be dropped from the rewritten files.
    #[arg(long, global = true)]
    prune_invalid: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cheapest itinerary between two airports.
    Route {
        /// Departure airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
    },
    /// Add an airport, or rename an existing one, and save the network.
    AddAirport {
        /// Airport code.
        #[arg(long)]
        code: String,
        /// Display name; may contain spaces.
        #[arg(long)]
        name: String,
        /// Fail instead of renaming when the code already exists.
        #[arg(long)]
        reject_duplicate: bool,
    },
    /// Add a flight between two existing airports and save the network.
    AddFlight {
        /// Departure airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
        /// Non-negative flight cost.
        #[arg(long)]
        cost: u32,
    },
    /// List every airport ordered by code.
    Airports,
    /// List every flight grouped by departure airport.
    Flights,
}

impl Command {
    fn saves(&self) -> bool {
        matches!(self, Command::AddAirport { .. } | Command::AddFlight { .. })
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store = NetworkStore::resolve(cli.data_dir.as_deref())
        .context("failed to resolve the airnet data directory")?;
    let policy = if cli.strict {
        LoadPolicy::Abort
    } else {
        LoadPolicy::SkipInvalid
    };
    let (mut network, report) = load(&store, policy)?;
    if cli.command.saves() && !cli.prune_invalid {
        ensure_nothing_skipped(&store, &report)?;
    }

    let rendered = match cli.command {
        Command::Route { from, to } => handle_route(&network, &from, &to, cli.format)?,
        Command::AddAirport {
            code,
            name,
            reject_duplicate,
        } => {
            let policy = if reject_duplicate {
                AirportPolicy::Reject
            } else {
                AirportPolicy::Overwrite
            };
            let change = NetworkEditor::with_policy(&mut network, policy)
                .add_airport(&code, &name)
                .with_context(|| format!("failed to add airport {code}"))?;
            save(&store, &network)?;
            render_mutation(&MutationOutcome::airport(change, &code, &name), cli.format)?
        }
        Command::AddFlight { from, to, cost } => {
            NetworkEditor::new(&mut network)
                .add_flight(&from, &to, cost)
                .with_context(|| format!("failed to add flight from {from} to {to}"))?;
            save(&store, &network)?;
            render_mutation(&MutationOutcome::FlightAdded { from, to, cost }, cli.format)?
        }
        Command::Airports => render_airports(&network, cli.format)?,
        Command::Flights => render_flights(&network, cli.format)?,
    };

    print!("{rendered}");
    Ok(())
}

fn load(store: &NetworkStore, policy: LoadPolicy) -> Result<(FlightNetwork, LoadReport)> {
    let (network, report) = store
        .load(policy)
        .with_context(|| format!("failed to load records from {}", store.root().display()))?;
    for skipped in &report.skipped {
        warn!(
            kind = %skipped.kind,
            line = skipped.line,
            reason = %skipped.reason,
            "ignored invalid record"
        );
    }
    Ok((network, report))
}

/// Saving rewrites both files from memory, so records skipped during load
/// would be lost.
fn ensure_nothing_skipped(store: &NetworkStore, report: &LoadReport) -> Result<()> {
    let Some(first) = report.skipped.first() else {
        return Ok(());
    };
    bail!(
        "refusing to save: {} invalid record(s) in {} would be dropped \
         (first: {} record on line {}: {}); fix the files or pass --prune-invalid",
        report.skipped.len(),
        store.root().display(),
        first.kind,
        first.line,
        first.reason
    )
}

fn save(store: &NetworkStore, network: &FlightNetwork) -> Result<()> {
    store
        .save(network)
        .with_context(|| format!("failed to save records to {}", store.root().display()))
}

fn handle_route(
    network: &FlightNetwork,
    from: &str,
    to: &str,
    format: OutputFormat,
) -> Result<String> {
    let route = compute_route(network, from, to)
        .with_context(|| format!("failed to plan a route from {from} to {to}"))?;
    let summary = RouteSummary::from_route(network, &route)?;
    render_route(&summary, format)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
