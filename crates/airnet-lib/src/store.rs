use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::network::FlightNetwork;
use crate::records::{load_network, write_airports, write_flights, LoadPolicy, LoadReport};

/// Filename of the airport records inside a data directory.
pub const AIRPORTS_FILENAME: &str = "airports.txt";
/// Filename of the flight records inside a data directory.
pub const FLIGHTS_FILENAME: &str = "flights.txt";
/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "AIRNET_DATA_DIR";

/// Directory holding `airports.txt` and `flights.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkStore {
    root: PathBuf,
}

impl NetworkStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the data directory.
    ///
    /// The resolution order is:
    /// 1. Explicit `target` argument when provided.
    /// 2. `AIRNET_DATA_DIR` environment variable.
    /// 3. Platform-specific project data directory.
    pub fn resolve(target: Option<&Path>) -> Result<Self> {
        if let Some(explicit) = target {
            return Ok(Self::new(explicit));
        }

        if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
            return Ok(Self::new(PathBuf::from(env_path)));
        }

        default_data_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn airports_path(&self) -> PathBuf {
        self.root.join(AIRPORTS_FILENAME)
    }

    pub fn flights_path(&self) -> PathBuf {
        self.root.join(FLIGHTS_FILENAME)
    }

    /// Load both record files into a fresh network. Missing files count as empty.
    pub fn load(&self, policy: LoadPolicy) -> Result<(FlightNetwork, LoadReport)> {
        let mut network = FlightNetwork::new();
        let airports = open_or_empty(&self.airports_path())?;
        let flights = open_or_empty(&self.flights_path())?;
        let report = load_network(&mut network, airports, flights, policy)?;
        debug!(root = %self.root.display(), "network loaded");
        Ok((network, report))
    }

    /// Persist both record files, replacing each one atomically.
    pub fn save(&self, network: &FlightNetwork) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        write_atomically(&self.airports_path(), |writer| {
            write_airports(network, writer)
        })?;
        write_atomically(&self.flights_path(), |writer| {
            write_flights(network, writer)
        })?;
        info!(
            root = %self.root.display(),
            airports = network.airport_count(),
            flights = network.flight_count(),
            "network saved"
        );
        Ok(())
    }
}

/// Platform-specific default data directory.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "airnet", "airnet").ok_or(Error::DataDirUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

fn open_or_empty(path: &Path) -> Result<Box<dyn io::BufRead>> {
    match File::open(path) {
        Ok(file) => Ok(Box::new(BufReader::new(file))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "record file missing; treating as empty");
            Ok(Box::new(Cursor::new(Vec::new())))
        }
        Err(err) => Err(err.into()),
    }
}

fn write_atomically<F>(destination: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<()>,
{
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(&mut tmp);
        write(&mut writer)?;
    }
    tmp.persist(destination).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_target_wins() {
        let store = NetworkStore::resolve(Some(Path::new("/tmp/airnet-explicit"))).unwrap();
        assert_eq!(store.root(), Path::new("/tmp/airnet-explicit"));
        assert_eq!(
            store.airports_path(),
            Path::new("/tmp/airnet-explicit").join(AIRPORTS_FILENAME)
        );
    }

    #[test]
    fn missing_files_load_as_empty_network() {
        let dir = tempfile::tempdir().unwrap();
        let (network, report) = NetworkStore::new(dir.path())
            .load(LoadPolicy::Abort)
            .unwrap();
        assert!(network.is_empty());
        assert_eq!(report, LoadReport::default());
    }
}
