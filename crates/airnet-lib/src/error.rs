use thiserror::Error;

use crate::records::RecordKind;

/// Convenient result alias for the airnet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a mutation or query references a code absent from the network.
    #[error("unknown airport: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route exists between two known airports.
    #[error("no route found between {start} and {goal}")]
    Unreachable { start: String, goal: String },

    /// Raised when a persisted line does not parse into a well-formed record.
    #[error("invalid {kind} record on line {line}: {reason}")]
    InvalidRecord {
        kind: RecordKind,
        line: usize,
        reason: String,
    },

    /// Raised when re-adding an airport under [`crate::AirportPolicy::Reject`].
    #[error("airport {code} already exists")]
    DuplicateAirport { code: String },

    /// Raised when an airport code or name cannot be stored in the record format.
    #[error("invalid airport: {reason}")]
    InvalidAirport { reason: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve a data directory for airport and flight records")]
    DataDirUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::UnknownAirport`] without suggestions.
    pub fn unknown_airport(code: impl Into<String>) -> Self {
        Error::UnknownAirport {
            code: code.into(),
            suggestions: Vec::new(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
