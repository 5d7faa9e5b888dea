use thiserror::Error;

/// Failure produced while loading resources
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The locator could not be retrieved (io, network or non-success status)
    #[error("Cannot fetch '{locator}': {reason}")]
    Fetch { locator: String, reason: String },

    /// The bytes were retrieved but are not a valid image
    #[error("Cannot decode image '{locator}': {reason}")]
    Decode { locator: String, reason: String },

    /// The bytes were retrieved but are not valid json
    #[error("Cannot parse json '{locator}': {reason}")]
    Parse { locator: String, reason: String },

    /// At least one resource of a batch failed
    #[error("{} of {total} resources failed to load: {}", .failed.len(), .failed.join(", "))]
    Aggregate { failed: Vec<String>, total: usize },

    #[error("A batch is already in flight")]
    BatchInFlight,

    #[error("Cannot initialize loader: {0}")]
    Init(String),
}

impl LoadError {
    pub(crate) fn fetch(locator: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decode(locator: &str, reason: impl ToString) -> Self {
        Self::Decode {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse(locator: &str, reason: impl ToString) -> Self {
        Self::Parse {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }
}
