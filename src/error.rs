use thiserror::Error;

/// A page fetch (listing or detail) failed at the transport or HTTP level.
#[derive(Debug, Error)]
#[error("fetch failed for {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub message: String,
}

/// A detail-page label with no entry in the field table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field for '{label}'")]
pub struct UnknownField {
    pub label: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unknown field for '{label}' on {url}")]
    UnknownField { label: String, url: String },

    #[error("odd number of detail cells ({cells}) on {url}")]
    UnpairedCell { url: String, cells: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("no location found for '{0}'")]
    NotFound(String),

    #[error("geocoding provider error for '{address}': {message}")]
    Provider { address: String, message: String },

    #[error("notice {0} has no address")]
    MissingAddress(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError {
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            message: err.to_string(),
        }
    }
}
