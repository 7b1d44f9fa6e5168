use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::FetchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of raw HTML pages.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        (**self).get(url)
    }
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(HttpClient { client })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let transport_err = |e: reqwest::Error| FetchError {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self.client.get(url).send().map_err(transport_err)?;
        check_status(url, resp.status())?;
        resp.text().map_err(transport_err)
    }
}

/// Anything outside 2xx fails the fetch.
fn check_status(url: &str, status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        return Ok(());
    }
    Err(FetchError {
        url: url.to_string(),
        message: format!("HTTP status {}", status),
    })
}
