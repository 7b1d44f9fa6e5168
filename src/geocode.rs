use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::{Client, Request};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::GeocodeError;
use crate::notice::Location;
use crate::text::scrub;

/// Resolves a free-text address to coordinates.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Location, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Location, GeocodeError> {
        (**self).geocode(address)
    }
}

// ── Google Geocoding API ──

pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    /// Without an API key requests go out keyless and are subject to the
    /// provider's anonymous limits.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(GoogleGeocoder {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// The `key` parameter is only sent when an api key is configured.
    fn request(&self, address: &str) -> Result<Request, reqwest::Error> {
        let mut req = self.client.get(&self.endpoint).query(&[("address", address)]);
        if let Some(key) = &self.api_key {
            req = req.query(&[("key", key)]);
        }
        req.build()
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<Location, GeocodeError> {
        let provider_err = |e: reqwest::Error| GeocodeError::Provider {
            address: address.to_string(),
            message: e.to_string(),
        };

        let body: GeocodeResponse = self
            .request(address)
            .and_then(|req| self.client.execute(req))
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(provider_err)?;

        interpret(address, body)
    }
}

fn interpret(address: &str, body: GeocodeResponse) -> Result<Location, GeocodeError> {
    match body.status.as_str() {
        "OK" => body
            .results
            .first()
            .map(|r| Location {
                lat: r.geometry.location.lat,
                lng: r.geometry.location.lng,
            })
            .ok_or_else(|| GeocodeError::NotFound(address.to_string())),
        "ZERO_RESULTS" => Err(GeocodeError::NotFound(address.to_string())),
        status => Err(GeocodeError::Provider {
            address: address.to_string(),
            message: match body.error_message {
                Some(msg) => format!("{}: {}", status, msg),
                None => status.to_string(),
            },
        }),
    }
}

// ── Per-run cache ──

/// Memoizes successful lookups by normalized address for the lifetime of one run.
/// Failures are not cached.
pub struct GeocodeCache<G> {
    geocoder: G,
    entries: HashMap<String, Location>,
    hits: usize,
    misses: usize,
}

impl<G: Geocoder> GeocodeCache<G> {
    pub fn new(geocoder: G) -> Self {
        GeocodeCache {
            geocoder,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn resolve(&mut self, address: &str) -> Result<Location, GeocodeError> {
        let address = scrub(address);

        if let Some(location) = self.entries.get(&address) {
            info!("Geocoding [cache hit] {}", address);
            self.hits += 1;
            return Ok(*location);
        }

        info!("Geocoding {}", address);
        self.misses += 1;
        let location = self.geocoder.geocode(&address)?;
        debug!("{} -> {}, {}", address, location.lat, location.lng);
        self.entries.insert(address, location);
        Ok(location)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
