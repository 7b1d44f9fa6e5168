use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://www.foodauthority.nsw.gov.au/penalty-notices/default.aspx";
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Runtime settings, read from `MORPH_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// `MORPH_GOOGLE_API_KEY`; keyless geocoding when unset.
    pub google_api_key: Option<String>,
    pub db_path: PathBuf,
    pub base_url: String,
    pub geocode_url: String,
    pub http_timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix("MORPH").try_parsing(true))
    }

    fn from_source(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("db_path", "data.sqlite")?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("geocode_url", DEFAULT_GEOCODE_URL)?
            .set_default("http_timeout_secs", 30)?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// One-line summary for logs. Only says whether the api key is set.
    pub fn redacted(&self) -> String {
        format!(
            "db_path={:?} base_url={} geocode_url={} google_api_key={} timeout={}s",
            self.db_path,
            self.base_url,
            self.geocode_url,
            if self.google_api_key.is_some() { "set" } else { "unset" },
            self.http_timeout_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("MORPH")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_without_environment() {
        let s = Settings::from_source(env(&[])).unwrap();
        assert_eq!(s.google_api_key, None);
        assert_eq!(s.db_path, PathBuf::from("data.sqlite"));
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.geocode_url, DEFAULT_GEOCODE_URL);
        assert_eq!(s.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn reads_prefixed_variables() {
        let s = Settings::from_source(env(&[
            ("MORPH_GOOGLE_API_KEY", "secret"),
            ("MORPH_DB_PATH", "/tmp/notices.sqlite"),
            ("MORPH_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(s.google_api_key.as_deref(), Some("secret"));
        assert_eq!(s.db_path, PathBuf::from("/tmp/notices.sqlite"));
        assert_eq!(s.http_timeout_secs, 5);
        assert!(!s.redacted().contains("secret"));
    }
}
