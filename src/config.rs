use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{invalid_input_error, Error};

const DEFAULT_DATABASE_URL: &str = "sqlite://myplaces.db";
const DEFAULT_GEOCODER_BASE: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub geocoder_base: String,
    pub user_agent: String,
    pub geocoder_timeout: Option<Duration>,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Reads `MYPLACES_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("MYPLACES_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let geocoder_base =
            lookup("MYPLACES_GEOCODER_BASE").unwrap_or_else(|| DEFAULT_GEOCODER_BASE.into());
        let user_agent = lookup("MYPLACES_USER_AGENT")
            .unwrap_or_else(|| format!("myplaces/{}", env!("CARGO_PKG_VERSION")));

        let geocoder_timeout = match lookup("MYPLACES_GEOCODER_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(
                secs.trim().parse().map_err(|_| invalid_input_error())?,
            )),
            None => None,
        };

        let listen_addr = lookup("MYPLACES_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into())
            .parse()
            .map_err(|_| invalid_input_error())?;

        Ok(Self {
            database_url,
            geocoder_base,
            user_agent,
            geocoder_timeout,
            listen_addr,
        })
    }
}

#[test]
fn defaults_apply_when_unset() {
    let config = Config::from_lookup(|_| None).unwrap();

    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.geocoder_base, DEFAULT_GEOCODER_BASE);
    assert!(config.user_agent.starts_with("myplaces/"));
    assert_eq!(config.geocoder_timeout, None);
    assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
}

#[test]
fn overrides_are_read() {
    let config = Config::from_lookup(|key| match key {
        "MYPLACES_DATABASE_URL" => Some("sqlite::memory:".into()),
        "MYPLACES_GEOCODER_TIMEOUT_SECS" => Some("5".into()),
        "MYPLACES_LISTEN_ADDR" => Some("0.0.0.0:8080".into()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.geocoder_timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.listen_addr.port(), 8080);
}

#[test]
fn malformed_values_are_rejected() {
    let err = Config::from_lookup(|key| match key {
        "MYPLACES_LISTEN_ADDR" => Some("not an address".into()),
        _ => None,
    })
    .unwrap_err();

    assert!(err.is_invalid_input_error());
}
