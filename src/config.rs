// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;

use crate::upstream::place_cache::EvictionPolicy;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DB_PATH: &str = "reviews.sqlite3";
const DEFAULT_HOSTAWAY_BASE_URL: &str = "https://api.hostaway.com/v1";
const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const DEFAULT_MAX_WORKERS: usize = 8;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Property-management provider (Hostaway) settings.
#[derive(Debug, Clone)]
pub struct HostawayConfig {
    pub base_url: String,
    pub account_id: Option<String>,
    pub api_key: Option<String>,
}

/// Places provider (Google Places) settings.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Fleet-wide place whose reviews join the dashboard.
    pub place_id: Option<String>,
    /// Listing those reviews are filed under; `Google Place <id>` when unset.
    pub place_listing_name: Option<String>,
    pub cache: EvictionPolicy,
}

/// Application configuration loaded from environment variables.
/// Secrets are optional: a missing credential makes that source
/// serve its bundled fallback dataset.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub db_path: String,
    pub upstream_timeout: Duration,
    pub hostaway: HostawayConfig,
    pub places: PlacesConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bind_addr = env_or("REVIEWS_BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid REVIEWS_BIND_ADDR, using default");
                SocketAddr::from(([127, 0, 0, 1], 3000))
            });

        let capacity = env_parsed::<usize>("PLACES_CACHE_CAPACITY");
        let ttl = env_parsed::<u64>("PLACES_CACHE_TTL_SECS").map(Duration::from_secs);

        let config = Self {
            bind_addr,
            max_workers: env_parsed("REVIEWS_MAX_WORKERS").unwrap_or(DEFAULT_MAX_WORKERS),
            db_path: env_or("REVIEWS_DB_PATH", DEFAULT_DB_PATH),
            upstream_timeout: Duration::from_secs(
                env_parsed("UPSTREAM_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            hostaway: HostawayConfig {
                base_url: env_or("HOSTAWAY_API_BASE_URL", DEFAULT_HOSTAWAY_BASE_URL),
                account_id: env_opt("HOSTAWAY_ACCOUNT_ID"),
                api_key: env_opt("HOSTAWAY_API_KEY"),
            },
            places: PlacesConfig {
                base_url: env_or("GOOGLE_PLACES_API_URL", DEFAULT_PLACES_BASE_URL),
                api_key: env_opt("GOOGLE_PLACES_API_KEY"),
                place_id: env_opt("GOOGLE_PLACE_ID"),
                place_listing_name: env_opt("GOOGLE_PLACE_LISTING_NAME"),
                cache: EvictionPolicy::from_settings(capacity, ttl),
            },
        };

        config.log_keys();
        config
    }

    /// Configuration with no credentials and a throwaway database path.
    /// Both sources fall back to their bundled datasets without touching the network.
    pub fn offline(db_path: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            max_workers: 1,
            db_path: db_path.into(),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            hostaway: HostawayConfig {
                base_url: DEFAULT_HOSTAWAY_BASE_URL.to_string(),
                account_id: None,
                api_key: None,
            },
            places: PlacesConfig {
                base_url: DEFAULT_PLACES_BASE_URL.to_string(),
                api_key: None,
                place_id: None,
                place_listing_name: None,
                cache: EvictionPolicy::Unbounded,
            },
        }
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => {
                    let n = v.chars().take(4).collect::<String>();
                    format!("{n}...({} chars)", v.len())
                }
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!(
            bind_addr = %self.bind_addr,
            db_path = %self.db_path,
            workers = self.max_workers,
            "config loaded"
        );
        tracing::info!("  HOSTAWAY_ACCOUNT_ID: {}", preview_opt(&self.hostaway.account_id));
        tracing::info!("  HOSTAWAY_API_KEY: {}", preview_opt(&self.hostaway.api_key));
        tracing::info!("  GOOGLE_PLACES_API_KEY: {}", preview_opt(&self.places.api_key));
        tracing::info!(
            "  GOOGLE_PLACE_ID: {}",
            self.places.place_id.as_deref().unwrap_or("<not set>")
        );
        tracing::info!("  places cache: {:?}", self.places.cache);
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_opt(key)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring malformed numeric setting");
            None
        }
    }
}
