use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use crate::types::Config;
use crate::weather::{station_id, STATIONS};

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }
    
    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }
    
    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "True")
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let station = env.get_var("STATION")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "logan".to_string());
    if station_id(&station).is_none() {
        return Err(anyhow!("STATION must be one of: {}", station_keys().join(", ")));
    }

    let noaa_base_url = env.get_var("NOAA_BASE_URL")
        .unwrap_or_else(|| "https://api.weather.gov".to_string());

    let user_agent = env.get_var("USER_AGENT")
        .unwrap_or_else(|| "heat-risk-monitor".to_string());

    let http_timeout_secs: u64 = env.get_var("HTTP_TIMEOUT_SECS")
        .unwrap_or_else(|| "10".to_string())
        .parse()
        .unwrap_or(10);

    let fallback_to_sample = env.get_var("FALLBACK_TO_SAMPLE")
        .map(|v| parse_bool(&v))
        .unwrap_or(true);

    let jitter_seed = env.get_var("JITTER_SEED")
        .map(|v| v.trim().parse::<u64>())
        .transpose()
        .context("Invalid JITTER_SEED")?;

    let slack_webhook_url = env.get_var("SLACK_WEBHOOK_URL").filter(|s| !s.is_empty());
    let history_csv_path = env.get_var("HISTORY_CSV_PATH").filter(|s| !s.is_empty());

    let monitor_interval_minutes = env.get_var("MONITOR_INTERVAL_MINUTES")
        .map(|v| v.trim().parse::<u64>())
        .transpose()
        .context("Invalid MONITOR_INTERVAL_MINUTES")?;
    if monitor_interval_minutes == Some(0) {
        return Err(anyhow!("MONITOR_INTERVAL_MINUTES must be greater than zero"));
    }

    Ok(Config {
        station,
        noaa_base_url,
        user_agent,
        http_timeout_secs,
        fallback_to_sample,
        jitter_seed,
        slack_webhook_url,
        history_csv_path,
        monitor_interval_minutes,
    })
}

fn station_keys() -> Vec<&'static str> {
    STATIONS.iter().map(|(k, _)| *k).collect()
}
