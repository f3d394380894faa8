//! NOAA `api.weather.gov` latest-observation client.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::heat_index::{celsius_to_fahrenheit, heat_index_from, kmh_to_mph, meters_to_miles, mps_to_mph};
use crate::types::{Config, Observation};

/// Station keys and their ICAO identifiers.
pub const STATIONS: &[(&str, &str)] = &[
    ("logan", "KBOS"),
    ("blue_hill", "KMQE"),
    ("bedford", "KBED"),
    ("norwood", "KOWD"),
];

pub fn station_id(key: &str) -> Option<&'static str> {
    STATIONS.iter().find(|(k, _)| *k == key).map(|(_, id)| *id)
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("weather service returned status {0}")]
    Status(u16),
    #[error("malformed observation payload: {0}")]
    Malformed(String),
    #[error("unknown station: {0}")]
    UnknownStation(String),
}

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    properties: Option<ObservationProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationProperties {
    timestamp: Option<DateTime<Utc>>,
    text_description: Option<String>,
    #[serde(default)]
    temperature: Measurement,
    #[serde(default)]
    dewpoint: Measurement,
    #[serde(default)]
    relative_humidity: Measurement,
    #[serde(default)]
    heat_index: Measurement,
    #[serde(default)]
    wind_speed: Measurement,
    #[serde(default)]
    wind_direction: Measurement,
    #[serde(default)]
    barometric_pressure: Measurement,
    #[serde(default)]
    visibility: Measurement,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Measurement {
    value: Option<f64>,
    unit_code: Option<String>,
}

pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    station: String,
    station_id: &'static str,
}

impl WeatherClient {
    pub fn new(cfg: &Config) -> Result<Self, WeatherError> {
        let station_id = station_id(&cfg.station).ok_or_else(|| WeatherError::UnknownStation(cfg.station.clone()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .user_agent(cfg.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.noaa_base_url.trim_end_matches('/').to_string(),
            station: cfg.station.clone(),
            station_id,
        })
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    /// Fetch the latest observation for the configured station.
    pub async fn fetch_latest(&self) -> Result<Observation, WeatherError> {
        let url = format!("{}/stations/{}/observations/latest", self.base_url, self.station_id);
        info!("Fetching weather from {} ({})", self.station, self.station_id);
        let res = self
            .http
            .get(&url)
            .header("Accept", "application/geo+json")
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(WeatherError::Status(res.status().as_u16()));
        }
        let body = res.text().await?;
        parse_observation(&body, &self.station, Utc::now())
    }
}

/// Map a NOAA observation document onto an `Observation`. `fetched_at` is
/// used when the payload carries no timestamp.
pub fn parse_observation(body: &str, station: &str, fetched_at: DateTime<Utc>) -> Result<Observation, WeatherError> {
    let response: ObservationResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;
    let props = response
        .properties
        .ok_or_else(|| WeatherError::Malformed("missing properties".to_string()))?;

    let temperature = celsius_to_fahrenheit(props.temperature.value);
    let humidity = props.relative_humidity.value;
    let heat_index = celsius_to_fahrenheit(props.heat_index.value).or_else(|| {
        debug!("heat index not reported, computing from temperature and humidity");
        heat_index_from(temperature, humidity)
    });

    let wind_speed = match props.wind_speed.unit_code.as_deref() {
        Some(code) if code.ends_with("km_h-1") => kmh_to_mph(props.wind_speed.value),
        _ => mps_to_mph(props.wind_speed.value),
    };

    Ok(Observation {
        timestamp: props.timestamp.unwrap_or(fetched_at),
        station: station.to_string(),
        temperature,
        humidity,
        dewpoint: celsius_to_fahrenheit(props.dewpoint.value),
        heat_index,
        wind_speed,
        wind_direction: props.wind_direction.value,
        pressure: props.barometric_pressure.value,
        visibility: meters_to_miles(props.visibility.value),
        description: props.text_description,
    })
}
