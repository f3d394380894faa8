use chrono::{DateTime, Utc};
use tracing::warn;

use crate::types::{Config, Observation};
use crate::weather::{WeatherClient, WeatherError};

/// Collector that turns the weather feed into an observation, falling back
/// to a canned sample when the feed is unavailable.
pub struct ObservationCollector {
    client: WeatherClient,
    fallback_to_sample: bool,
}

impl ObservationCollector {
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        Ok(Self {
            client: WeatherClient::new(config)?,
            fallback_to_sample: config.fallback_to_sample,
        })
    }

    /// Latest observation, the sample observation on failure when fallback
    /// is enabled, otherwise `None`.
    pub async fn collect(&self) -> Option<Observation> {
        match self.client.fetch_latest().await {
            Ok(observation) => Some(observation),
            Err(e) if self.fallback_to_sample => {
                warn!("Weather fetch failed ({}), using sample observation", e);
                Some(sample_observation(self.client.station(), Utc::now()))
            }
            Err(e) => {
                warn!("Weather fetch failed ({}), no observation available", e);
                None
            }
        }
    }
}

/// Hot, humid summer afternoon used when the live feed is unavailable.
pub fn sample_observation(station: &str, timestamp: DateTime<Utc>) -> Observation {
    Observation {
        timestamp,
        station: station.to_string(),
        temperature: Some(89.0),
        humidity: Some(68.0),
        dewpoint: Some(76.0),
        heat_index: Some(96.0),
        wind_speed: Some(12.0),
        wind_direction: Some(180.0),
        pressure: Some(29.92),
        visibility: Some(8.5),
        description: Some("Hot and humid".to_string()),
    }
}
