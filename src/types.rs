use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Config {
    pub station: String,
    pub noaa_base_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    pub fallback_to_sample: bool,
    pub jitter_seed: Option<u64>,
    pub slack_webhook_url: Option<String>,
    pub history_csv_path: Option<String>,
    pub monitor_interval_minutes: Option<u64>,
}

/// A single point weather observation, already converted to imperial units.
///
/// Every measurement is optional because the upstream feed routinely reports
/// `null` for sensors that are offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub station: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dewpoint: Option<f64>,
    pub heat_index: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
    pub description: Option<String>,
}

/// City neighborhoods covered by the heat-island table, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    Chinatown,
    Roxbury,
    Dorchester,
    EastBoston,
    Mattapan,
    SouthEnd,
    BackBay,
    JamaicaPlain,
    Charlestown,
    Brighton,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 10] = [
        Neighborhood::Chinatown,
        Neighborhood::Roxbury,
        Neighborhood::Dorchester,
        Neighborhood::EastBoston,
        Neighborhood::Mattapan,
        Neighborhood::SouthEnd,
        Neighborhood::BackBay,
        Neighborhood::JamaicaPlain,
        Neighborhood::Charlestown,
        Neighborhood::Brighton,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Neighborhood::Chinatown => "Chinatown",
            Neighborhood::Roxbury => "Roxbury",
            Neighborhood::Dorchester => "Dorchester",
            Neighborhood::EastBoston => "East Boston",
            Neighborhood::Mattapan => "Mattapan",
            Neighborhood::SouthEnd => "South End",
            Neighborhood::BackBay => "Back Bay",
            Neighborhood::JamaicaPlain => "Jamaica Plain",
            Neighborhood::Charlestown => "Charlestown",
            Neighborhood::Brighton => "Brighton",
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodProfile {
    pub neighborhood: Neighborhood,
    pub heat_factor: f64,
    pub vulnerable_population: u32,
    pub green_space_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeighborhoodTemperature {
    pub temperature: f64,
    pub heat_factor: f64,
    pub vulnerable_population: u32,
    pub green_space_percent: f64,
}

pub type NeighborhoodTemperatures = BTreeMap<Neighborhood, NeighborhoodTemperature>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
    Dangerous,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Extreme => "EXTREME",
            RiskLevel::Dangerous => "DANGEROUS",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub color: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VulnerableImpact {
    pub total_at_risk: i64,
    pub by_neighborhood: BTreeMap<Neighborhood, i64>,
    pub elderly_65plus: i64,
    pub children_under5: i64,
    pub chronic_conditions: i64,
    pub outdoor_workers: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    ExtremeHeatWarning,
    HeatAdvisory,
    NeighborhoodAlert,
    NightHeatAlert,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::ExtremeHeatWarning => "EXTREME_HEAT_WARNING",
            AlertType::HeatAdvisory => "HEAT_ADVISORY",
            AlertType::NeighborhoodAlert => "NEIGHBORHOOD_ALERT",
            AlertType::NightHeatAlert => "NIGHT_HEAT_ALERT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    Medium,
    High,
    Critical,
}

impl AlertPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertPriority::Medium => "MEDIUM",
            AlertPriority::High => "HIGH",
            AlertPriority::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub priority: AlertPriority,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoolingCenter {
    pub name: &'static str,
    pub address: &'static str,
    pub neighborhood: Neighborhood,
    pub capacity: u32,
}

#[derive(Serialize)]
pub struct SlackPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub blocks: Vec<serde_json::Value>,
}
