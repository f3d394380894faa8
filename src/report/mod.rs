use chrono::{Local, Timelike};
use rand::Rng;
use tracing::{debug, warn};

use crate::heat_index::heat_index_from;
use crate::model::{
    adjust_temperatures, assess_risk_level, calculate_vulnerable_impact, generate_alerts, AlertConditions,
};
use crate::types::*;

/// Everything the model derives from one observation.
///
/// Each derived field is `None` (or empty) when the observation lacks the
/// inputs it depends on.
pub struct HeatRiskReport {
    pub observation: Observation,
    pub heat_index: Option<f64>,
    pub risk: Option<RiskAssessment>,
    pub neighborhood_temps: NeighborhoodTemperatures,
    pub vulnerable_impact: Option<VulnerableImpact>,
    pub alerts: Vec<Alert>,
}

impl HeatRiskReport {
    /// Run the model against `observation`. `hour` is the local hour used
    /// for the night-heat check.
    pub fn evaluate<R: Rng + ?Sized>(observation: Observation, rng: &mut R, hour: u32) -> Self {
        let heat_index = observation
            .heat_index
            .or_else(|| heat_index_from(observation.temperature, observation.humidity));
        if heat_index.is_none() {
            warn!("Observation from {} lacks temperature or humidity; heat index unavailable", observation.station);
        }

        let risk = heat_index.map(assess_risk_level);

        let neighborhood_temps = match observation.temperature {
            Some(base) => adjust_temperatures(base, rng),
            None => NeighborhoodTemperatures::new(),
        };

        let (vulnerable_impact, alerts) = match (heat_index, observation.temperature) {
            (Some(hi), Some(temperature)) => {
                let impact = calculate_vulnerable_impact(hi, &neighborhood_temps);
                let conditions = AlertConditions { heat_index: hi, temperature, hour };
                let alerts = generate_alerts(&conditions, &neighborhood_temps);
                (Some(impact), alerts)
            }
            _ => (None, Vec::new()),
        };
        debug!("{} alerts generated", alerts.len());

        Self {
            observation,
            heat_index,
            risk,
            neighborhood_temps,
            vulnerable_impact,
            alerts,
        }
    }

    /// Evaluate using the observation's own timestamp in the local time zone.
    pub fn evaluate_now<R: Rng + ?Sized>(observation: Observation, rng: &mut R) -> Self {
        let hour = local_hour(&observation);
        Self::evaluate(observation, rng, hour)
    }

    /// Neighborhoods sorted hottest first, at most `n` of them.
    pub fn hottest_neighborhoods(&self, n: usize) -> Vec<(Neighborhood, NeighborhoodTemperature)> {
        let mut sorted: Vec<_> = self.neighborhood_temps.iter().map(|(k, v)| (*k, *v)).collect();
        sorted.sort_by(|a, b| b.1.temperature.total_cmp(&a.1.temperature));
        sorted.truncate(n);
        sorted
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            risk_level: self.risk.as_ref().map(|r| r.level),
            alert_count: self.alerts.len(),
            critical_alert_count: self
                .alerts
                .iter()
                .filter(|a| a.priority == AlertPriority::Critical)
                .count(),
            total_at_risk: self.vulnerable_impact.as_ref().map(|v| v.total_at_risk).unwrap_or(0),
            hottest: self.hottest_neighborhoods(1).first().map(|(n, _)| *n),
        }
    }
}

pub fn local_hour(observation: &Observation) -> u32 {
    observation.timestamp.with_timezone(&Local).hour()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub risk_level: Option<RiskLevel>,
    pub alert_count: usize,
    pub critical_alert_count: usize,
    pub total_at_risk: i64,
    pub hottest: Option<Neighborhood>,
}

impl ReportSummary {
    pub fn has_alerts(&self) -> bool {
        self.alert_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::alerts::is_night_hour;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn observation(temperature: Option<f64>, humidity: Option<f64>) -> Observation {
        Observation {
            timestamp: Utc::now(),
            station: "logan".to_string(),
            temperature,
            humidity,
            dewpoint: None,
            heat_index: None,
            wind_speed: None,
            wind_direction: None,
            pressure: None,
            visibility: None,
            description: None,
        }
    }

    #[test]
    fn test_missing_humidity_short_circuits() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = HeatRiskReport::evaluate(observation(Some(92.0), None), &mut rng, 12);
        assert_eq!(report.heat_index, None);
        assert!(report.risk.is_none());
        assert!(report.vulnerable_impact.is_none());
        assert!(report.alerts.is_empty());
        // temperature alone still drives the neighborhood model
        assert_eq!(report.neighborhood_temps.len(), 10);
    }

    #[test]
    fn test_missing_temperature_yields_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = HeatRiskReport::evaluate(observation(None, Some(60.0)), &mut rng, 12);
        assert!(report.neighborhood_temps.is_empty());
        assert!(report.risk.is_none());
        let summary = report.summary();
        assert_eq!(summary.total_at_risk, 0);
        assert_eq!(summary.hottest, None);
        assert!(!summary.has_alerts());
    }

    #[test]
    fn test_reported_heat_index_is_used() {
        let mut obs = observation(Some(89.0), Some(68.0));
        obs.heat_index = Some(96.0);
        let report = HeatRiskReport::evaluate(obs, &mut ChaCha8Rng::seed_from_u64(3), 12);
        assert_eq!(report.heat_index, Some(96.0));
        assert_eq!(report.risk.unwrap().level, RiskLevel::High);
        assert_eq!(report.alerts[0].alert_type, AlertType::HeatAdvisory);
    }

    #[test]
    fn test_hottest_neighborhoods_sorted() {
        let report = HeatRiskReport::evaluate(observation(Some(90.0), Some(50.0)), &mut ChaCha8Rng::seed_from_u64(5), 12);
        let top = report.hottest_neighborhoods(5);
        assert_eq!(top.len(), 5);
        for pair in top.windows(2) {
            assert!(pair[0].1.temperature >= pair[1].1.temperature);
        }
        // 1.5x base with at most 2 degrees of jitter always leads
        assert_eq!(top[0].0, Neighborhood::Chinatown);
        assert_eq!(report.summary().hottest, Some(Neighborhood::Chinatown));
    }

    #[test]
    fn test_summary_counts() {
        let report = HeatRiskReport::evaluate(observation(Some(95.0), Some(65.0)), &mut ChaCha8Rng::seed_from_u64(11), 23);
        let summary = report.summary();
        assert_eq!(summary.risk_level, Some(RiskLevel::Extreme));
        assert_eq!(summary.critical_alert_count, 1);
        assert_eq!(summary.alert_count, report.alerts.len());
        assert!(summary.total_at_risk > 0);
        assert!(report.has_alerts());
    }

    #[test]
    fn test_local_hour_follows_process_time_zone() {
        let mut obs = observation(Some(80.0), Some(40.0));
        obs.timestamp = Utc.with_ymd_and_hms(2024, 7, 15, 3, 0, 0).unwrap();
        let expected = obs.timestamp.with_timezone(&Local).hour();
        assert_eq!(local_hour(&obs), expected);

        let report = HeatRiskReport::evaluate_now(obs, &mut ChaCha8Rng::seed_from_u64(7));
        let has_night_alert = report.alerts.iter().any(|a| a.alert_type == AlertType::NightHeatAlert);
        assert_eq!(has_night_alert, is_night_hour(expected));
    }
}
