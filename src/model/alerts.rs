use crate::types::{Alert, AlertPriority, AlertType, NeighborhoodTemperatures};

pub const EXTREME_HEAT_INDEX: f64 = 105.0;
pub const ADVISORY_HEAT_INDEX: f64 = 95.0;
pub const NEIGHBORHOOD_ALERT_TEMP: f64 = 95.0;
pub const NIGHT_ALERT_TEMP: f64 = 75.0;

/// Current conditions an alert evaluation runs against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertConditions {
    pub heat_index: f64,
    pub temperature: f64,
    /// Local hour of the observation, 0..=23.
    pub hour: u32,
}

/// Night runs from 20:00 through 06:59 local time.
pub fn is_night_hour(hour: u32) -> bool {
    hour >= 20 || hour <= 6
}

/// Derive alerts for one evaluation. Output order is generation order:
/// city-wide heat alert, then neighborhood alerts in table order, then the
/// night alert. Nothing is remembered between calls.
pub fn generate_alerts(conditions: &AlertConditions, neighborhood_temps: &NeighborhoodTemperatures) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let heat_index = conditions.heat_index;

    if heat_index >= EXTREME_HEAT_INDEX {
        alerts.push(Alert {
            alert_type: AlertType::ExtremeHeatWarning,
            priority: AlertPriority::Critical,
            message: format!("Extreme heat danger! Heat index: {}°F", heat_index),
            action: "All cooling centers open. Check on elderly neighbors.".to_string(),
        });
    } else if heat_index >= ADVISORY_HEAT_INDEX {
        alerts.push(Alert {
            alert_type: AlertType::HeatAdvisory,
            priority: AlertPriority::High,
            message: format!("Heat advisory in effect. Heat index: {}°F", heat_index),
            action: "Limit outdoor activities between 10 AM - 6 PM".to_string(),
        });
    }

    for (neighborhood, data) in neighborhood_temps {
        if data.temperature > NEIGHBORHOOD_ALERT_TEMP {
            alerts.push(Alert {
                alert_type: AlertType::NeighborhoodAlert,
                priority: AlertPriority::Medium,
                message: format!("{}: Temperature {:.1}°F", neighborhood, data.temperature),
                action: "Cooling center available at nearest BCYF".to_string(),
            });
        }
    }

    if is_night_hour(conditions.hour) && conditions.temperature > NIGHT_ALERT_TEMP {
        alerts.push(Alert {
            alert_type: AlertType::NightHeatAlert,
            priority: AlertPriority::Medium,
            message: "Elevated nighttime temperatures preventing cooling".to_string(),
            action: "Use fans, take cool showers, stay hydrated".to_string(),
        });
    }

    alerts
}
