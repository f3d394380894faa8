use std::collections::BTreeMap;

use crate::types::{NeighborhoodTemperatures, VulnerableImpact};

pub const ELDERLY_FRACTION: f64 = 0.35;
pub const CHILDREN_FRACTION: f64 = 0.15;
pub const CHRONIC_FRACTION: f64 = 0.30;
pub const OUTDOOR_WORKER_FRACTION: f64 = 0.20;

/// Share of a neighborhood's vulnerable residents exposed at a heat index.
///
/// These thresholds (95/85) are independent of the risk tiers.
pub fn exposure_multiplier(heat_index: f64) -> f64 {
    if heat_index > 95.0 {
        0.4
    } else if heat_index > 85.0 {
        0.2
    } else {
        0.05
    }
}

/// Estimate how many vulnerable residents are at risk, per neighborhood and
/// by overlapping demographic sub-group.
pub fn calculate_vulnerable_impact(
    heat_index: f64,
    neighborhood_temps: &NeighborhoodTemperatures,
) -> VulnerableImpact {
    let multiplier = exposure_multiplier(heat_index);
    let mut by_neighborhood = BTreeMap::new();
    let mut total_at_risk: i64 = 0;

    for (neighborhood, temp) in neighborhood_temps {
        let profile = neighborhood.profile();
        let risk_factor = (temp.temperature / 100.0) * (1.0 - profile.green_space_ratio);
        let at_risk = (profile.vulnerable_population as f64 * multiplier * risk_factor).floor() as i64;
        by_neighborhood.insert(*neighborhood, at_risk);
        total_at_risk += at_risk;
    }

    VulnerableImpact {
        total_at_risk,
        by_neighborhood,
        elderly_65plus: fraction_of(total_at_risk, ELDERLY_FRACTION),
        children_under5: fraction_of(total_at_risk, CHILDREN_FRACTION),
        chronic_conditions: fraction_of(total_at_risk, CHRONIC_FRACTION),
        outdoor_workers: fraction_of(total_at_risk, OUTDOOR_WORKER_FRACTION),
    }
}

fn fraction_of(total: i64, fraction: f64) -> i64 {
    (total as f64 * fraction).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Neighborhood, NeighborhoodTemperature};

    fn temps_at(temperature: f64) -> NeighborhoodTemperatures {
        Neighborhood::ALL
            .iter()
            .map(|n| {
                let p = n.profile();
                (
                    *n,
                    NeighborhoodTemperature {
                        temperature,
                        heat_factor: p.heat_factor,
                        vulnerable_population: p.vulnerable_population,
                        green_space_percent: p.green_space_ratio * 100.0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_exposure_multiplier_thresholds() {
        assert_eq!(exposure_multiplier(96.0), 0.4);
        assert_eq!(exposure_multiplier(95.0), 0.2);
        assert_eq!(exposure_multiplier(85.1), 0.2);
        assert_eq!(exposure_multiplier(85.0), 0.05);
        assert_eq!(exposure_multiplier(40.0), 0.05);
    }

    #[test]
    fn test_per_neighborhood_counts() {
        let impact = calculate_vulnerable_impact(100.0, &temps_at(100.0));
        // 3500 * 0.4 * (1.0 * 0.98) = 1372
        assert_eq!(impact.by_neighborhood[&Neighborhood::Chinatown], 1372);
        // 12000 * 0.4 * 0.88 = 4224
        assert_eq!(impact.by_neighborhood[&Neighborhood::Dorchester], 4224);
        let sum: i64 = impact.by_neighborhood.values().sum();
        assert_eq!(sum, impact.total_at_risk);
        assert_eq!(impact.by_neighborhood.len(), 10);
    }

    #[test]
    fn test_sub_groups_are_independent_fractions() {
        let impact = calculate_vulnerable_impact(90.0, &temps_at(103.7));
        let total = impact.total_at_risk as f64;
        assert_eq!(impact.elderly_65plus, (total * 0.35).floor() as i64);
        assert_eq!(impact.children_under5, (total * 0.15).floor() as i64);
        assert_eq!(impact.chronic_conditions, (total * 0.30).floor() as i64);
        assert_eq!(impact.outdoor_workers, (total * 0.20).floor() as i64);
    }

    #[test]
    fn test_low_heat_index_uses_small_multiplier() {
        let low = calculate_vulnerable_impact(70.0, &temps_at(80.0));
        let high = calculate_vulnerable_impact(100.0, &temps_at(80.0));
        assert!(low.total_at_risk < high.total_at_risk);
        // 3500 * 0.05 * 0.8 * 0.98 = 137.2
        assert_eq!(low.by_neighborhood[&Neighborhood::Chinatown], 137);
    }

    #[test]
    fn test_empty_mapping() {
        let impact = calculate_vulnerable_impact(120.0, &NeighborhoodTemperatures::new());
        assert_eq!(impact, VulnerableImpact::default());
    }
}
