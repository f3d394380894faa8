use crate::types::{RiskAssessment, RiskLevel};

/// Classify a heat index into a risk tier. Boundaries are inclusive-lower.
pub fn assess_risk_level(heat_index: f64) -> RiskAssessment {
    let level = if heat_index < 80.0 {
        RiskLevel::Low
    } else if heat_index < 90.0 {
        RiskLevel::Moderate
    } else if heat_index < 105.0 {
        RiskLevel::High
    } else if heat_index < 130.0 {
        RiskLevel::Extreme
    } else {
        // NaN also lands here
        RiskLevel::Dangerous
    };
    level.assessment()
}

impl RiskLevel {
    pub fn assessment(self) -> RiskAssessment {
        let (color, action) = match self {
            RiskLevel::Low => ("green", "Normal activities"),
            RiskLevel::Moderate => ("yellow", "Stay hydrated"),
            RiskLevel::High => ("orange", "Limit outdoor exposure"),
            RiskLevel::Extreme => ("red", "Stay indoors, cooling centers open"),
            RiskLevel::Dangerous => ("purple", "EMERGENCY - Seek immediate cooling"),
        };
        RiskAssessment { level: self, color, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (79.9, RiskLevel::Low),
            (80.0, RiskLevel::Moderate),
            (89.9, RiskLevel::Moderate),
            (90.0, RiskLevel::High),
            (104.9, RiskLevel::High),
            (105.0, RiskLevel::Extreme),
            (129.9, RiskLevel::Extreme),
            (130.0, RiskLevel::Dangerous),
        ];
        for (hi, expected) in cases {
            assert_eq!(assess_risk_level(hi).level, expected, "heat index {}", hi);
        }
    }

    #[test]
    fn test_extreme_values_are_classified() {
        assert_eq!(assess_risk_level(f64::NEG_INFINITY).level, RiskLevel::Low);
        assert_eq!(assess_risk_level(-40.0).level, RiskLevel::Low);
        assert_eq!(assess_risk_level(500.0).level, RiskLevel::Dangerous);
        assert_eq!(assess_risk_level(f64::INFINITY).level, RiskLevel::Dangerous);
    }

    #[test]
    fn test_partition_is_monotonic() {
        let mut previous = RiskLevel::Low;
        let mut hi = 0.0;
        while hi < 150.0 {
            let level = assess_risk_level(hi).level;
            assert!(level >= previous);
            previous = level;
            hi += 0.1;
        }
        assert_eq!(previous, RiskLevel::Dangerous);
    }

    #[test]
    fn test_actions_and_colors() {
        let a = assess_risk_level(100.0);
        assert_eq!(a.action, "Limit outdoor exposure");
        assert_eq!(a.color, "orange");
        assert_eq!(assess_risk_level(70.0).action, "Normal activities");
        assert_eq!(assess_risk_level(140.0).action, "EMERGENCY - Seek immediate cooling");
    }
}
