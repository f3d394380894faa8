// Heat risk model
pub mod neighborhoods;
pub mod risk;
pub mod impact;
pub mod alerts;
pub mod cooling;

// Re-export commonly used items
pub use neighborhoods::{adjust_temperatures, adjust_temperatures_with_entropy, PROFILES};
pub use risk::assess_risk_level;
pub use impact::calculate_vulnerable_impact;
pub use alerts::{generate_alerts, AlertConditions};
pub use cooling::COOLING_CENTERS;
