// Public modules
pub mod types;
pub mod config;
pub mod heat_index;
pub mod model;
pub mod weather;
pub mod collector;
pub mod report;
pub mod history;
pub mod slack;
pub mod monitor;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use heat_index::{heat_index, heat_index_from, rounded_heat_index};
pub use model::*;
pub use weather::{WeatherClient, WeatherError};
pub use collector::{sample_observation, ObservationCollector};
pub use report::{local_hour, HeatRiskReport, ReportSummary};
pub use history::{HistoryStatistics, HistoryStore, HistoryTracker, RunningStatistics};
pub use slack::{build_slack_payload, send_to_slack};
pub use monitor::process_observation;
