use anyhow::Result;
use rand::Rng;
use tracing::{info, warn};

use crate::history::HistoryTracker;
use crate::report::HeatRiskReport;
use crate::slack::{build_slack_payload, send_to_slack};
use crate::types::{Config, Observation};

/// One monitoring cycle for an observation: evaluate, notify, then persist.
///
/// History failures are logged and never stop a notification. A Slack
/// failure is returned after history has been written.
pub async fn process_observation<R: Rng + ?Sized>(
    cfg: &Config,
    observation: Observation,
    history: Option<&mut HistoryTracker>,
    rng: &mut R,
    hour: u32,
) -> Result<HeatRiskReport> {
    let report = HeatRiskReport::evaluate(observation, rng, hour);
    log_report(&report);

    let notified = notify(cfg, &report).await;

    if let Some(tracker) = history {
        match tracker.record(&report.observation) {
            Ok(()) => {
                if let Some(stats) = tracker.statistics() {
                    info!(
                        "History: {} records, max temperature {:?}, max heat index {:?}",
                        stats.total_records, stats.max_temp, stats.max_heat_index
                    );
                }
            }
            Err(e) => warn!("Failed to save observation to history: {:#}", e),
        }
    }

    notified?;
    Ok(report)
}

async fn notify(cfg: &Config, report: &HeatRiskReport) -> Result<()> {
    match &cfg.slack_webhook_url {
        Some(url) if report.has_alerts() => {
            info!("Alerts active, sending notification to Slack");
            let payload = build_slack_payload(cfg, report);
            send_to_slack(url, &payload).await
        }
        Some(_) => {
            info!("No alerts, skipping Slack notification");
            Ok(())
        }
        None => Ok(()),
    }
}

fn log_report(report: &HeatRiskReport) {
    for (name, t) in report.hottest_neighborhoods(5) {
        info!("{:15} {:.1}°F (factor: {})", name.name(), t.temperature, t.heat_factor);
    }
    if let Some(risk) = &report.risk {
        info!("Risk level: {} - {}", risk.level, risk.action);
    }
    if let Some(impact) = &report.vulnerable_impact {
        info!(
            "Vulnerable population: {} at risk ({} elderly, {} children)",
            impact.total_at_risk, impact.elderly_65plus, impact.children_under5
        );
    }
    for alert in &report.alerts {
        info!("[{}] {}", alert.priority.as_str(), alert.message);
    }
    let summary = report.summary();
    info!("Heat risk summary: {} alerts ({} critical)", summary.alert_count, summary.critical_alert_count);
}
