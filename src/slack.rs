use anyhow::{anyhow, Context, Result};
use tracing::error;

use crate::model::cooling::COOLING_CENTERS;
use crate::report::HeatRiskReport;
use crate::types::{Config, RiskLevel, SlackPayload};

fn opt(value: Option<f64>, unit: &str) -> String {
    value.map(|v| format!("{}{}", v, unit)).unwrap_or_else(|| "N/A".to_string())
}

fn section(text: String) -> serde_json::Value {
    serde_json::json!({
        "type": "section",
        "text": {"type": "mrkdwn", "text": text}
    })
}

pub fn build_slack_payload(cfg: &Config, report: &HeatRiskReport) -> SlackPayload {
    let mut blocks: Vec<serde_json::Value> = Vec::new();
    let obs = &report.observation;

    blocks.push(serde_json::json!({
        "type": "header",
        "text": {"type": "plain_text", "text": format!("Heat Risk Report - {}", cfg.station.to_uppercase())}
    }));

    // Current conditions
    let conditions = format!(
        "*Current conditions* ({})\nTemperature: {}\nHeat index: {}\nHumidity: {}\nWind: {}\nVisibility: {}\nConditions: {}",
        obs.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        opt(obs.temperature, "°F"),
        opt(report.heat_index, "°F"),
        opt(obs.humidity, "%"),
        opt(obs.wind_speed, " mph"),
        opt(obs.visibility, " miles"),
        obs.description.as_deref().unwrap_or("N/A"),
    );
    blocks.push(section(conditions));

    // Risk level
    let risk_text = match &report.risk {
        Some(r) => format!("*Risk level: {}*\n{}", r.level, r.action),
        None => "*Risk level: unknown*\nHeat index unavailable.".to_string(),
    };
    blocks.push(section(risk_text));

    // Hottest neighborhoods
    let mut hot_lines: Vec<String> = report
        .hottest_neighborhoods(5)
        .iter()
        .map(|(n, t)| format!("• `{}` {:.1}°F (factor: {})", n, t.temperature, t.heat_factor))
        .collect();
    if hot_lines.is_empty() {
        hot_lines.push("No neighborhood temperatures available.".to_string());
    }
    blocks.push(section(format!("*Hottest neighborhoods*\n{}", hot_lines.join("\n"))));

    // Vulnerable population impact
    let impact_text = match &report.vulnerable_impact {
        Some(v) => format!(
            "*Vulnerable population impact*\nTotal at risk: {}\nElderly (65+): {}\nChildren (<5): {}\nChronic conditions: {}\nOutdoor workers: {}",
            v.total_at_risk, v.elderly_65plus, v.children_under5, v.chronic_conditions, v.outdoor_workers
        ),
        None => "*Vulnerable population impact*\nNot available.".to_string(),
    };
    blocks.push(section(impact_text));

    // Alerts
    let mut alert_lines: Vec<String> = report
        .alerts
        .iter()
        .map(|a| format!("• [{}] {} - {}", a.priority.as_str(), a.message, a.action))
        .collect();
    if alert_lines.is_empty() {
        alert_lines.push("No active alerts.".to_string());
    }
    blocks.push(section(format!("*Active alerts*\n{}", alert_lines.join("\n"))));

    // Cooling centers only matter once people are told to stay indoors
    if matches!(report.risk.as_ref().map(|r| r.level), Some(RiskLevel::Extreme | RiskLevel::Dangerous)) {
        let center_lines: Vec<String> = COOLING_CENTERS
            .iter()
            .map(|c| format!("• {} - {} (capacity {})", c.name, c.address, c.capacity))
            .collect();
        blocks.push(section(format!("*Cooling centers*\n{}", center_lines.join("\n"))));
    }

    SlackPayload { text: None, blocks }
}

pub async fn send_to_slack(webhook_url: &str, payload: &SlackPayload) -> Result<()> {
    let client = reqwest::Client::new();
    let res = client
        .post(webhook_url)
        .json(payload)
        .send()
        .await
        .context("Failed to send Slack request")?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        error!("Slack webhook failed: {} - {}", status, body);
        return Err(anyhow!("Slack webhook returned non-success status"));
    }
    Ok(())
}
