use anyhow::Result;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{info, warn};

use heat_risk_monitor::{
    load_config, local_hour, process_observation, Config, HistoryStore, HistoryTracker, ObservationCollector,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!("station = {}", cfg.station);

    let collector = ObservationCollector::new(&cfg)?;
    let mut history = cfg.history_csv_path.as_ref().map(|p| HistoryTracker::open(HistoryStore::new(p)));
    let mut rng: Box<dyn RngCore + Send> = match cfg.jitter_seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(ChaCha8Rng::from_entropy()),
    };

    let Some(interval) = cfg.monitor_interval_minutes else {
        return run_once(&cfg, &collector, history.as_mut(), &mut *rng).await;
    };

    info!("Starting continuous monitoring (every {} minutes)", interval);
    loop {
        if let Err(e) = run_once(&cfg, &collector, history.as_mut(), &mut *rng).await {
            warn!("Monitoring cycle failed: {:#}", e);
        }
        info!("Next update in {} minutes", interval);
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval * 60)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Monitoring stopped by user");
                return Ok(());
            }
        }
    }
}

async fn run_once(
    cfg: &Config,
    collector: &ObservationCollector,
    history: Option<&mut HistoryTracker>,
    rng: &mut (dyn RngCore + Send),
) -> Result<()> {
    let Some(observation) = collector.collect().await else {
        warn!("No observation available, skipping evaluation");
        return Ok(());
    };

    let hour = local_hour(&observation);
    process_observation(cfg, observation, history, rng, hour).await?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
