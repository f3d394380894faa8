use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::types::Observation;

/// Append-only CSV log of observations.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, observation: &Observation) -> Result<()> {
        let needs_header = std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open history file {}", self.path.display()))?;
        let mut wtr = csv::WriterBuilder::new().has_headers(needs_header).from_writer(file);
        wtr.serialize(observation).context("Failed to write history record")?;
        wtr.flush().context("Failed to flush history file")?;
        info!("Observation saved to {}", self.path.display());
        Ok(())
    }

    /// All stored observations; a missing file is an empty history.
    pub fn load(&self) -> Result<Vec<Observation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open history file {}", self.path.display()))?;
        let mut records: Vec<Observation> = Vec::new();
        for row in rdr.deserialize() {
            records.push(row.context("Invalid history record")?);
        }
        info!("Loaded {} historical records", records.len());
        Ok(records)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStatistics {
    pub mean_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub mean_heat_index: Option<f64>,
    pub max_heat_index: Option<f64>,
    pub mean_humidity: Option<f64>,
    pub total_records: usize,
}

impl HistoryStatistics {
    /// Summary over `records`, skipping absent readings. `None` when empty.
    pub fn from_records(records: &[Observation]) -> Option<Self> {
        let mut running = RunningStatistics::default();
        for record in records {
            running.record(record);
        }
        running.snapshot()
    }
}

/// Incrementally maintained history summary, so a growing log never has to
/// be re-read to report on it.
#[derive(Debug, Clone, Default)]
pub struct RunningStatistics {
    temperature: Accumulator,
    heat_index: Accumulator,
    humidity: Accumulator,
    total_records: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
    max: Option<f64>,
    min: Option<f64>,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        let Some(v) = value else { return };
        self.sum += v;
        self.count += 1;
        self.max = Some(self.max.map_or(v, |m| m.max(v)));
        self.min = Some(self.min.map_or(v, |m| m.min(v)));
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl RunningStatistics {
    pub fn record(&mut self, observation: &Observation) {
        self.temperature.push(observation.temperature);
        self.heat_index.push(observation.heat_index);
        self.humidity.push(observation.humidity);
        self.total_records += 1;
    }

    pub fn snapshot(&self) -> Option<HistoryStatistics> {
        if self.total_records == 0 {
            return None;
        }
        Some(HistoryStatistics {
            mean_temp: self.temperature.mean(),
            max_temp: self.temperature.max,
            min_temp: self.temperature.min,
            mean_heat_index: self.heat_index.mean(),
            max_heat_index: self.heat_index.max,
            mean_humidity: self.humidity.mean(),
            total_records: self.total_records,
        })
    }
}

/// A `HistoryStore` plus its running summary. The file is read once, when
/// the tracker is opened.
pub struct HistoryTracker {
    store: HistoryStore,
    stats: RunningStatistics,
}

impl HistoryTracker {
    /// Open `store`, seeding statistics from what is already on disk. An
    /// unreadable history starts the summary empty instead of failing.
    pub fn open(store: HistoryStore) -> Self {
        let mut stats = RunningStatistics::default();
        match store.load() {
            Ok(records) => records.iter().for_each(|r| stats.record(r)),
            Err(e) => warn!("Could not read history {}: {:#}", store.path().display(), e),
        }
        Self { store, stats }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Append `observation`; the summary only counts rows that were written.
    pub fn record(&mut self, observation: &Observation) -> Result<()> {
        self.store.append(observation)?;
        self.stats.record(observation);
        Ok(())
    }

    pub fn statistics(&self) -> Option<HistoryStatistics> {
        self.stats.snapshot()
    }
}
