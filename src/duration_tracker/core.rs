use crate::clock::interface::Clock;
use crate::duration_tracker::summary::{SnapshotEntry, SummaryFilter, TaskSummary};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const CONFIDENCE_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassObservation {
    pub class_name: String,
    pub probability: f32,
    pub tick_index: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDurationRecord {
    pub accumulated: Duration,
    pub sum_confidence: f64,
    pub sample_count: u64,
}

impl ClassDurationRecord {
    pub fn average_confidence(&self) -> Option<f64> {
        if self.sample_count == 0 {
            None
        } else {
            Some(self.sum_confidence / self.sample_count as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Credited { class_name: String, probability: f32 },
    NoClassMetThreshold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub tick_interval: Duration,
    pub confidence_threshold: f32,
    pub summary_filter: SummaryFilter,
    pub track_confidence: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            confidence_threshold: CONFIDENCE_THRESHOLD,
            summary_filter: SummaryFilter::All,
            track_confidence: true,
        }
    }
}

/// Accumulates, per class, how long it was the top prediction at or above
/// the confidence threshold.
#[derive(Clone)]
pub struct ClassDurationTracker {
    config: TrackerConfig,
    clock: Arc<dyn Clock + Send + Sync>,
    // Insertion order is the tie-break for equal durations in snapshots.
    records: Vec<(String, ClassDurationRecord)>,
    index: HashMap<String, usize>,
    tick_count: u64,
    ticks_credited: u64,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl std::fmt::Debug for ClassDurationTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassDurationTracker")
            .field("records", &self.records)
            .field("tick_count", &self.tick_count)
            .field("running", &self.is_running())
            .finish()
    }
}

impl ClassDurationTracker {
    pub fn new(config: TrackerConfig, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            config,
            clock,
            records: Vec::new(),
            index: HashMap::new(),
            tick_count: 0,
            ticks_credited: 0,
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.index.clear();
        self.tick_count = 0;
        self.ticks_credited = 0;
        self.started_at = None;
        self.stopped_at = None;
    }

    pub fn start(&mut self) {
        self.reset();
        self.started_at = Some(self.clock.now());
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            self.stopped_at = Some(self.clock.now());
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Registers the model's class list at zero duration, keeping label order.
    pub fn register_classes(&mut self, labels: &[String]) {
        for label in labels {
            self.record_mut(label);
        }
    }

    pub fn next_tick_index(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn observe(&mut self, observations: &[ClassObservation]) -> TickOutcome {
        self.tick_count += 1;

        let threshold = self.config.confidence_threshold;
        let mut winner: Option<&ClassObservation> = None;
        for observation in observations {
            if observation.probability.is_nan() || observation.probability < threshold {
                continue;
            }
            match winner {
                Some(best) if observation.probability <= best.probability => {}
                _ => winner = Some(observation),
            }
        }

        let Some(winner) = winner else {
            return TickOutcome::NoClassMetThreshold;
        };
        let class_name = winner.class_name.clone();
        let probability = winner.probability;

        let tick_interval = self.config.tick_interval;
        let track_confidence = self.config.track_confidence;
        let record = self.record_mut(&class_name);
        record.accumulated += tick_interval;
        if track_confidence {
            record.sum_confidence += f64::from(probability) * 100.0;
            record.sample_count += 1;
        }
        self.ticks_credited += 1;

        TickOutcome::Credited {
            class_name,
            probability,
        }
    }

    #[cfg(test)]
    pub fn record(&self, class_name: &str) -> Option<&ClassDurationRecord> {
        self.index
            .get(class_name)
            .map(|&position| &self.records[position].1)
    }

    /// Classes by accumulated time, longest first, after the summary filter.
    pub fn snapshot(&self) -> Vec<SnapshotEntry> {
        let mut entries: Vec<SnapshotEntry> = self
            .records
            .iter()
            .map(|(class_name, record)| SnapshotEntry {
                class_name: class_name.clone(),
                accumulated_seconds: record.accumulated.as_secs_f64(),
                average_confidence: record.average_confidence(),
            })
            .collect();

        // sort_by is stable, so equal durations keep insertion order
        entries.sort_by(|a, b| b.accumulated_seconds.total_cmp(&a.accumulated_seconds));
        entries.retain(|entry| self.config.summary_filter.keeps(entry));
        entries
    }

    pub fn total_elapsed(&self) -> f64 {
        match self.started_at {
            Some(started_at) => {
                let end = self.stopped_at.unwrap_or_else(|| self.clock.now());
                end.saturating_duration_since(started_at).as_secs_f64()
            }
            None => 0.0,
        }
    }

    pub fn summarize(&self, ticks_skipped: u64, ticks_failed: u64) -> TaskSummary {
        TaskSummary {
            entries: self.snapshot(),
            total_elapsed_seconds: self.total_elapsed(),
            ticks_observed: self.tick_count(),
            ticks_credited: self.ticks_credited,
            ticks_skipped,
            ticks_failed,
        }
    }

    fn record_mut(&mut self, class_name: &str) -> &mut ClassDurationRecord {
        let position = match self.index.get(class_name) {
            Some(&position) => position,
            None => {
                self.records
                    .push((class_name.to_string(), ClassDurationRecord::default()));
                let position = self.records.len() - 1;
                self.index.insert(class_name.to_string(), position);
                position
            }
        };
        &mut self.records[position].1
    }
}
