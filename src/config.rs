use chrono::Offset;
use crate::duration_tracker::core::{TrackerConfig, CONFIDENCE_THRESHOLD};
use crate::duration_tracker::summary::SummaryFilter;
use crate::model_loader::interface::ModelSource;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveViewMode {
    /// Show only the class credited on the latest tick.
    BestMatch,
    /// Show every class's probability from the latest tick.
    AllClasses,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub confidence_threshold: f32,
    pub summary_filter: SummaryFilter,
    pub track_confidence: bool,
    pub live_view: LiveViewMode,
    pub task_time_limit: Option<Duration>,
    pub logger_timezone: chrono::FixedOffset,
    pub model_source: ModelSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_secs(1),
            confidence_threshold: CONFIDENCE_THRESHOLD,
            summary_filter: SummaryFilter::All,
            track_confidence: true,
            live_view: LiveViewMode::BestMatch,
            task_time_limit: None,
            logger_timezone: utc(),
            model_source: ModelSource::Mock {
                labels: vec!["Sit".to_string(), "Stand".to_string(), "Lie".to_string()],
            },
        }
    }
}

impl Config {
    /// 100ms polling with every class's probability shown live and only
    /// meaningful classes in the summary.
    pub fn fast_polling() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            summary_filter: SummaryFilter::meaningful(),
            live_view: LiveViewMode::AllClasses,
            ..Self::default()
        }
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            tick_interval: self.tick_rate,
            confidence_threshold: self.confidence_threshold,
            summary_filter: self.summary_filter,
            track_confidence: self.track_confidence,
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
