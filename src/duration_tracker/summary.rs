/// Which classes make it into a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryFilter {
    All,
    /// Only classes whose accumulated time reached `min_seconds`.
    MeaningfulOnly { min_seconds: f64 },
}

impl SummaryFilter {
    pub fn meaningful() -> Self {
        SummaryFilter::MeaningfulOnly { min_seconds: 0.8 }
    }

    pub fn keeps(&self, entry: &SnapshotEntry) -> bool {
        match self {
            SummaryFilter::All => true,
            SummaryFilter::MeaningfulOnly { min_seconds } => {
                entry.accumulated_seconds >= *min_seconds
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub class_name: String,
    pub accumulated_seconds: f64,
    /// Mean of `probability * 100` over credited ticks, when confidence is tracked.
    pub average_confidence: Option<f64>,
}

/// Archived result of one task run.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    pub entries: Vec<SnapshotEntry>,
    pub total_elapsed_seconds: f64,
    pub ticks_observed: u64,
    pub ticks_credited: u64,
    pub ticks_skipped: u64,
    pub ticks_failed: u64,
}

impl TaskSummary {
    pub fn to_display_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Total time: {:.1}s ({} ticks, {} credited, {} skipped, {} failed)",
            self.total_elapsed_seconds,
            self.ticks_observed,
            self.ticks_credited,
            self.ticks_skipped,
            self.ticks_failed,
        )];

        if self.entries.is_empty() {
            lines.push("No class met the confidence threshold".to_string());
            return lines;
        }

        for entry in &self.entries {
            let line = match entry.average_confidence {
                Some(average) => format!(
                    "{}: {:.1}s (avg {:.1}%)",
                    entry.class_name, entry.accumulated_seconds, average
                ),
                None => format!("{}: {:.1}s", entry.class_name, entry.accumulated_seconds),
            };
            lines.push(line);
        }

        lines
    }
}
