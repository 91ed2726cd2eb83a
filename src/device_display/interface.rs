use crate::duration_tracker::summary::TaskSummary;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum LiveReading {
    /// The class credited on the last tick.
    BestMatch { class_name: String, probability: f32 },
    /// No class met the confidence threshold on the last tick.
    NoMatch,
    /// Every class's probability from the last tick, in classifier order.
    Probabilities(Vec<(String, f32)>),
    /// Running, but no tick has been classified yet.
    Waiting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveView {
    pub reading: LiveReading,
    pub elapsed_seconds: f64,
    pub remaining_seconds: Option<f64>,
}

impl LiveView {
    pub fn to_display_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match &self.reading {
            LiveReading::BestMatch {
                class_name,
                probability,
            } => lines.push(format!(
                "Best match: {} ({:.0}%)",
                class_name,
                probability * 100.0
            )),
            LiveReading::NoMatch => lines.push("No class met the threshold".to_string()),
            LiveReading::Probabilities(probabilities) => {
                for (label, probability) in probabilities {
                    lines.push(format!("{}: {:.1}%", label, probability * 100.0));
                }
            }
            LiveReading::Waiting => lines.push("Analyzing...".to_string()),
        }

        match self.remaining_seconds {
            Some(remaining) => lines.push(format!(
                "Elapsed {:.0}s, {:.0}s left",
                self.elapsed_seconds, remaining
            )),
            None => lines.push(format!("Elapsed {:.0}s", self.elapsed_seconds)),
        }

        lines
    }
}

/// Where the live view and the end-of-task summary are shown.
pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_message(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_live(&mut self, view: &LiveView) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn show_summary(&mut self, summary: &TaskSummary) -> Result<(), Box<dyn Error + Send + Sync>>;
}
