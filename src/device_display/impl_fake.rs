use crate::device_display::interface::{DeviceDisplay, LiveView};
use crate::duration_tracker::summary::TaskSummary;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Message(String),
    Live(LiveView),
    Summary(TaskSummary),
}

/// Remembers everything it was asked to show.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    shown: Arc<Mutex<Vec<Shown>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn summaries(&self) -> Vec<TaskSummary> {
        self.shown()
            .into_iter()
            .filter_map(|shown| match shown {
                Shown::Summary(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }

    fn push(&self, shown: Shown) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.shown.lock().map_err(|e| e.to_string())?.push(shown);
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Message(message.to_string()))
    }

    fn show_live(&mut self, view: &LiveView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Live(view.clone()))
    }

    fn show_summary(&mut self, summary: &TaskSummary) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.push(Shown::Summary(summary.clone()))
    }
}
