use crate::device_display::bar_chart::bar_chart_lines;
use crate::device_display::interface::{DeviceDisplay, LiveView};
use crate::duration_tracker::summary::TaskSummary;
use std::error::Error;

pub struct DeviceDisplayConsole {
    last_lines: Vec<String>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self { last_lines: vec![] }
    }

    fn render_box(&mut self, lines: Vec<String>) {
        // Ticks re-render the same view; only print when it changes.
        if lines == self.last_lines {
            return;
        }
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        println!("┌{}┐", "─".repeat(width + 2));
        for line in &lines {
            println!("│ {:<width$} │", line, width = width);
        }
        println!("└{}┘", "─".repeat(width + 2));
        self.last_lines = lines;
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_box(vec![
            "Commands: start (s), stop (x), quit (q)".to_string(),
        ]);
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_box(vec![message.to_string()]);
        Ok(())
    }

    fn show_live(&mut self, view: &LiveView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_box(view.to_display_lines());
        Ok(())
    }

    fn show_summary(&mut self, summary: &TaskSummary) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut lines = vec!["Task summary".to_string()];
        lines.extend(summary.to_display_lines());
        if !summary.entries.is_empty() {
            lines.push(String::new());
            lines.extend(bar_chart_lines(summary));
        }
        self.render_box(lines);
        Ok(())
    }
}
