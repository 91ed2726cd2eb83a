use crate::device_display::interface::{DeviceDisplay, LiveView};
use crate::duration_tracker::summary::TaskSummary;
use eframe::egui;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
enum Content {
    #[default]
    Empty,
    Message(String),
    Live(LiveView),
    Summary(TaskSummary),
}

/// The egui window. winit only builds its event loop on the main thread,
/// so `run` must be called from there while the task runs elsewhere.
#[derive(Clone)]
pub struct SummaryWindow {
    content: Arc<Mutex<Content>>,
    finished: Arc<AtomicBool>,
}

impl SummaryWindow {
    /// Blocks until the window is closed by the user or by `finish`.
    pub fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 320.0])
                .with_resizable(true),
            ..Default::default()
        };

        eframe::run_native("Pose Timer", options, Box::new(|_cc| Box::new(self)))
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Closes the window on its next frame.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    fn summary_ui(ui: &mut egui::Ui, summary: &TaskSummary) {
        ui.heading("Task summary");
        if let Some(totals) = summary.to_display_lines().first() {
            ui.label(totals.as_str());
        }
        ui.add_space(10.0);

        let longest = summary
            .entries
            .iter()
            .map(|e| e.accumulated_seconds)
            .fold(0.0, f64::max);

        egui::Grid::new("summary_chart")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for entry in &summary.entries {
                    ui.label(entry.class_name.as_str());
                    let fraction = if longest > 0.0 {
                        (entry.accumulated_seconds / longest) as f32
                    } else {
                        0.0
                    };
                    let text = match entry.average_confidence {
                        Some(average) => {
                            format!("{:.1}s (avg {:.1}%)", entry.accumulated_seconds, average)
                        }
                        None => format!("{:.1}s", entry.accumulated_seconds),
                    };
                    ui.add(
                        egui::ProgressBar::new(fraction)
                            .desired_width(260.0)
                            .text(text),
                    );
                    ui.end_row();
                }
            });

        if summary.entries.is_empty() {
            ui.label("No class met the confidence threshold");
        }
    }
}

impl eframe::App for SummaryWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.finished.load(Ordering::SeqCst) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let content = match self.content.lock() {
            Ok(content) => content.clone(),
            Err(_) => return,
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                match &content {
                    Content::Empty => {}
                    Content::Message(message) => {
                        ui.label(egui::RichText::new(message).size(18.0));
                    }
                    Content::Live(view) => {
                        for line in view.to_display_lines() {
                            ui.label(egui::RichText::new(line).monospace().size(18.0));
                        }
                    }
                    Content::Summary(summary) => Self::summary_ui(ui, summary),
                }
            });
        });

        // The task loop updates content from another thread.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct DeviceDisplayGui {
    window: SummaryWindow,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            window: SummaryWindow {
                content: Arc::new(Mutex::new(Content::Empty)),
                finished: Arc::new(AtomicBool::new(false)),
            },
        }
    }

    /// A handle to the window that shows whatever this display is given.
    pub fn window(&self) -> SummaryWindow {
        self.window.clone()
    }

    fn set(&mut self, content: Content) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.window.content.lock().map_err(|e| e.to_string())? = content;
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.set(Content::Empty)
    }

    fn show_message(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.set(Content::Message(message.to_string()))
    }

    fn show_live(&mut self, view: &LiveView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.set(Content::Live(view.clone()))
    }

    fn show_summary(&mut self, summary: &TaskSummary) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.set(Content::Summary(summary.clone()))
    }
}
