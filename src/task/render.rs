use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::task::core::State;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    config: Config,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>, config: Config) -> Self {
        Self {
            device_display,
            config,
        }
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self.device_display.lock().map_err(|e| e.to_string())?;

        match state {
            State::Idle { message: None } => {
                device_display.show_message("Type start to begin a task")?;
            }
            State::Idle {
                message: Some(message),
            } => {
                device_display.show_message(message)?;
            }
            State::Preparing { model, .. } => match model {
                Some(info) => {
                    let kind = match info.format {
                        Some(format) => format.to_string(),
                        None => info.loader.clone(),
                    };
                    device_display.show_message(&format!(
                        "Loaded {} ({} classes), opening camera...",
                        kind,
                        info.labels.len()
                    ))?
                }
                None => device_display.show_message("Loading model...")?,
            },
            State::Running { run, .. } => {
                device_display.show_live(&run.live_view(&self.config))?;
            }
            State::Stopped { summary } => {
                device_display.show_summary(summary)?;
            }
            State::Exiting => {
                device_display.show_message("Exiting")?;
            }
        }

        Ok(())
    }
}
