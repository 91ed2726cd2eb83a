use crate::device_input::interface::{Command, DeviceInput};
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

pub struct DeviceInputStdin {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceInputStdin {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input"),
        }
    }
}

impl DeviceInput for DeviceInputStdin {
    fn commands(&self) -> Receiver<Command> {
        let (tx, rx) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                match Command::parse(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => {
                        let _ = logger.warn(&format!(
                            "Unknown command {:?} (use start, stop or quit)",
                            line.trim()
                        ));
                    }
                }
            }
            // stdin closed
            let _ = tx.send(Command::Quit);
        });

        rx
    }
}
