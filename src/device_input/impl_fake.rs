use crate::device_input::interface::{Command, DeviceInput};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Replays a fixed script of commands, each after its delay.
pub struct DeviceInputFake {
    script: Vec<(Duration, Command)>,
}

impl DeviceInputFake {
    pub fn new(script: Vec<(Duration, Command)>) -> Self {
        Self { script }
    }
}

impl DeviceInput for DeviceInputFake {
    fn commands(&self) -> Receiver<Command> {
        let (tx, rx) = channel();
        let script = self.script.clone();

        std::thread::spawn(move || {
            for (delay, command) in script {
                std::thread::sleep(delay);
                if tx.send(command).is_err() {
                    break;
                }
            }
        });

        rx
    }
}
