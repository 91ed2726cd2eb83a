use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Command> {
        match input.trim().to_lowercase().as_str() {
            "start" | "s" => Some(Command::Start),
            "stop" | "x" => Some(Command::Stop),
            "quit" | "q" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Start/stop/quit requests from the user.
pub trait DeviceInput: Send + Sync {
    fn commands(&self) -> Receiver<Command>;
}
