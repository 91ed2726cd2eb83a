use std::time::Instant;

/// Monotonic time source for task runs.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
