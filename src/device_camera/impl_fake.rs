use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A camera that produces blank RGB frames of the given size.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: usize,
    height: usize,
    startup_delay: Duration,
    available: bool,
    started: AtomicBool,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width: 640,
            height: 480,
            startup_delay: Duration::from_millis(200),
            available: true,
            started: AtomicBool::new(false),
        }
    }

    /// Instant startup, for tests.
    #[cfg(test)]
    pub fn without_delay(mut self) -> Self {
        self.startup_delay = Duration::ZERO;
        self
    }

    /// Simulates a camera the user refused permission for.
    #[cfg(test)]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        std::thread::sleep(self.startup_delay);
        if !self.available {
            return Err("permission denied".into());
        }
        self.started.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.started.store(false, Ordering::SeqCst);
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.started.load(Ordering::SeqCst) {
            return Err("Camera is not started".into());
        }
        Ok(vec![0; self.width * self.height * 3])
    }
}
