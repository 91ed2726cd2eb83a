use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_input::interface::DeviceInput;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::logger::interface::Logger;
use crate::model_loader::interface::{ModelInfo, ModelLoader};
use crate::task::core::{Effect, Event};
use std::sync::mpsc::Sender;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type Loaded = (ModelInfo, Arc<dyn ImageClassifier + Send + Sync>);

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    device_input: Arc<dyn DeviceInput + Send + Sync>,
    model_loader: Arc<dyn ModelLoader + Send + Sync>,
    // Loaded once and kept across runs.
    model: Arc<Mutex<Option<Loaded>>>,
    // Tick loops for runs up to and including this id stop.
    ticks_cancelled_through: Arc<AtomicU64>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        model_loader: Arc<dyn ModelLoader + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            device_camera,
            device_input,
            model_loader,
            model: Arc::new(Mutex::new(None)),
            ticks_cancelled_through: Arc::new(AtomicU64::new(0)),
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        if !matches!(
            effect,
            Effect::CaptureFrame { .. } | Effect::ClassifyFrame { .. }
        ) {
            let _ = self
                .logger
                .info(&format!("Running effect: {}", effect.to_display_string()));
        }

        match effect {
            Effect::SubscribeToCommands => {
                let commands = self.device_input.commands();
                while let Ok(command) = commands.recv() {
                    if self.event_sender.send(Event::Command(command)).is_err() {
                        break;
                    }
                }
            }
            Effect::LoadModel => {
                let loaded = self.load_model();
                let _ = self.event_sender.send(Event::ModelLoadDone(loaded));
            }
            Effect::StartCamera => {
                let started = self.device_camera.start();
                let _ = self.event_sender.send(Event::CameraStartDone(started));
            }
            Effect::StopCamera => {
                if let Err(e) = self.device_camera.stop() {
                    let _ = self.logger.error(&format!("Camera stop failed: {}", e));
                }
            }
            Effect::SubscribeTick { run_id } => self.tick_loop(run_id),
            Effect::CancelTick { run_id } => {
                self.ticks_cancelled_through
                    .fetch_max(run_id, Ordering::SeqCst);
            }
            Effect::CaptureFrame { run_id } => {
                let result = self.device_camera.capture_frame();
                if let Err(e) = &result {
                    let _ = self.logger.warn(&format!("Frame capture failed: {}", e));
                }
                let _ = self
                    .event_sender
                    .send(Event::FrameCaptureDone { run_id, result });
            }
            Effect::ClassifyFrame { run_id, frame } => {
                let result = self.classify(&frame);
                if let Err(e) = &result {
                    let _ = self.logger.warn(&format!("Classification failed: {}", e));
                }
                let _ = self
                    .event_sender
                    .send(Event::FrameClassifyDone { run_id, result });
            }
        }
    }

    fn load_model(&self) -> Result<ModelInfo, Box<dyn std::error::Error + Send + Sync>> {
        let mut model = self.model.lock().map_err(|e| e.to_string())?;

        if let Some((info, _)) = model.as_ref() {
            return Ok(info.clone());
        }

        let loaded = self.model_loader.load(&self.config.model_source)?;
        let info = loaded.info.clone();
        *model = Some((loaded.info, loaded.classifier));
        Ok(info)
    }

    fn classify(
        &self,
        frame: &[u8],
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let classifier = self
            .model
            .lock()
            .map_err(|e| e.to_string())?
            .as_ref()
            .map(|(_, classifier)| classifier.clone())
            .ok_or("No model loaded")?;
        classifier.classify(frame)
    }

    fn tick_loop(&self, run_id: u64) {
        loop {
            std::thread::sleep(self.config.tick_rate);
            if self.ticks_cancelled_through.load(Ordering::SeqCst) >= run_id {
                break;
            }
            if self.event_sender.send(Event::Tick { run_id }).is_err() {
                break;
            }
        }

        let _ = self
            .logger
            .info(&format!("Tick stopped for run {}", run_id));
    }
}
