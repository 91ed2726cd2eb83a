use crate::clock::interface::Clock;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_input::interface::DeviceInput;
use crate::library::logger::interface::Logger;
use crate::model_loader::interface::ModelLoader;
use crate::task::core::{init, transition, Effect, Event, State, Task};
use crate::task::render::Render;
use crate::task::run_effect::RunEffect;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

/// Owns the task state and is its only writer: events come in over a
/// channel, effects go out to worker threads.
pub struct TaskRunner {
    config: Config,
    clock: Arc<dyn Clock + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
    render: Render,
    run_effect: RunEffect,
    event_receiver: Receiver<Event>,
}

impl TaskRunner {
    pub fn new(
        config: Config,
        clock: Arc<dyn Clock + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        model_loader: Arc<dyn ModelLoader + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            device_camera,
            device_input,
            model_loader,
            event_sender,
        );

        Self {
            render: Render::new(device_display, config.clone()),
            run_effect,
            logger: logger.with_namespace("task"),
            config,
            clock,
            event_receiver,
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    pub fn run(&self) -> Result<Task, Box<dyn std::error::Error + Send + Sync>> {
        let (mut task, effects) = init();
        self.render.render(&task.state)?;
        self.spawn_effects(effects);

        loop {
            let event = self.event_receiver.recv()?;

            let is_tick = matches!(event, Event::Tick { .. });
            let is_polling = matches!(
                event,
                Event::Tick { .. } | Event::FrameCaptureDone { .. } | Event::FrameClassifyDone { .. }
            );
            if !is_polling {
                let _ = self
                    .logger
                    .info(&format!("event: {}", event.to_display_string()));
            }

            let skipped_before = ticks_skipped(&task.state);
            let (new_task, effects) = transition(&self.config, &self.clock, task, event);
            task = new_task;

            if is_tick && ticks_skipped(&task.state) > skipped_before {
                let _ = self
                    .logger
                    .warn("Tick skipped, previous classification still running");
            }

            self.render.render(&task.state)?;

            if let State::Exiting = task.state {
                // Run the shutdown effects here so they finish before we return.
                for effect in effects {
                    self.run_effect.run_effect(effect);
                }
                return Ok(task);
            }

            self.spawn_effects(effects);
        }
    }
}

fn ticks_skipped(state: &State) -> u64 {
    match state {
        State::Running { run, .. } => run.ticks_skipped,
        _ => 0,
    }
}
