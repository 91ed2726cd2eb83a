use crate::clock::interface::Clock;
use crate::config::{Config, LiveViewMode};
use crate::device_display::interface::{LiveReading, LiveView};
use crate::device_input::interface::Command;
use crate::duration_tracker::core::{ClassDurationTracker, ClassObservation, TickOutcome};
use crate::duration_tracker::summary::TaskSummary;
use crate::image_classifier::interface::Classification;
use crate::model_loader::interface::ModelInfo;
use std::sync::Arc;

/// One start-to-stop session.
#[derive(Debug, Clone)]
pub struct TaskRun {
    pub id: u64,
    pub tracker: ClassDurationTracker,
    pub last_reading: LiveReading,
    pub ticks_skipped: u64,
    pub ticks_failed: u64,
}

impl TaskRun {
    pub fn start(
        id: u64,
        config: &Config,
        clock: &Arc<dyn Clock + Send + Sync>,
        labels: &[String],
    ) -> Self {
        let mut tracker = ClassDurationTracker::new(config.tracker_config(), clock.clone());
        tracker.start();
        tracker.register_classes(labels);

        Self {
            id,
            tracker,
            last_reading: LiveReading::Waiting,
            ticks_skipped: 0,
            ticks_failed: 0,
        }
    }

    pub fn live_view(&self, config: &Config) -> LiveView {
        let elapsed_seconds = self.tracker.total_elapsed();
        LiveView {
            reading: self.last_reading.clone(),
            elapsed_seconds,
            remaining_seconds: config
                .task_time_limit
                .map(|limit| (limit.as_secs_f64() - elapsed_seconds).max(0.0)),
        }
    }

    fn observe(&mut self, config: &Config, classifications: &[Classification]) {
        let tick_index = self.tracker.next_tick_index();
        let observations: Vec<ClassObservation> = classifications
            .iter()
            .map(|c| ClassObservation {
                class_name: c.label.clone(),
                probability: c.confidence,
                tick_index,
            })
            .collect();

        let outcome = self.tracker.observe(&observations);

        self.last_reading = match config.live_view {
            LiveViewMode::AllClasses => LiveReading::Probabilities(
                classifications
                    .iter()
                    .map(|c| (c.label.clone(), c.confidence))
                    .collect(),
            ),
            LiveViewMode::BestMatch => match outcome {
                TickOutcome::Credited {
                    class_name,
                    probability,
                } => LiveReading::BestMatch {
                    class_name,
                    probability,
                },
                TickOutcome::NoClassMetThreshold => LiveReading::NoMatch,
            },
        };
    }

    fn time_is_up(&self, config: &Config) -> bool {
        match config.task_time_limit {
            Some(limit) => self.tracker.total_elapsed() >= limit.as_secs_f64(),
            None => false,
        }
    }

    fn finish(mut self) -> TaskSummary {
        self.tracker.stop();
        self.tracker.summarize(self.ticks_skipped, self.ticks_failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Capturing,
    Classifying,
}

#[derive(Debug, Clone)]
pub enum State {
    Idle {
        message: Option<String>,
    },
    Preparing {
        model: Option<ModelInfo>,
        camera_started: bool,
    },
    Running {
        run: TaskRun,
        phase: Phase,
    },
    Stopped {
        summary: TaskSummary,
    },
    Exiting,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub state: State,
    pub runs_started: u64,
}

#[derive(Debug)]
pub enum Event {
    Command(Command),
    Tick {
        run_id: u64,
    },
    ModelLoadDone(Result<ModelInfo, Box<dyn std::error::Error + Send + Sync>>),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    FrameCaptureDone {
        run_id: u64,
        result: Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>,
    },
    FrameClassifyDone {
        run_id: u64,
        result: Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::FrameCaptureDone {
                run_id,
                result: Ok(frame),
            } => format!(
                "FrameCaptureDone {{ run_id: {}, frame: {} bytes }}",
                run_id,
                frame.len()
            ),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToCommands,
    LoadModel,
    StartCamera,
    StopCamera,
    SubscribeTick { run_id: u64 },
    CancelTick { run_id: u64 },
    CaptureFrame { run_id: u64 },
    ClassifyFrame { run_id: u64, frame: Vec<u8> },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::ClassifyFrame { run_id, frame } => format!(
                "ClassifyFrame {{ run_id: {}, frame: {} bytes }}",
                run_id,
                frame.len()
            ),
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (Task, Vec<Effect>) {
    (
        Task {
            state: State::Idle { message: None },
            runs_started: 0,
        },
        vec![Effect::SubscribeToCommands],
    )
}

pub fn transition(
    config: &Config,
    clock: &Arc<dyn Clock + Send + Sync>,
    task: Task,
    event: Event,
) -> (Task, Vec<Effect>) {
    let runs_started = task.runs_started;
    let with = |state: State, effects: Vec<Effect>| {
        (
            Task {
                state,
                runs_started,
            },
            effects,
        )
    };

    match (task.state, event) {
        (_, Event::Command(Command::Quit)) => {
            with(
                State::Exiting,
                vec![
                    Effect::CancelTick {
                        run_id: runs_started,
                    },
                    Effect::StopCamera,
                ],
            )
        }

        // Starting
        (State::Idle { .. } | State::Stopped { .. }, Event::Command(Command::Start)) => (
            Task {
                state: State::Preparing {
                    model: None,
                    camera_started: false,
                },
                runs_started: runs_started + 1,
            },
            vec![Effect::LoadModel, Effect::StartCamera],
        ),
        (State::Preparing { camera_started, .. }, Event::ModelLoadDone(Ok(info))) => {
            prepared(config, clock, runs_started, Some(info), camera_started)
        }
        (State::Preparing { model, .. }, Event::CameraStartDone(Ok(()))) => {
            prepared(config, clock, runs_started, model, true)
        }
        (State::Preparing { .. }, Event::ModelLoadDone(Err(e))) => with(
            State::Idle {
                message: Some(format!("Error loading model: {}", e)),
            },
            vec![Effect::StopCamera],
        ),
        (State::Preparing { .. }, Event::CameraStartDone(Err(e))) => with(
            State::Idle {
                message: Some(format!("Could not access camera: {}", e)),
            },
            vec![Effect::StopCamera],
        ),
        (State::Preparing { .. }, Event::Command(Command::Stop)) => with(
            State::Idle {
                message: Some("Task cancelled".to_string()),
            },
            vec![Effect::StopCamera],
        ),

        // Polling loop
        (State::Running { run, phase }, Event::Tick { run_id }) if run_id == run.id => {
            if run.time_is_up(config) {
                return stop(runs_started, run);
            }
            match phase {
                Phase::Waiting => with(
                    State::Running {
                        run,
                        phase: Phase::Capturing,
                    },
                    vec![Effect::CaptureFrame { run_id }],
                ),
                // The previous tick is still in flight.
                Phase::Capturing | Phase::Classifying => {
                    let mut run = run;
                    run.ticks_skipped += 1;
                    with(State::Running { run, phase }, vec![])
                }
            }
        }
        (
            State::Running {
                run,
                phase: Phase::Capturing,
            },
            Event::FrameCaptureDone { run_id, result },
        ) if run_id == run.id => match result {
            Ok(frame) => with(
                State::Running {
                    run,
                    phase: Phase::Classifying,
                },
                vec![Effect::ClassifyFrame { run_id, frame }],
            ),
            Err(_) => {
                let mut run = run;
                run.ticks_failed += 1;
                with(
                    State::Running {
                        run,
                        phase: Phase::Waiting,
                    },
                    vec![],
                )
            }
        },
        (
            State::Running {
                mut run,
                phase: Phase::Classifying,
            },
            Event::FrameClassifyDone { run_id, result },
        ) if run_id == run.id => {
            match result {
                Ok(classifications) => run.observe(config, &classifications),
                // No observation this tick.
                Err(_) => run.ticks_failed += 1,
            }
            with(
                State::Running {
                    run,
                    phase: Phase::Waiting,
                },
                vec![],
            )
        }
        (State::Running { run, .. }, Event::Command(Command::Stop)) => stop(runs_started, run),

        // A camera that finished starting after the task was abandoned.
        (
            state @ (State::Idle { .. } | State::Stopped { .. }),
            Event::CameraStartDone(Ok(())),
        ) => with(state, vec![Effect::StopCamera]),

        // Default case
        (state, _) => with(state, vec![]),
    }
}

fn prepared(
    config: &Config,
    clock: &Arc<dyn Clock + Send + Sync>,
    runs_started: u64,
    model: Option<ModelInfo>,
    camera_started: bool,
) -> (Task, Vec<Effect>) {
    match model {
        Some(info) if camera_started => {
            let run = TaskRun::start(runs_started, config, clock, &info.labels);
            (
                Task {
                    state: State::Running {
                        run,
                        phase: Phase::Waiting,
                    },
                    runs_started,
                },
                vec![Effect::SubscribeTick {
                    run_id: runs_started,
                }],
            )
        }
        model => (
            Task {
                state: State::Preparing {
                    model,
                    camera_started,
                },
                runs_started,
            },
            vec![],
        ),
    }
}

fn stop(runs_started: u64, run: TaskRun) -> (Task, Vec<Effect>) {
    (
        Task {
            state: State::Stopped {
                summary: run.finish(),
            },
            runs_started,
        },
        vec![
            Effect::CancelTick {
                run_id: runs_started,
            },
            Effect::StopCamera,
        ],
    )
}
