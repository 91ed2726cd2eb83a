use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_input::impl_fake::DeviceInputFake;
use crate::library::logger::impl_fake::LoggerFake;
use crate::task::core::{Effect, Event};
use crate::task::run_effect::RunEffect;
use crate::task::tests::fixture::ModelLoaderSitting;

fn run_effect(model_loader: &ModelLoaderSitting) -> (RunEffect, Receiver<Event>) {
    let logger = LoggerFake::new();
    let config = Config {
        tick_rate: Duration::from_millis(10),
        ..Config::default()
    };
    let (event_sender, event_receiver) = channel();

    let run_effect = RunEffect::new(
        config,
        Arc::new(logger.clone()),
        Arc::new(DeviceCameraFake::new(Arc::new(logger)).without_delay()),
        Arc::new(DeviceInputFake::new(vec![])),
        Arc::new(model_loader.clone()),
        event_sender,
    );

    (run_effect, event_receiver)
}

#[test]
fn test_model_is_loaded_once() {
    let model_loader = ModelLoaderSitting::new();
    let (run_effect, events) = run_effect(&model_loader);

    run_effect.run_effect(Effect::LoadModel);
    run_effect.run_effect(Effect::LoadModel);

    assert_eq!(model_loader.loads(), 1);
    for _ in 0..2 {
        match events.try_recv() {
            Ok(Event::ModelLoadDone(Ok(info))) => assert_eq!(info.loader, "sitting"),
            other => panic!("expected a loaded model, got {:?}", other),
        }
    }
}

#[test]
fn test_failed_load_is_not_cached() {
    let model_loader = ModelLoaderSitting::failing_first(1);
    let (run_effect, events) = run_effect(&model_loader);

    run_effect.run_effect(Effect::LoadModel);
    assert!(matches!(events.try_recv(), Ok(Event::ModelLoadDone(Err(_)))));

    run_effect.run_effect(Effect::LoadModel);
    assert!(matches!(events.try_recv(), Ok(Event::ModelLoadDone(Ok(_)))));

    assert_eq!(model_loader.loads(), 2);
}

#[test]
fn test_classify_before_load_fails() {
    let (run_effect, events) = run_effect(&ModelLoaderSitting::new());

    run_effect.run_effect(Effect::ClassifyFrame {
        run_id: 1,
        frame: vec![0; 12],
    });

    match events.try_recv() {
        Ok(Event::FrameClassifyDone {
            run_id: 1,
            result: Err(e),
        }) => assert!(e.to_string().contains("No model loaded")),
        other => panic!("expected a classify failure, got {:?}", other),
    }
}

#[test]
fn test_cancel_before_subscribe_stops_tick() {
    let (run_effect, events) = run_effect(&ModelLoaderSitting::new());

    run_effect.run_effect(Effect::CancelTick { run_id: 2 });
    // Returns after one interval because the run is already cancelled.
    run_effect.run_effect(Effect::SubscribeTick { run_id: 2 });

    assert!(events.try_recv().is_err());

    let ticking = run_effect.clone();
    let handle = std::thread::spawn(move || ticking.run_effect(Effect::SubscribeTick { run_id: 3 }));

    match events.recv_timeout(Duration::from_secs(1)) {
        Ok(Event::Tick { run_id }) => assert_eq!(run_id, 3),
        other => panic!("expected a tick for run 3, got {:?}", other),
    }

    run_effect.run_effect(Effect::CancelTick { run_id: 3 });
    handle.join().unwrap();

    while let Ok(event) = events.try_recv() {
        assert!(matches!(event, Event::Tick { run_id: 3 }));
    }
}

#[test]
fn test_cancel_covers_earlier_runs() {
    let (run_effect, events) = run_effect(&ModelLoaderSitting::new());

    run_effect.run_effect(Effect::CancelTick { run_id: 5 });
    run_effect.run_effect(Effect::CancelTick { run_id: 3 });
    run_effect.run_effect(Effect::SubscribeTick { run_id: 4 });

    assert!(events.try_recv().is_err());
}
