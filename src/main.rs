use args::Args;
use clock::impl_system::ClockSystem;
use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use device_input::impl_fake::DeviceInputFake;
use device_input::impl_stdin::DeviceInputStdin;
use device_input::interface::{Command, DeviceInput};
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use model_loader::impl_chain::ModelLoaderChain;
use model_loader::interface::ModelSource;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use task::runner::TaskRunner;

mod args;
mod clock;
mod config;
mod device_camera;
mod device_display;
mod device_input;
mod duration_tracker;
mod image_classifier;
mod library;
mod model_loader;
mod task;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse(std::env::args().skip(1))?;

    let mut config = if args.fast {
        Config::fast_polling()
    } else {
        Config::default()
    };
    config.task_time_limit = args.limit;
    if !args.model_files.is_empty() {
        config.model_source = ModelSource::Files {
            paths: args.model_files,
        };
    }

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));

    let device_input: Arc<dyn DeviceInput + Send + Sync> = if args.demo {
        Arc::new(DeviceInputFake::new(vec![
            (Duration::from_millis(500), Command::Start),
            (Duration::from_secs(10), Command::Stop),
            (Duration::from_secs(1), Command::Quit),
        ]))
    } else {
        Arc::new(DeviceInputStdin::new(logger.clone()))
    };

    let gui = args.gui.then(DeviceDisplayGui::new);
    let window = gui.as_ref().map(DeviceDisplayGui::window);
    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match gui {
        Some(gui) => Arc::new(Mutex::new(gui)),
        None => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
    };
    device_display
        .lock()
        .map_err(|e| e.to_string())?
        .init()?;

    let model_loader = Arc::new(ModelLoaderChain::standard(logger.clone()));

    let runner = TaskRunner::new(
        config,
        Arc::new(ClockSystem::new()),
        logger,
        device_camera,
        device_input,
        device_display,
        model_loader,
    );

    let Some(window) = window else {
        runner.run()?;
        return Ok(());
    };

    // The window owns the main thread, so the task runs beside it.
    let closer = window.clone();
    let task = std::thread::spawn(move || {
        let result = runner.run().map(|_| ());
        closer.finish();
        result
    });

    window.run()?;

    if task.is_finished() {
        task.join().map_err(|_| "task thread panicked")??;
    }
    Ok(())
}
