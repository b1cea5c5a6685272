use bevy::prelude::*;
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keeps the non-blocking writer alive for the lifetime of the app.
#[derive(Resource)]
pub struct LogGuard(#[allow(dead_code)] WorkerGuard);

/// Sets up logging to a timestamped file under `logs/` plus stdout.
pub fn setup_logging(suffix: Option<String>) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let log_directory = Path::new("logs");
    if !log_directory.exists() {
        fs::create_dir_all(log_directory)?;
    }

    let suffix = suffix.unwrap_or_else(|| Local::now().format("%Y-%m-%d_%H-%M-%S").to_string());
    let log_file_path = log_directory.join(format!("game_run_{}.log", suffix));

    let file_appender = match std::fs::File::create(&log_file_path) {
        Ok(file) => file,
        Err(e) => {
            // Fall back to stderr if the file cannot be created.
            eprintln!("Failed to create log file {:?}: {}", log_file_path, e);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            let subscriber = tracing_subscriber::registry()
                .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
                .with(fmt::Layer::new().with_writer(non_blocking_writer));
            tracing::subscriber::set_global_default(subscriber)?;
            return Ok(guard);
        }
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".into()),
        )
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking_writer)
                .without_time()
                .with_ansi(false),
        )
        .with(fmt::Layer::new().with_writer(std::io::stdout));

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Logging initialized. Log file: {:?}", log_file_path);

    Ok(guard)
}

/// Installs file logging on native builds. The launcher must disable Bevy's
/// own `LogPlugin` so the subscriber here stays the global default.
pub struct NativeLogPlugin(pub Option<String>);

impl Plugin for NativeLogPlugin {
    fn build(&self, app: &mut App) {
        match setup_logging(self.0.clone()) {
            Ok(guard) => {
                app.insert_resource(LogGuard(guard));
            }
            Err(e) => eprintln!("Failed to initialize logging: {}", e),
        }
    }
}
