use std::process::ExitCode;

use movie_service::{app, telemetry, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = telemetry::init_tracing() {
        eprintln!("failed to initialise tracing: {}", err);
    }

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match app::run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "movie service failed");
            ExitCode::FAILURE
        }
    }
}
