use discord_commit_notify::config::Config;
use discord_commit_notify::logging::setup_logging;
use discord_commit_notify::run_notification;
use std::process::ExitCode;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    setup_logging();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_notification(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
