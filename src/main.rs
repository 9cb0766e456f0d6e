use std::process::ExitCode;

use storefront::config::{load_config, print_schema};
use storefront::utils::logger::init_logging;
use storefront::Storefront;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::args().any(|arg| arg == "--schema") {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Failed to render config schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    let storefront = match Storefront::new(&config) {
        Ok(storefront) => storefront,
        Err(e) => {
            error!("Failed to build client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let restored = storefront.hydrate();
    info!(
        event_name = "startup.hydrated",
        event_domain = "startup",
        authenticated = restored.is_authenticated(),
        "persisted session restored"
    );

    let session = storefront.check_auth().await;
    info!(
        event_name = "startup.session",
        event_domain = "startup",
        phase = ?session.phase(),
        authenticated = session.is_authenticated(),
        is_admin = session.is_admin(),
        "session checked"
    );
    ExitCode::SUCCESS
}
