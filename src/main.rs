use dotenv::dotenv;
use tracing::{info, warn};

use villamar_backend::app::app::App;
use villamar_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("Starting Villa Mar backend");

    // Load environment variables from .env file
    match dotenv() {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
