use std::{
    env,
    error::Error,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use dotenv::dotenv;
use log::info;

use fittrack_sync::{steps::HealthExportSource, Syncer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv().ok();

    let api_url = env::var("FITTRACK_API_URL").expect("FITTRACK_API_URL must be set");
    let user_id = env::var("SYNC_USER_ID").expect("SYNC_USER_ID must be set");
    let export_path = env::var("STEP_EXPORT_PATH").expect("STEP_EXPORT_PATH must be set");
    let interval = env::var("SYNC_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60);

    info!("Syncing {} to {} every {}s", export_path, api_url, interval);
    let source = Box::new(HealthExportSource::new(export_path));
    let client = Box::new(fittrack_client::create(api_url));

    let running = Arc::new(AtomicBool::new(true));
    let syncer = Arc::new(Syncer::new(
        source,
        client,
        user_id,
        Duration::from_secs(interval),
        running.clone(),
    ));
    ctrlc::set_handler(move || running.store(false, Ordering::Relaxed))?;

    syncer.run().await
}
