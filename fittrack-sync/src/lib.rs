pub mod steps;

use std::{
    error::Error,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::Local;
use fittrack_client::Client;
use log::{debug, error, info};
use tokio::time;

use crate::steps::StepSource;

/// Polls the step source and pushes the day's count to the backend until
/// asked to stop. Per-iteration failures are logged and skipped.
pub struct Syncer {
    source: Box<dyn StepSource>,
    client: Box<dyn Client>,
    user_id: String,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl Syncer {
    pub fn new(
        source: Box<dyn StepSource>,
        client: Box<dyn Client>,
        user_id: String,
        interval: Duration,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            client,
            user_id,
            interval,
            running,
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error>> {
        info!("Starting step sync for user {}", self.user_id);
        while self.running.load(Ordering::Relaxed) {
            time::sleep(self.interval).await;

            let steps = match self.source.today_steps().await {
                Ok(steps) => steps,
                Err(e) => {
                    error!("Failed to read step count: {:?}", e);
                    continue;
                }
            };

            let today = Local::now().date_naive();
            if let Err(e) = self.client.put_steps(&self.user_id, today, steps).await {
                error!("Failed to push step count, skipping: {}", e);
                continue;
            }
            debug!("Pushed {} steps for {}", steps, today);
        }

        info!("Received stop signal, terminating...");
        Ok(())
    }
}
