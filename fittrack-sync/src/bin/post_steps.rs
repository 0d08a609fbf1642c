use std::{env, error::Error};

use chrono::Local;

use fittrack_client::Client;
use fittrack_sync::steps::{HealthExportSource, StepSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv::dotenv().ok();
    let api_url = env::var("FITTRACK_API_URL").expect("FITTRACK_API_URL must be set");
    let user_id = env::var("SYNC_USER_ID").expect("SYNC_USER_ID must be set");

    let source = HealthExportSource::new("steps.json");
    let steps = source.today_steps().await?;

    let client = fittrack_client::create(api_url);
    client
        .put_steps(&user_id, Local::now().date_naive(), steps)
        .await?;

    Ok(())
}
