use std::{error::Error, fs::File, io::BufReader, path::PathBuf};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use log::debug;
use serde::Deserialize;

/// One day's step total as exported by the phone's health bridge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepSample {
    pub date: NaiveDate,
    pub steps: i64,
}

#[mockall::automock]
#[async_trait]
pub trait StepSource: Send + Sync {
    /// Today's step count so far; 0 when nothing was recorded yet.
    async fn today_steps(&self) -> Result<i64, Box<dyn Error + Send + Sync>>;
}

/// Reads the JSON step-sample export the health bridge keeps refreshing.
pub struct HealthExportSource {
    path: PathBuf,
}

impl HealthExportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn steps_for_date(samples: &[StepSample], date: NaiveDate) -> i64 {
    samples
        .iter()
        .rev()
        .find(|sample| sample.date == date)
        .map(|sample| sample.steps)
        .unwrap_or(0)
}

#[async_trait]
impl StepSource for HealthExportSource {
    async fn today_steps(&self) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let file = File::open(&self.path)?;
        let samples: Vec<StepSample> = serde_json::from_reader(BufReader::new(file))?;
        let steps = steps_for_date(&samples, Local::now().date_naive());
        debug!("Export holds {} samples, {} steps today", samples.len(), steps);
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(date: &str, steps: i64) -> StepSample {
        StepSample {
            date: date.parse().unwrap(),
            steps,
        }
    }

    #[test]
    fn picks_the_latest_sample_for_the_day() {
        let samples = [
            sample("2025-04-09", 9500),
            sample("2025-04-10", 3100),
            sample("2025-04-10", 5200),
        ];

        let date = "2025-04-10".parse().unwrap();
        assert_eq!(steps_for_date(&samples, date), 5200);
    }

    #[test]
    fn missing_day_reads_as_zero() {
        let samples = [sample("2025-04-09", 9500)];

        let date = "2025-04-10".parse().unwrap();
        assert_eq!(steps_for_date(&samples, date), 0);
        assert_eq!(steps_for_date(&[], date), 0);
    }

    #[test]
    fn export_format_parses() {
        let payload = r#"[
            {"date": "2025-04-09", "steps": 9500},
            {"date": "2025-04-10", "steps": 3100}
        ]"#;

        let samples: Vec<StepSample> = serde_json::from_str(payload).unwrap();
        assert_eq!(samples, vec![sample("2025-04-09", 9500), sample("2025-04-10", 3100)]);
    }
}
