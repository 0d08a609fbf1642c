use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fittrack_model::{diary::WeightEntry, user::User};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Serialize)]
struct StepsBody {
    date: NaiveDate,
    steps: i64,
}

#[derive(Debug, Serialize)]
struct WeightBody {
    weight: f64,
}

/// A stored weight entry together with the BMI recomputed from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeightUpdate {
    pub entry: WeightEntry,
    pub bmi: Option<f64>,
}

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn get_user(&self, uid: &str) -> Result<User>;
    async fn post_weight(&self, uid: &str, weight_kg: f64) -> Result<WeightUpdate>;
    async fn put_steps(&self, uid: &str, date: NaiveDate, steps: i64) -> Result<()>;
}

pub struct ClientImpl {
    url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

pub fn create(url: String) -> impl Client {
    ClientImpl::new(url)
}

#[async_trait]
impl Client for ClientImpl {
    async fn get_user(&self, uid: &str) -> Result<User> {
        self.client
            .get(format!("{}/users/{}", self.url, uid))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_client_error() {
                    Err(Error::RequestError)
                } else if resp.status().is_server_error() {
                    Err(Error::InternalServerError)
                } else {
                    Ok(resp)
                }
            })?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn post_weight(&self, uid: &str, weight_kg: f64) -> Result<WeightUpdate> {
        self.client
            .post(format!("{}/users/{}/weight", self.url, uid))
            .json(&WeightBody { weight: weight_kg })
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_client_error() {
                    Err(Error::RequestError)
                } else if resp.status().is_server_error() {
                    Err(Error::InternalServerError)
                } else {
                    Ok(resp)
                }
            })?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn put_steps(&self, uid: &str, date: NaiveDate, steps: i64) -> Result<()> {
        self.client
            .put(format!("{}/users/{}/stats/steps", self.url, uid))
            .json(&StepsBody { date, steps })
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_client_error() {
                    Err(Error::RequestError)
                } else if resp.status().is_server_error() {
                    Err(Error::InternalServerError)
                } else {
                    Ok(resp)
                }
            })?;
        Ok(())
    }
}
