use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment gateway unreachable")]
    CommunicationError,
    #[error("payment gateway internal error")]
    InternalServerError,
    #[error("payment request rejected")]
    RequestError,
    #[error("incorrect payment gateway response")]
    ResponseError,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

#[derive(Debug, Serialize)]
struct IntentBody {
    amount: u32,
    currency: String,
}

/// Black-box payment-intent creation against the billing function that
/// fronts the card processor.
#[mockall::automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(
        &self,
        amount: u32,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

pub struct HttpPaymentGateway {
    url: String,
    client: reqwest::Client,
}

pub fn create(url: String) -> HttpPaymentGateway {
    HttpPaymentGateway {
        url,
        client: reqwest::Client::new(),
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(
        &self,
        amount: u32,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        self.client
            .post(&self.url)
            .json(&IntentBody {
                amount,
                currency: currency.to_owned(),
            })
            .send()
            .await
            .map_err(|_| PaymentError::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_client_error() {
                    Err(PaymentError::RequestError)
                } else if resp.status().is_server_error() {
                    Err(PaymentError::InternalServerError)
                } else {
                    Ok(resp)
                }
            })?
            .json()
            .await
            .map_err(|_| PaymentError::ResponseError)
    }
}
