use std::error::Error;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::client::MessagingClient;
use crate::service::models::{DeliveryResult, NotificationRequest};

pub const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

pub struct ExpoPushClient {
    endpoint: String,
    client: reqwest::Client,
}

#[async_trait]
impl MessagingClient for ExpoPushClient {
    async fn send(&self, request: &NotificationRequest) -> DeliveryResult {
        info!("Sending Expo push notification");
        debug!("Expo push token: {}", request.token);
        match self.post(request).await {
            Ok(response) => {
                debug!("Expo push response: {}", response);
                DeliveryResult::Response(response)
            }
            Err(e) => {
                let result = DeliveryResult::from_error(&*e);
                if let DeliveryResult::Failure(description) = &result {
                    warn!("Expo push send failed: {}", description);
                }
                result
            }
        }
    }
}

impl ExpoPushClient {
    pub fn new() -> ExpoPushClient {
        ExpoPushClient::with_endpoint(EXPO_PUSH_URL)
    }

    pub fn with_endpoint(endpoint: &str) -> ExpoPushClient {
        ExpoPushClient {
            endpoint: endpoint.to_owned(),
            client: reqwest::Client::new(),
        }
    }

    // The status code is not inspected: whatever JSON comes back is the answer.
    async fn post(&self, request: &NotificationRequest) -> Result<Value, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&request.message())
            .send()
            .await?;
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_failure() {
        let client = ExpoPushClient::with_endpoint("http://127.0.0.1:1/--/api/v2/push/send");
        let request = NotificationRequest::new("abc", "Hi", "there");

        match client.send(&request).await {
            DeliveryResult::Failure(description) => {
                assert!(description.to_lowercase().contains("refused"), "{}", description)
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_endpoint_yields_failure() {
        let client = ExpoPushClient::with_endpoint("not a url");
        let request = NotificationRequest::new("abc", "Hi", "there");

        let result = client.send(&request).await;
        assert!(result.to_json()["error"].is_string());
        assert!(!result.is_delivered());
    }
}
