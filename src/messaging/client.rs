use async_trait::async_trait;

use crate::service::models::{DeliveryResult, NotificationRequest};

#[async_trait]
pub trait MessagingClient {
    /// Delivers one notification. Failures are reported through the returned
    /// value, never as an error.
    async fn send(&self, request: &NotificationRequest) -> DeliveryResult;
}
