//! Per-session send guard.
//!
//! A session may deliver one notification. After the delivery service accepts
//! a message the guard flips to `Sent` and every further submit is blocked
//! until the user resets it. Anything short of an accepted message leaves the
//! guard `Ready`.

use crate::messaging::client::MessagingClient;
use crate::service::models::{DeliveryResult, NotificationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendGuard {
    Ready,
    Sent,
}

impl Default for SendGuard {
    fn default() -> Self {
        SendGuard::Ready
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The service reported `data.status == "ok"`.
    Delivered(DeliveryResult),
    /// Error envelope or any other response shape.
    Rejected(DeliveryResult),
    /// A notification was already sent in this session; nothing was called.
    Blocked,
}

impl Submission {
    pub fn result(&self) -> Option<&DeliveryResult> {
        match self {
            Submission::Delivered(result) | Submission::Rejected(result) => Some(result),
            Submission::Blocked => None,
        }
    }
}

impl SendGuard {
    pub fn is_sent(self) -> bool {
        self == SendGuard::Sent
    }

    pub async fn submit<C>(self, client: &C, request: &NotificationRequest) -> (SendGuard, Submission)
    where
        C: MessagingClient + Sync + ?Sized,
    {
        if self.is_sent() {
            debug!("Submit ignored, notification already sent");
            return (self, Submission::Blocked);
        }

        let result = client.send(request).await;
        if result.is_delivered() {
            info!("Notification accepted by delivery service");
            (SendGuard::Sent, Submission::Delivered(result))
        } else {
            (SendGuard::Ready, Submission::Rejected(result))
        }
    }

    pub fn reset(self) -> SendGuard {
        SendGuard::Ready
    }
}
