use std::error::Error;

use serde::Serialize;
use serde_json::{json, Value};

/// Notification as entered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub token: String,
    pub title: String,
    pub body: String,
}

/// Wire envelope accepted by the Expo push endpoint.
#[derive(Debug, Serialize)]
pub struct PushMessage<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
    sound: &'static str,
    priority: &'static str,
}

impl NotificationRequest {
    pub fn new(token: &str, title: &str, body: &str) -> NotificationRequest {
        NotificationRequest {
            token: token.to_owned(),
            title: title.to_owned(),
            body: body.to_owned(),
        }
    }

    pub fn message(&self) -> PushMessage<'_> {
        PushMessage {
            to: &self.token,
            title: &self.title,
            body: &self.body,
            sound: "default",
            priority: "high",
        }
    }
}

/// Outcome of one delivery call. The call itself never fails; transport and
/// decoding problems end up in `Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryResult {
    Response(Value),
    Failure(String),
}

impl DeliveryResult {
    pub fn failure<E: ToString>(err: E) -> DeliveryResult {
        let description = err.to_string();
        if description.is_empty() {
            DeliveryResult::Failure("unknown delivery error".to_owned())
        } else {
            DeliveryResult::Failure(description)
        }
    }

    /// Describes `err` together with every error in its `source()` chain,
    /// e.g. `error sending request: Connection refused`.
    pub fn from_error(err: &(dyn Error + 'static)) -> DeliveryResult {
        let mut description = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !text.is_empty() && !description.contains(&text) {
                description.push_str(": ");
                description.push_str(&text);
            }
            source = cause.source();
        }
        DeliveryResult::failure(description)
    }

    /// True when the service answered with `data.status == "ok"`.
    pub fn is_delivered(&self) -> bool {
        match self {
            DeliveryResult::Response(value) => {
                value
                    .get("data")
                    .and_then(|data| data.get("status"))
                    .and_then(Value::as_str)
                    == Some("ok")
            }
            DeliveryResult::Failure(_) => false,
        }
    }

    /// JSON shown to the user: the raw response, or `{"error": ...}`.
    pub fn to_json(&self) -> Value {
        match self {
            DeliveryResult::Response(value) => value.clone(),
            DeliveryResult::Failure(description) => json!({ "error": description }),
        }
    }
}
