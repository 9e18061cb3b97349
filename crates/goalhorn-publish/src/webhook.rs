//! Channel that forwards posts to an HTTP webhook as JSON.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use goalhorn_models::PostRef;

use crate::error::{PublishError, Result};
use crate::traits::Channel;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body sent to the webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Optional response body. Endpoints that echo an id get it recorded so
/// replies can thread under it.
#[derive(Debug, Deserialize)]
struct WebhookResponse {
    id: Option<serde_json::Value>,
}

/// Posts each message to a fixed URL.
pub struct WebhookChannel {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl WebhookChannel {
    /// Creates a webhook channel.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            name: name.into(),
            url: url.into(),
            client,
        })
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self, payload: WebhookPayload<'_>) -> Result<PostRef> {
        debug!(channel = %self.name, url = %self.url, "Sending webhook");
        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(post_ref_from_body(&body))
    }
}

/// Extracts the post id from a response body, generating one when the
/// endpoint does not return any.
fn post_ref_from_body(body: &str) -> PostRef {
    let id = serde_json::from_str::<WebhookResponse>(body)
        .ok()
        .and_then(|r| r.id)
        .and_then(|id| match id {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    PostRef::with_id(id)
}

#[async_trait]
impl Channel for WebhookChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn post(&self, text: &str, media: Option<&str>) -> Result<PostRef> {
        self.send(WebhookPayload {
            text,
            media,
            reply_to: None,
        })
        .await
    }

    async fn reply(&self, parent: &PostRef, text: &str, media: Option<&str>) -> Result<PostRef> {
        let parent_id = parent
            .id()
            .ok_or_else(|| PublishError::InvalidParent("missing id".to_string()))?;
        self.send(WebhookPayload {
            text,
            media,
            reply_to: Some(parent_id),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization() {
        let payload = WebhookPayload {
            text: "goal",
            media: None,
            reply_to: Some("42"),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["text"], "goal");
        assert_eq!(json["reply_to"], "42");
        assert!(json.get("media").is_none());
    }

    #[test]
    fn test_post_ref_from_body() {
        assert_eq!(post_ref_from_body(r#"{"id": "abc"}"#).id(), Some("abc"));
        assert_eq!(post_ref_from_body(r#"{"id": 17}"#).id(), Some("17"));
        // No id echoed back: a local one is generated.
        assert!(post_ref_from_body("").id().is_some());
    }

    #[tokio::test]
    async fn test_reply_requires_parent_id() {
        let channel = WebhookChannel::new("webhook-1", "http://127.0.0.1:9/hook").unwrap();
        let parent = PostRef::default().with_field("uri", "at://x");
        let result = channel.reply(&parent, "fix", None).await;
        assert!(matches!(result, Err(PublishError::InvalidParent(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let channel = WebhookChannel::new("webhook-1", "http://127.0.0.1:9/hook").unwrap();
        assert_eq!(channel.name(), "webhook-1");
        assert!(channel.post("goal", None).await.is_err());
    }
}
