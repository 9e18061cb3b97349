//! Fan-out of one publish over every registered channel.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use goalhorn_models::PublicationIds;

use crate::printer::Printer;
use crate::traits::{Channel, Publisher};

/// The set of channels posts go out on.
///
/// Channels are tried in registration order. A channel that fails is
/// logged and left out of the returned ids, so later replies skip it.
#[derive(Clone, Default)]
pub struct Output {
    channels: Vec<Arc<dyn Channel>>,
}

impl Output {
    /// Creates an output with no channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an output that only logs posts.
    pub fn dry_run() -> Self {
        let mut output = Self::new();
        output.register(Arc::new(Printer::new()));
        output
    }

    /// Registers a channel. A channel with the same name replaces the old one.
    pub fn register(&mut self, channel: Arc<dyn Channel>) {
        self.channels.retain(|c| c.name() != channel.name());
        self.channels.push(channel);
    }

    /// Names of the registered channels.
    pub fn list(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Returns the number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns true if no channels are registered.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[async_trait]
impl Publisher for Output {
    async fn publish(
        &self,
        text: &str,
        media: Option<&str>,
        parents: Option<&PublicationIds>,
    ) -> PublicationIds {
        let mut ids = PublicationIds::new();

        for channel in &self.channels {
            let name = channel.name();
            let result = match parents {
                Some(parents) => {
                    let Some(parent) = parents.get(name) else {
                        debug!(channel = %name, "No parent post on channel, skipping reply");
                        continue;
                    };
                    channel.reply(parent, text, media).await
                }
                None => channel.post(text, media).await,
            };

            match result {
                Ok(post) => {
                    info!(channel = %name, reply = parents.is_some(), "Published");
                    ids.insert(name, post);
                }
                Err(e) => {
                    warn!(channel = %name, error = %e, "Publish failed");
                }
            }
        }

        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PublishError, Result};
    use goalhorn_models::PostRef;
    use std::sync::Mutex;

    /// Channel that records calls and optionally fails.
    struct FakeChannel {
        name: String,
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeChannel {
        fn new(name: &str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                fail,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Channel for FakeChannel {
        fn name(&self) -> &str {
            &self.name
        }

        async fn post(&self, text: &str, _media: Option<&str>) -> Result<PostRef> {
            self.calls.lock().unwrap().push(format!("post:{}", text));
            if self.fail {
                return Err(PublishError::Status(500));
            }
            Ok(PostRef::with_id(format!("{}-1", self.name)))
        }

        async fn reply(&self, parent: &PostRef, text: &str, _media: Option<&str>) -> Result<PostRef> {
            let parent_id = parent.id().unwrap_or_default();
            self.calls
                .lock()
                .unwrap()
                .push(format!("reply:{}:{}", parent_id, text));
            if self.fail {
                return Err(PublishError::Status(500));
            }
            Ok(PostRef::with_id(format!("{}-2", self.name)))
        }
    }

    #[tokio::test]
    async fn test_publish_omits_failed_channel() {
        let good = FakeChannel::new("good", false);
        let bad = FakeChannel::new("bad", true);
        let mut output = Output::new();
        output.register(good.clone());
        output.register(bad.clone());

        let ids = output.publish("goal", None, None).await;
        assert_eq!(ids.len(), 1);
        assert_eq!(ids.get("good").and_then(PostRef::id), Some("good-1"));
        assert!(ids.get("bad").is_none());
        assert_eq!(bad.calls(), vec!["post:goal".to_string()]);
    }

    #[tokio::test]
    async fn test_reply_only_on_channels_with_parent() {
        let first = FakeChannel::new("first", false);
        let second = FakeChannel::new("second", false);
        let mut output = Output::new();
        output.register(first.clone());
        output.register(second.clone());

        let mut parents = PublicationIds::new();
        parents.insert("first", PostRef::with_id("p1"));

        let ids = output.publish("fix", None, Some(&parents)).await;
        assert_eq!(ids.channels().collect::<Vec<_>>(), vec!["first"]);
        assert_eq!(first.calls(), vec!["reply:p1:fix".to_string()]);
        assert!(second.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_uses_printer() {
        let output = Output::dry_run();
        assert_eq!(output.list(), vec!["printer"]);

        let ids = output.publish("goal", Some("https://video"), None).await;
        assert!(ids.get("printer").and_then(PostRef::id).is_some());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut output = Output::new();
        assert!(output.is_empty());
        output.register(FakeChannel::new("a", false));
        output.register(FakeChannel::new("a", true));
        assert_eq!(output.len(), 1);
    }
}
