//! Publishing traits.

use async_trait::async_trait;

use goalhorn_models::{PostRef, PublicationIds};

use crate::error::Result;

/// A single publishing outlet.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel name, used as the key in [`PublicationIds`].
    fn name(&self) -> &str;

    /// Publishes a new post.
    async fn post(&self, text: &str, media: Option<&str>) -> Result<PostRef>;

    /// Publishes a reply to an earlier post on this channel.
    async fn reply(&self, parent: &PostRef, text: &str, media: Option<&str>) -> Result<PostRef>;
}

/// The publishing collaborator used by the runtime's commands.
///
/// A publish is best effort: channels that fail are omitted from the
/// result and nothing is retried.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publishes `text` (with optional media). When `parents` is given the
    /// text is posted as a reply, and only on channels that have a parent.
    async fn publish(
        &self,
        text: &str,
        media: Option<&str>,
        parents: Option<&PublicationIds>,
    ) -> PublicationIds;
}
