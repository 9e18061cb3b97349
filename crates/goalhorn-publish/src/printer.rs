//! Dry-run channel that writes posts to the log instead of publishing them.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use goalhorn_models::PostRef;

use crate::error::Result;
use crate::traits::Channel;

/// Logs every post and hands back a random id.
#[derive(Debug, Clone, Default)]
pub struct Printer;

impl Printer {
    /// Creates a new printer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Channel for Printer {
    fn name(&self) -> &str {
        "printer"
    }

    async fn post(&self, text: &str, media: Option<&str>) -> Result<PostRef> {
        info!(media = ?media, "Post:\n{}", text);
        Ok(PostRef::with_id(Uuid::new_v4().to_string()))
    }

    async fn reply(&self, parent: &PostRef, text: &str, media: Option<&str>) -> Result<PostRef> {
        info!(
            parent = parent.id().unwrap_or_default(),
            media = ?media,
            "Reply:\n{}",
            text
        );
        Ok(PostRef::with_id(Uuid::new_v4().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_printer_returns_distinct_ids() {
        let printer = Printer::new();
        let first = printer.post("a", None).await.unwrap();
        let second = printer
            .reply(&first, "b", Some("https://video"))
            .await
            .unwrap();
        assert!(first.id().is_some());
        assert_ne!(first.id(), second.id());
    }
}
