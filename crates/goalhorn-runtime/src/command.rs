//! Commands executed by the queue consumer.

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use goalhorn_models::Highlight;
use goalhorn_publish::compose::{compose_post, compose_reply};
use goalhorn_publish::Publisher;

use crate::diff::resolve_update;
use crate::registry::MonitorRegistry;

/// Command priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Cuts ahead of the first normal command in the queue.
    High,
    /// Appended in FIFO order.
    Normal,
}

/// What the consumer does after executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep draining the queue.
    Continue,
    /// Clear the queue and return from the run loop.
    Shutdown,
}

/// Everything a command needs when it executes.
#[derive(Clone)]
pub struct CommandContext {
    /// Where posts go.
    pub publisher: Arc<dyn Publisher>,
    /// Monitors of the current cycle.
    pub monitors: MonitorRegistry,
}

impl CommandContext {
    /// Creates a new execution context.
    pub fn new(publisher: Arc<dyn Publisher>, monitors: MonitorRegistry) -> Self {
        Self {
            publisher,
            monitors,
        }
    }
}

/// A unit of work for the queue consumer.
#[derive(Debug)]
pub enum Command {
    /// Log the state of every monitor still running.
    CheckGameStatus,
    /// Announce a highlight seen for the first time.
    PostHighlight(Box<Highlight>),
    /// Announce a correction to an announced highlight.
    PostReply {
        /// Value the original post was composed from.
        previous: Box<Highlight>,
        /// Corrected value.
        updated: Box<Highlight>,
    },
    /// Signal the health probe that the consumer is alive.
    CheckHealth(oneshot::Sender<()>),
    /// Stop the consumer.
    Shutdown,
}

impl Command {
    /// Creates a post command.
    pub fn post_highlight(highlight: Highlight) -> Self {
        Command::PostHighlight(Box::new(highlight))
    }

    /// Creates a reply command.
    pub fn post_reply(previous: Highlight, updated: Highlight) -> Self {
        Command::PostReply {
            previous: Box::new(previous),
            updated: Box::new(updated),
        }
    }

    /// Creates a health check and the receiver its execution signals.
    pub fn check_health() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Command::CheckHealth(tx), rx)
    }

    /// Human-readable command name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CheckGameStatus => "Check Game Status",
            Command::PostHighlight(_) => "Post Highlight",
            Command::PostReply { .. } => "Post Reply",
            Command::CheckHealth(_) => "Check Health",
            Command::Shutdown => "Shutdown",
        }
    }

    /// Queue priority. Only health checks are high priority.
    pub fn priority(&self) -> Priority {
        match self {
            Command::CheckHealth(_) => Priority::High,
            _ => Priority::Normal,
        }
    }

    /// Executes the command.
    ///
    /// Failures are logged here and never returned: one bad post must not
    /// stop the consumer.
    pub async fn execute(self, ctx: &CommandContext) -> Flow {
        match self {
            Command::CheckGameStatus => {
                for (game_id, state) in ctx.monitors.snapshot().await {
                    info!(game_id = %game_id, state = %state, "Monitor status");
                }
            }
            Command::PostHighlight(highlight) => post_highlight(ctx, &highlight).await,
            Command::PostReply { previous, updated } => {
                post_reply(ctx, &previous, &updated).await
            }
            Command::CheckHealth(tx) => {
                info!("Checking health of application");
                if tx.send(()).is_err() {
                    debug!("Health probe gave up before the check ran");
                }
            }
            Command::Shutdown => return Flow::Shutdown,
        }
        Flow::Continue
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

async fn post_highlight(ctx: &CommandContext, highlight: &Highlight) {
    let Some(text) = compose_post(highlight) else {
        error!(highlight_id = %highlight.id, "Could not compose post");
        return;
    };

    let video = highlight.video_url();
    let ids = ctx.publisher.publish(&text, Some(&video), None).await;
    if ids.is_empty() {
        warn!(highlight_id = %highlight.id, "Highlight was not published on any channel");
    }

    if !highlight.publications.record(ids) {
        warn!(highlight_id = %highlight.id, "Highlight already had publication ids");
    }
}

async fn post_reply(ctx: &CommandContext, previous: &Highlight, updated: &Highlight) {
    let Some(update) = resolve_update(&previous.event, &updated.event) else {
        debug!(highlight_id = %updated.id, "No announceable change");
        return;
    };

    let Some(parents) = updated.publications.get() else {
        warn!(highlight_id = %updated.id, "Original post missing, dropping reply");
        return;
    };
    if parents.is_empty() {
        warn!(highlight_id = %updated.id, "Original post failed on every channel, dropping reply");
        return;
    }

    let Some(text) = compose_reply(update, updated) else {
        warn!(highlight_id = %updated.id, "Could not compose reply");
        return;
    };

    let ids = ctx.publisher.publish(&text, None, Some(parents)).await;
    info!(
        highlight_id = %updated.id,
        update = ?update,
        channels = ids.len(),
        "Reply published"
    );
}
