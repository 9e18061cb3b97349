//! Game monitoring runtime for Goalhorn.
//!
//! One [`DaySession`] cycle per day:
//!
//! - an [`EventMonitor`] task per game polls the feed, diffs the snapshot
//!   against its [`HighlightStore`] and enqueues [`Command`]s
//! - a [`CompletionWatcher`] task stops the queue once every monitor is done
//! - the [`CommandQueue`] consumer executes commands one at a time, so
//!   publishing is serialized across all games

pub mod clock;
pub mod command;
pub mod config;
pub mod diff;
pub mod error;
pub mod monitor;
pub mod queue;
pub mod registry;
pub mod session;
pub mod store;
pub mod watcher;

pub use clock::{wait_until, Clock, OffsetClock, SystemClock};
pub use command::{Command, CommandContext, Flow, Priority};
pub use config::RuntimeConfig;
pub use diff::{diff_snapshot, resolve_update};
pub use error::{ResolveError, Result, RuntimeError};
pub use monitor::{EventMonitor, MonitorState};
pub use queue::{ActiveQueue, CommandQueue};
pub use registry::MonitorRegistry;
pub use session::{DaySession, Feeds};
pub use store::HighlightStore;
pub use watcher::CompletionWatcher;
