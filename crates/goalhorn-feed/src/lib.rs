//! Upstream game data sources for Goalhorn.
//!
//! The monitoring runtime only sees the three collaborator traits defined
//! in [`source`]:
//! - `ScheduleSource` - today's games and their start times
//! - `SnapshotSource` - current scoring summary and static game data
//! - `RemoteStateSource` - coarse lifecycle state of a game
//!
//! [`NhlClient`] implements all three against the NHL web API. Transient
//! HTTP failures are retried inside the client with exponential backoff;
//! whatever still fails is logged and surfaced to callers as "no data".

pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod source;

pub use client::NhlClient;
pub use config::FeedConfig;
pub use error::{FeedError, Result};
pub use source::{RemoteStateSource, ScheduleSource, SnapshotSource};
