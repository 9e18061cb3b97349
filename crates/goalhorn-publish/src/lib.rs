//! Post composition and publishing for Goalhorn.
//!
//! - [`compose`] turns highlights into post and reply text
//! - [`Channel`] is one publishing outlet (a social network, a webhook, ...)
//! - [`Output`] fans a single publish out over every registered channel and
//!   implements the [`Publisher`] trait the runtime depends on
//!
//! Channel failures never escape a publish: the failing channel is logged
//! and left out of the returned [`PublicationIds`](goalhorn_models::PublicationIds).

pub mod compose;
pub mod error;
pub mod output;
pub mod printer;
pub mod traits;
pub mod webhook;

pub use error::{PublishError, Result};
pub use output::Output;
pub use printer::Printer;
pub use traits::{Channel, Publisher};
pub use webhook::WebhookChannel;
