//! HTTP surface of the Goalhorn process.
//!
//! - `GET /` shows the current day's log file
//! - `GET /api/health` pushes a health check through the running command
//!   queue and reports whether it was executed in time
//!
//! # Example
//!
//! ```ignore
//! use goalhorn_api::{serve, ApiConfig, AppState};
//!
//! let state = AppState::new(ApiConfig::default(), session.active_queue());
//! serve(state).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
