//! Log viewer handler.

use std::io::ErrorKind;

use axum::{extract::State, response::Html};

use crate::error::Result;
use crate::state::AppState;

/// GET / - The current log file, preformatted.
///
/// Returns an empty page when no log file is configured or it does not
/// exist yet.
pub async fn view_logs(State(state): State<AppState>) -> Result<Html<String>> {
    let Some(path) = state.config.log_path.as_ref() else {
        return Ok(Html(String::new()));
    };

    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Html(format!("<xmp>{}</xmp>", contents))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Html(String::new())),
        Err(e) => Err(e.into()),
    }
}
