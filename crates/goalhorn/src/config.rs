//! Locations of Goalhorn's on-disk state.
//!
//! ```text
//! ~/.goalhorn/
//! └── logs/
//!     └── goalhorn.log   # current day's log, shown by the log viewer
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "GOALHORN_STATE_DIR";

/// Environment variable with comma-separated webhook URLs.
pub const WEBHOOK_URL_ENV: &str = "GOALHORN_WEBHOOK_URL";

const DEFAULT_STATE_DIR: &str = ".goalhorn";
const LOGS_SUBDIR: &str = "logs";
const LOG_FILE_NAME: &str = "goalhorn.log";

/// Default state directory: `~/.goalhorn`, or `.goalhorn` in the current
/// directory when there is no home directory.
pub fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

/// Log directory under a state directory.
pub fn logs_dir(state_dir: &Path) -> PathBuf {
    state_dir.join(LOGS_SUBDIR)
}

/// Log file under a state directory.
pub fn log_path(state_dir: &Path) -> PathBuf {
    logs_dir(state_dir).join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_layout() {
        let state = PathBuf::from("/var/lib/goalhorn");
        assert_eq!(logs_dir(&state), PathBuf::from("/var/lib/goalhorn/logs"));
        assert_eq!(
            log_path(&state),
            PathBuf::from("/var/lib/goalhorn/logs/goalhorn.log")
        );
    }

    #[test]
    fn test_default_state_dir_name() {
        assert!(default_state_dir().ends_with(".goalhorn"));
    }
}
