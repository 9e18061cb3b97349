//! Tracing setup: stdout plus the log file behind the log viewer.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count.
pub fn filter_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,goalhorn=info",
        1 => "warn,goalhorn=debug",
        2 => "info,goalhorn=trace",
        _ => "trace",
    }
}

/// Append-mode log file that can be emptied while the process runs.
#[derive(Clone)]
pub struct LogFile {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl LogFile {
    /// Opens (creating if needed) the log file and its directory.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empties the file. Later writes start at the beginning.
    pub fn truncate(&self) -> io::Result<()> {
        let file = self.file.lock().map_err(lock_error)?;
        file.set_len(0)
    }
}

fn lock_error<T>(e: std::sync::PoisonError<T>) -> io::Error {
    io::Error::other(e.to_string())
}

/// Writer handed to the fmt layer for each event.
pub struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.lock().map_err(lock_error)?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.lock().map_err(lock_error)?.flush()
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str, log_file: LogFile) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_target(false).with_ansi(false).with_writer(log_file))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for_verbosity(0), "warn,goalhorn=info");
        assert_eq!(filter_for_verbosity(1), "warn,goalhorn=debug");
        assert_eq!(filter_for_verbosity(5), "trace");
    }

    #[test]
    fn test_log_file_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("goalhorn.log");
        let log = LogFile::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(log.path(), path.as_path());
    }

    #[test]
    fn test_truncate_restarts_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goalhorn.log");
        let log = LogFile::open(&path).unwrap();

        let mut writer = log.make_writer();
        writer.write_all(b"yesterday\n").unwrap();
        log.truncate().unwrap();
        writer.write_all(b"today\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "today\n");
    }
}
