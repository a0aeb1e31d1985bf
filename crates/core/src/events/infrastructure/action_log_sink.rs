use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::behavior::domain::behavior_event::BehaviorEvent;
use crate::events::domain::event_sink::{EventSink, SinkError};

/// Writes events to `<identity>_actions_<YYYYMMDDHHMMSS>.txt` in a directory.
///
/// The file is created on `open` and kept for the life of the sink; every
/// line is flushed before `record` returns.
pub struct ActionLogSink {
    dir: PathBuf,
    file: Option<(PathBuf, File)>,
}

impl ActionLogSink {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            file: None,
        }
    }

    /// Path of the open log file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|(p, _)| p.as_path())
    }
}

/// `alice_actions_20240309090507.txt` for identity `Alice`.
pub fn log_file_name(identity: &str, opened_at: DateTime<Local>) -> String {
    format!(
        "{}_actions_{}.txt",
        identity.to_lowercase(),
        opened_at.format("%Y%m%d%H%M%S")
    )
}

impl EventSink for ActionLogSink {
    fn open(&mut self, identity: &str, opened_at: DateTime<Local>) -> Result<(), SinkError> {
        if self.file.is_some() {
            return Ok(());
        }

        let path = self.dir.join(log_file_name(identity, opened_at));
        fs::create_dir_all(&self.dir).map_err(|source| SinkError::Create {
            path: path.clone(),
            source,
        })?;
        let file = File::create(&path).map_err(|source| SinkError::Create {
            path: path.clone(),
            source,
        })?;

        log::info!("[ACTION LOG INITIALIZED] {}", path.display());
        self.file = Some((path, file));
        Ok(())
    }

    fn record(&mut self, event: &BehaviorEvent) -> Result<(), SinkError> {
        let Some((path, file)) = self.file.as_mut() else {
            return Err(SinkError::NotOpen);
        };
        writeln!(file, "{}", event.log_line())
            .and_then(|_| file.flush())
            .map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }
}
