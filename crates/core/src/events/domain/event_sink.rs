use std::path::PathBuf;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::behavior::domain::behavior_event::BehaviorEvent;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to create action log {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write action log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("action log is not open")]
    NotOpen,
}

/// Append-only destination for behavior events.
///
/// `open` is called once, when the target is first acquired; later calls on
/// an open sink are no-ops. Each `record` must be durable before it returns
/// so log order always matches event order.
pub trait EventSink: Send {
    fn open(&mut self, identity: &str, opened_at: DateTime<Local>) -> Result<(), SinkError>;

    fn record(&mut self, event: &BehaviorEvent) -> Result<(), SinkError>;

    fn is_open(&self) -> bool;
}
