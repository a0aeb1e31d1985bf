use chrono::{DateTime, Local};

use crate::behavior::domain::behavior_event::BehaviorEvent;
use crate::events::domain::event_sink::{EventSink, SinkError};

/// Keeps formatted action-log lines in memory.
///
/// For hosts that display the log themselves instead of writing a file.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    identity: Option<String>,
    opened_at: Option<DateTime<Local>>,
    lines: Vec<String>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn opened_at(&self) -> Option<DateTime<Local>> {
        self.opened_at
    }
}

impl EventSink for MemoryEventSink {
    fn open(&mut self, identity: &str, opened_at: DateTime<Local>) -> Result<(), SinkError> {
        if self.identity.is_none() {
            self.identity = Some(identity.to_string());
            self.opened_at = Some(opened_at);
        }
        Ok(())
    }

    fn record(&mut self, event: &BehaviorEvent) -> Result<(), SinkError> {
        if self.identity.is_none() {
            return Err(SinkError::NotOpen);
        }
        self.lines.push(event.log_line());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.identity.is_some()
    }
}
