use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BehaviorKind {
    HeadMovedLeft,
    HeadMovedRight,
    EyeBlink,
    Smile,
}

impl BehaviorKind {
    pub const ALL: &[BehaviorKind] = &[
        BehaviorKind::HeadMovedLeft,
        BehaviorKind::HeadMovedRight,
        BehaviorKind::EyeBlink,
        BehaviorKind::Smile,
    ];
}

impl std::fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BehaviorKind::HeadMovedLeft => write!(f, "Head Moved Left"),
            BehaviorKind::HeadMovedRight => write!(f, "Head Moved Right"),
            BehaviorKind::EyeBlink => write!(f, "Eye Blink Detected"),
            BehaviorKind::Smile => write!(f, "Smile Detected"),
        }
    }
}

/// A detected behavior of the tracked person.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorEvent {
    pub kind: BehaviorKind,
    pub timestamp: DateTime<Local>,
    pub details: Option<String>,
}

impl BehaviorEvent {
    pub fn new(kind: BehaviorKind, timestamp: DateTime<Local>) -> Self {
        Self {
            kind,
            timestamp,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Action-log line: `HH:MM:SS | <kind> | <details>`.
    pub fn log_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.timestamp.format("%H:%M:%S"),
            self.kind,
            self.details.as_deref().unwrap_or("")
        )
    }
}
