use std::collections::BTreeMap;

use crate::behavior::domain::behavior_event::{BehaviorEvent, BehaviorKind};
use crate::events::domain::event_sink::SinkError;
use crate::tracking::domain::identity_lock::LockTransition;

/// Outcome of processing one frame.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub frame_index: usize,
    pub transition: Option<LockTransition>,
    pub events: Vec<BehaviorEvent>,
    /// Observations rejected as malformed.
    pub rejected: usize,
    /// Sink failures; the affected events are still in `events`.
    pub sink_errors: Vec<SinkError>,
    pub tracking_active: bool,
}

/// Running totals across every processed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub frames: usize,
    pub tracked_frames: usize,
    pub acquisitions: usize,
    pub releases: usize,
    pub rejected_observations: usize,
    pub sink_failures: usize,
    pub events: BTreeMap<BehaviorKind, usize>,
}

impl SessionStats {
    pub fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        if report.tracking_active {
            self.tracked_frames += 1;
        }
        match report.transition {
            Some(LockTransition::Acquired(_)) => self.acquisitions += 1,
            Some(LockTransition::Released) => self.releases += 1,
            None => {}
        }
        self.rejected_observations += report.rejected;
        self.sink_failures += report.sink_errors.len();
        for event in &report.events {
            *self.events.entry(event.kind).or_default() += 1;
        }
    }

    pub fn event_count(&self, kind: BehaviorKind) -> usize {
        self.events.get(&kind).copied().unwrap_or(0)
    }

    pub fn summary_string(&self) -> String {
        let mut lines = vec![format!(
            "Tracking summary ({} frames, {} tracked):",
            self.frames, self.tracked_frames
        )];
        lines.push(format!(
            "  lock: {} acquired, {} released",
            self.acquisitions, self.releases
        ));
        for kind in BehaviorKind::ALL {
            lines.push(format!("  {:18}: {}", kind.to_string(), self.event_count(*kind)));
        }
        if self.rejected_observations > 0 {
            lines.push(format!(
                "  rejected observations: {}",
                self.rejected_observations
            ));
        }
        if self.sink_failures > 0 {
            lines.push(format!("  unlogged events: {}", self.sink_failures));
        }
        lines.join("\n")
    }
}
