use chrono::{DateTime, Local};

use crate::behavior::domain::behavior_classifier::{BehaviorClassifier, BehaviorThresholds};
use crate::behavior::domain::behavior_event::BehaviorEvent;
use crate::events::domain::event_sink::EventSink;
use crate::recognition::domain::face_observation::{FaceObservation, RawFaceRecord};
use crate::recognition::domain::face_recognizer::FaceRecognizer;
use crate::shared::config::{ConfigError, TrackerConfig};
use crate::shared::region::BoundingBox;
use crate::tracking::domain::identity_lock::{IdentityLock, LockTransition};
use crate::tracking::domain::tracking_overlay::TrackingOverlay;

use super::frame_report::{FrameReport, SessionStats};

/// Drives the identity lock and behavior classifier one frame at a time.
///
/// Each frame contributes a single verdict to the lock: the best
/// observation of the locked identity, or a miss. Non-target faces in the
/// same frame never count against the lock. Frames must be fed in arrival
/// order; the lock's missing streak and the blink debounce both depend on it.
pub struct TrackIdentityUseCase {
    lock: IdentityLock,
    classifier: BehaviorClassifier,
    thresholds: BehaviorThresholds,
    sink: Box<dyn EventSink>,
    overlay: Box<dyn TrackingOverlay>,
    next_frame_index: usize,
    stats: SessionStats,
}

impl TrackIdentityUseCase {
    /// Fails if `config` does not validate; no frame can be processed with
    /// an invalid configuration.
    pub fn new(
        config: &TrackerConfig,
        sink: Box<dyn EventSink>,
        overlay: Box<dyn TrackingOverlay>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            lock: IdentityLock::new(
                &config.target_identity,
                config.confidence_threshold,
                config.max_missing_frames,
            ),
            classifier: BehaviorClassifier::new(),
            thresholds: config.behavior_thresholds(),
            sink,
            overlay,
            next_frame_index: 0,
            stats: SessionStats::default(),
        })
    }

    pub fn process_frame(&mut self, records: &[RawFaceRecord]) -> FrameReport {
        self.process_frame_at(records, Local::now())
    }

    /// Processes one frame's recognizer output, stamping events with `now`.
    pub fn process_frame_at(
        &mut self,
        records: &[RawFaceRecord],
        now: DateTime<Local>,
    ) -> FrameReport {
        let mut report = FrameReport {
            frame_index: self.next_frame_index,
            ..FrameReport::default()
        };
        self.next_frame_index += 1;

        let observations = validate_records(records, report.frame_index, &mut report.rejected);

        let was_active = self.lock.is_active();
        if !was_active {
            self.acquire(&observations, now, &mut report);
        }

        let matched = self
            .lock
            .locked_id()
            .and_then(|id| select_match(&observations, id, self.lock.last_region()));
        let still_active = self.lock.update(
            matched.and_then(|o| o.identity.as_deref()),
            matched.map(|o| o.region),
        );
        if was_active && !still_active {
            report.transition = Some(LockTransition::Released);
        }
        report.tracking_active = still_active;

        match matched.filter(|_| still_active) {
            Some(observation) => {
                self.classify(observation, now, &mut report);
                self.overlay.show(true, Some(&observation.region));
            }
            None => self.overlay.show(false, None),
        }

        self.stats.record(&report);
        report
    }

    /// Pulls frames from `recognizer` until it ends. A failed frame counts as
    /// a frame with no faces.
    pub fn run(
        &mut self,
        recognizer: &mut dyn FaceRecognizer,
        mut on_frame: impl FnMut(&FrameReport),
    ) -> &SessionStats {
        while let Some(result) = recognizer.next_frame() {
            let records = result.unwrap_or_else(|e| {
                log::warn!("Recognition failed for frame {}: {e}", self.next_frame_index);
                Vec::new()
            });
            let report = self.process_frame(&records);
            on_frame(&report);
        }
        &self.stats
    }

    pub fn lock(&self) -> &IdentityLock {
        &self.lock
    }

    pub fn classifier(&self) -> &BehaviorClassifier {
        &self.classifier
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    fn acquire(
        &mut self,
        observations: &[FaceObservation],
        now: DateTime<Local>,
        report: &mut FrameReport,
    ) {
        let target = self.lock.target_id().to_string();
        let Some(candidate) = observations
            .iter()
            .filter(|o| o.is_identity(&target))
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        else {
            return;
        };
        if !self
            .lock
            .try_acquire(&target, candidate.confidence, candidate.region)
        {
            return;
        }

        report.transition = Some(LockTransition::Acquired(target.clone()));
        self.classifier.reset();

        if !self.sink.is_open() {
            if let Err(e) = self.sink.open(&target, now) {
                log::warn!("Action log unavailable: {e}");
                report.sink_errors.push(e);
            }
        }
    }

    fn classify(
        &mut self,
        observation: &FaceObservation,
        now: DateTime<Local>,
        report: &mut FrameReport,
    ) {
        let kinds = self
            .classifier
            .classify(&observation.landmarks, &self.thresholds);
        for kind in kinds {
            log::info!("[ACTION] {kind}");
            let event =
                BehaviorEvent::new(kind, now).with_details(format!("frame {}", report.frame_index));
            if let Err(e) = self.sink.record(&event) {
                log::warn!("Event not logged: {e}");
                report.sink_errors.push(e);
            }
            report.events.push(event);
        }
    }
}

fn validate_records(
    records: &[RawFaceRecord],
    frame_index: usize,
    rejected: &mut usize,
) -> Vec<FaceObservation> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| match FaceObservation::try_from(raw) {
            Ok(observation) => Some(observation),
            Err(e) => {
                log::warn!("Frame {frame_index}: rejecting face {i}: {e}");
                *rejected += 1;
                None
            }
        })
        .collect()
}

/// Best observation of `locked_id`: most overlap with the last known region,
/// then highest confidence.
fn select_match<'a>(
    observations: &'a [FaceObservation],
    locked_id: &str,
    last_region: Option<BoundingBox>,
) -> Option<&'a FaceObservation> {
    let overlap = |o: &FaceObservation| last_region.map_or(0.0, |r| r.iou(&o.region));
    observations
        .iter()
        .filter(|o| o.is_identity(locked_id))
        .max_by(|a, b| {
            overlap(a)
                .total_cmp(&overlap(b))
                .then(a.confidence.total_cmp(&b.confidence))
        })
}
