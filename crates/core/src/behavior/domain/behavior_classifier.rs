//! Per-frame behavior classification from 5-point landmarks.
//!
//! Thresholds are raw pixel distances, so sensitivity depends on how large
//! the face appears in the frame.

use crate::behavior::domain::behavior_event::BehaviorKind;
use crate::recognition::domain::face_landmarks::{FaceLandmarks, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorThresholds {
    /// Nose x travel between consecutive frames, in pixels.
    pub head_movement: f64,
    /// Mouth corner span, in pixels.
    pub smile_span: f64,
    /// Eye openness below this counts as closed.
    pub eye_closure: f64,
    /// Closed frames that must be exceeded before a reopening counts as a blink.
    pub blink_debounce_frames: u32,
}

/// Signal history for the tracked face. Holds one person's state only;
/// call [`BehaviorClassifier::reset`] when a new tracking session starts.
#[derive(Debug, Default)]
pub struct BehaviorClassifier {
    previous_nose_x: Option<f64>,
    eye_closed_streak: u32,
}

impl BehaviorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.previous_nose_x = None;
        self.eye_closed_streak = 0;
    }

    /// Runs head motion, eye closure and facial expression analyses, in that
    /// order, returning whatever fired.
    pub fn classify(
        &mut self,
        landmarks: &FaceLandmarks,
        thresholds: &BehaviorThresholds,
    ) -> Vec<BehaviorKind> {
        let head = self.analyze_head_motion(landmarks.nose().0, thresholds.head_movement);
        let blink = self.analyze_eye_closure(
            landmarks.left_eye(),
            landmarks.right_eye(),
            thresholds.eye_closure,
            thresholds.blink_debounce_frames,
        );
        let smile = Self::analyze_facial_expression(
            landmarks.mouth_left(),
            landmarks.mouth_right(),
            thresholds.smile_span,
        );
        [head, blink, smile].into_iter().flatten().collect()
    }

    /// Horizontal nose displacement since the previous call.
    ///
    /// The first call only records a baseline. The baseline is overwritten on
    /// every call, whether or not anything fires.
    pub fn analyze_head_motion(&mut self, nose_x: f64, threshold: f64) -> Option<BehaviorKind> {
        let detected = self.previous_nose_x.and_then(|prev| {
            let delta = nose_x - prev;
            if delta > threshold {
                Some(BehaviorKind::HeadMovedRight)
            } else if delta < -threshold {
                Some(BehaviorKind::HeadMovedLeft)
            } else {
                None
            }
        });
        self.previous_nose_x = Some(nose_x);
        detected
    }

    /// Trailing-edge blink detection on `|eye_a.y - eye_b.y|`.
    ///
    /// Closed frames accumulate; the blink fires on the first open frame
    /// after the streak exceeded `debounce_frames`. Any open frame clears
    /// the streak.
    pub fn analyze_eye_closure(
        &mut self,
        eye_a: Point,
        eye_b: Point,
        closure_threshold: f64,
        debounce_frames: u32,
    ) -> Option<BehaviorKind> {
        let openness = (eye_a.1 - eye_b.1).abs();

        if openness < closure_threshold {
            self.eye_closed_streak = self.eye_closed_streak.saturating_add(1);
            return None;
        }

        let closed_long_enough = self.eye_closed_streak > debounce_frames;
        self.eye_closed_streak = 0;
        closed_long_enough.then_some(BehaviorKind::EyeBlink)
    }

    /// Fires on every frame the mouth span exceeds the threshold; no debounce.
    pub fn analyze_facial_expression(
        mouth_left: Point,
        mouth_right: Point,
        expression_threshold: f64,
    ) -> Option<BehaviorKind> {
        let span = (mouth_right.0 - mouth_left.0).abs();
        (span > expression_threshold).then_some(BehaviorKind::Smile)
    }

    pub fn previous_nose_x(&self) -> Option<f64> {
        self.previous_nose_x
    }

    pub fn eye_closed_streak(&self) -> u32 {
        self.eye_closed_streak
    }
}
