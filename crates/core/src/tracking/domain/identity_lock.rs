//! Identity lock: decides whether the configured target is being followed.
//!
//! State transitions:
//! - Idle → Locked: target observed with confidence strictly above threshold
//! - Locked → Locked: locked identity observed (missing streak resets)
//! - Locked → Locked: miss while streak <= max (missing streak grows)
//! - Locked → Idle: miss pushes streak past max
//!
//! The locked identity is fixed at acquisition; a different person never
//! takes over the lock, whatever their confidence.

use crate::recognition::domain::face_observation::PersonId;
use crate::shared::region::BoundingBox;

#[derive(Clone, Debug, PartialEq)]
pub enum LockState {
    Idle,
    Locked {
        id: PersonId,
        missing_streak: u32,
        last_region: BoundingBox,
    },
}

/// Edge caused by a frame, reported to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LockTransition {
    Acquired(PersonId),
    Released,
}

impl std::fmt::Display for LockTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockTransition::Acquired(id) => write!(f, "ACQUIRED {id}"),
            LockTransition::Released => write!(f, "RELEASED"),
        }
    }
}

#[derive(Debug)]
pub struct IdentityLock {
    target_id: PersonId,
    confidence_threshold: f64,
    max_missing_streak: u32,
    state: LockState,
}

impl IdentityLock {
    pub fn new(target_id: &str, confidence_threshold: f64, max_missing_streak: u32) -> Self {
        Self {
            target_id: target_id.to_string(),
            confidence_threshold,
            max_missing_streak,
            state: LockState::Idle,
        }
    }

    /// Starts tracking if idle and `observed_id` is the target seen with
    /// confidence strictly above the threshold. Returns whether the lock was
    /// acquired by this call; has no effect while already locked.
    pub fn try_acquire(&mut self, observed_id: &str, confidence: f64, region: BoundingBox) -> bool {
        if self.is_active() {
            return false;
        }
        let confident = confidence > self.confidence_threshold;
        if observed_id != self.target_id || !confident {
            return false;
        }

        self.state = LockState::Locked {
            id: observed_id.to_string(),
            missing_streak: 0,
            last_region: region,
        };
        log::info!("[TRACKING STARTED] {observed_id} (confidence {confidence:.2})");
        true
    }

    /// Feeds one frame's verdict: the identity seen for the tracked face, or
    /// `None` when nothing matched. Returns whether the lock is still held.
    ///
    /// `region` is only used when `observed_id` matches the locked identity.
    pub fn update(&mut self, observed_id: Option<&str>, region: Option<BoundingBox>) -> bool {
        let max_missing = self.max_missing_streak;
        let LockState::Locked {
            id,
            missing_streak,
            last_region,
        } = &mut self.state
        else {
            return false;
        };

        if observed_id == Some(id.as_str()) {
            if let Some(region) = region {
                *last_region = region;
            }
            *missing_streak = 0;
        } else {
            *missing_streak += 1;
        }

        if *missing_streak > max_missing {
            log::info!("[TRACKING ENDED] {id} lost after {missing_streak} missed frames");
            self.state = LockState::Idle;
            return false;
        }

        true
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, LockState::Locked { .. })
    }

    pub fn locked_id(&self) -> Option<&str> {
        match &self.state {
            LockState::Locked { id, .. } => Some(id),
            LockState::Idle => None,
        }
    }

    /// Consecutive missed frames; always 0 while idle.
    pub fn missing_streak(&self) -> u32 {
        match self.state {
            LockState::Locked { missing_streak, .. } => missing_streak,
            LockState::Idle => 0,
        }
    }

    pub fn last_region(&self) -> Option<BoundingBox> {
        match self.state {
            LockState::Locked { last_region, .. } => Some(last_region),
            LockState::Idle => None,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn state(&self) -> &LockState {
        &self.state
    }
}
