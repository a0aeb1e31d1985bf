use crate::shared::region::BoundingBox;

/// Receives the per-frame tracking signal for on-screen rendering.
///
/// Called once per processed frame. Rendering is advisory: nothing in the
/// tracker depends on what the overlay does with the signal.
pub trait TrackingOverlay: Send {
    fn show(&mut self, active: bool, region: Option<&BoundingBox>);
}

/// Overlay that discards every signal. Used by headless hosts and tests.
pub struct NullOverlay;

impl TrackingOverlay for NullOverlay {
    fn show(&mut self, _active: bool, _region: Option<&BoundingBox>) {}
}

/// Overlay that reports the signal through the `log` facade at debug level.
pub struct LogOverlay {
    was_active: bool,
}

impl LogOverlay {
    pub fn new() -> Self {
        Self { was_active: false }
    }
}

impl Default for LogOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingOverlay for LogOverlay {
    fn show(&mut self, active: bool, region: Option<&BoundingBox>) {
        match (active, region) {
            (true, Some(r)) => log::debug!("TRACKING ACTIVE {r}"),
            (true, None) => log::debug!("TRACKING ACTIVE"),
            (false, _) if self.was_active => log::debug!("TRACKING PAUSED"),
            (false, _) => {}
        }
        self.was_active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_overlay_is_noop() {
        let mut overlay = NullOverlay;
        overlay.show(true, Some(&BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
        overlay.show(false, None);
    }

    #[test]
    fn test_log_overlay_remembers_last_signal() {
        let mut overlay = LogOverlay::new();
        overlay.show(true, Some(&BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
        assert!(overlay.was_active);
        overlay.show(false, None);
        assert!(!overlay.was_active);
    }
}
