pub const DEFAULT_TARGET_IDENTITY: &str = "User_01";

/// Similarity a recognition must strictly exceed to acquire the lock.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.65;

/// Consecutive missed frames tolerated before the lock is released
/// (~1 second at 25 fps).
pub const DEFAULT_MAX_MISSING_FRAMES: u32 = 25;

/// Horizontal nose travel between frames, in pixels.
pub const DEFAULT_HEAD_MOVEMENT_THRESHOLD: f64 = 10.0;

/// Mouth corner span, in pixels.
pub const DEFAULT_SMILE_THRESHOLD: f64 = 45.0;

/// Eye openness below this counts as a closed frame.
pub const DEFAULT_BLINK_THRESHOLD: f64 = 2.8;

/// A blink is reported once the closed-frame streak exceeds this count.
pub const DEFAULT_BLINK_DEBOUNCE_FRAMES: u32 = 2;

pub const CONFIG_DIR_NAME: &str = "FaceTrack";
pub const CONFIG_FILE_NAME: &str = "config.json";
