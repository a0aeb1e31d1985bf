use crate::recognition::domain::face_observation::RawFaceRecord;

/// Source of per-frame recognition results.
///
/// Capture and model inference live behind this trait; the tracker only
/// consumes the face records. Frames are yielded in arrival order.
pub trait FaceRecognizer: Send {
    /// Returns the next frame's faces, or `None` when the stream has ended.
    ///
    /// An `Err` means recognition failed for that frame; callers treat it as
    /// a frame with no faces.
    fn next_frame(&mut self) -> Option<Result<Vec<RawFaceRecord>, Box<dyn std::error::Error>>>;
}
