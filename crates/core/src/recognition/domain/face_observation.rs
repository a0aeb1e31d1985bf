use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recognition::domain::face_landmarks::{FaceLandmarks, Point, LANDMARK_COUNT};
use crate::shared::region::BoundingBox;

/// Identity label produced by the recognizer (an enrolled person's name).
pub type PersonId = String;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("expected 5 landmarks, got {0}")]
    LandmarkCount(usize),
    #[error("landmark {0} is not an (x, y) pair")]
    LandmarkShape(usize),
    #[error("similarity must be between 0.0 and 1.0, got {0}")]
    ConfidenceOutOfRange(f64),
    #[error("{0} contains a non-finite coordinate")]
    NonFiniteCoordinate(&'static str),
    #[error("bounding box corners are inverted")]
    InvalidBoundingBox,
}

/// One face as reported by the recognition collaborator, before validation.
///
/// Wire shape: `{ name, similarity, bbox: [x1, y1, x2, y2], landmarks:
/// [[x, y]; 5] }`. Every field is optional here so that a malformed face can
/// be rejected on its own without failing the rest of its frame. A missing or
/// null `name` means the face was detected but not recognized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFaceRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
    #[serde(default)]
    pub landmarks: Option<Vec<Vec<f64>>>,
}

/// A validated face observation for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceObservation {
    pub identity: Option<PersonId>,
    pub confidence: f64,
    pub region: BoundingBox,
    pub landmarks: FaceLandmarks,
}

impl FaceObservation {
    pub fn new(
        identity: Option<&str>,
        confidence: f64,
        region: BoundingBox,
        landmarks: FaceLandmarks,
    ) -> Self {
        Self {
            identity: identity.map(str::to_string),
            confidence,
            region,
            landmarks,
        }
    }

    pub fn is_identity(&self, id: &str) -> bool {
        self.identity.as_deref() == Some(id)
    }
}

impl TryFrom<&RawFaceRecord> for FaceObservation {
    type Error = ObservationError;

    fn try_from(raw: &RawFaceRecord) -> Result<Self, Self::Error> {
        let confidence = raw
            .similarity
            .ok_or(ObservationError::MissingField("similarity"))?;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ObservationError::ConfidenceOutOfRange(confidence));
        }

        let [x1, y1, x2, y2] = raw.bbox.ok_or(ObservationError::MissingField("bbox"))?;
        let region = BoundingBox::new(x1, y1, x2, y2);
        if !region.is_valid() {
            if [x1, y1, x2, y2].iter().any(|v| !v.is_finite()) {
                return Err(ObservationError::NonFiniteCoordinate("bbox"));
            }
            return Err(ObservationError::InvalidBoundingBox);
        }

        let raw_points = raw
            .landmarks
            .as_ref()
            .ok_or(ObservationError::MissingField("landmarks"))?;
        let landmarks = parse_landmarks(raw_points)?;

        Ok(Self {
            identity: raw.name.clone(),
            confidence,
            region,
            landmarks,
        })
    }
}

fn parse_landmarks(raw: &[Vec<f64>]) -> Result<FaceLandmarks, ObservationError> {
    if raw.len() != LANDMARK_COUNT {
        return Err(ObservationError::LandmarkCount(raw.len()));
    }
    let mut points: [Point; LANDMARK_COUNT] = [(0.0, 0.0); LANDMARK_COUNT];
    for (i, coords) in raw.iter().enumerate() {
        let &[x, y] = coords.as_slice() else {
            return Err(ObservationError::LandmarkShape(i));
        };
        points[i] = (x, y);
    }
    let landmarks = FaceLandmarks::new(points);
    if !landmarks.is_finite() {
        return Err(ObservationError::NonFiniteCoordinate("landmarks"));
    }
    Ok(landmarks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn valid_record() -> RawFaceRecord {
        RawFaceRecord {
            name: Some("Alice".into()),
            similarity: Some(0.8),
            bbox: Some([100.0, 80.0, 220.0, 240.0]),
            landmarks: Some(vec![
                vec![140.0, 140.0],
                vec![180.0, 140.0],
                vec![160.0, 170.0],
                vec![145.0, 200.0],
                vec![175.0, 200.0],
            ]),
        }
    }

    #[test]
    fn test_valid_record_converts() {
        let obs = FaceObservation::try_from(&valid_record()).unwrap();
        assert_eq!(obs.identity.as_deref(), Some("Alice"));
        assert_relative_eq!(obs.confidence, 0.8);
        assert_eq!(obs.region, BoundingBox::new(100.0, 80.0, 220.0, 240.0));
        assert_eq!(obs.landmarks.nose(), (160.0, 170.0));
    }

    #[test]
    fn test_missing_name_is_unidentified_face() {
        let raw = RawFaceRecord {
            name: None,
            ..valid_record()
        };
        let obs = FaceObservation::try_from(&raw).unwrap();
        assert!(obs.identity.is_none());
        assert!(!obs.is_identity("Alice"));
    }

    #[test]
    fn test_is_identity_is_exact() {
        let obs = FaceObservation::new(
            Some("Alice"),
            0.9,
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            FaceLandmarks::new([(1.0, 1.0); 5]),
        );
        assert!(obs.is_identity("Alice"));
        assert!(!obs.is_identity("alice"));
        assert!(!obs.is_identity("Bob"));
    }

    #[test]
    fn test_missing_similarity() {
        let raw = RawFaceRecord {
            similarity: None,
            ..valid_record()
        };
        assert_eq!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::MissingField("similarity"))
        );
    }

    #[test]
    fn test_missing_bbox() {
        let raw = RawFaceRecord {
            bbox: None,
            ..valid_record()
        };
        assert_eq!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::MissingField("bbox"))
        );
    }

    #[test]
    fn test_missing_landmarks() {
        let raw = RawFaceRecord {
            landmarks: None,
            ..valid_record()
        };
        assert_eq!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::MissingField("landmarks"))
        );
    }

    #[rstest]
    #[case::negative(-0.01)]
    #[case::above_one(1.5)]
    #[case::nan(f64::NAN)]
    fn test_confidence_out_of_range(#[case] similarity: f64) {
        let raw = RawFaceRecord {
            similarity: Some(similarity),
            ..valid_record()
        };
        assert!(matches!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::ConfidenceOutOfRange(_))
        ));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::one(1.0)]
    fn test_confidence_bounds_accepted(#[case] similarity: f64) {
        let raw = RawFaceRecord {
            similarity: Some(similarity),
            ..valid_record()
        };
        assert!(FaceObservation::try_from(&raw).is_ok());
    }

    #[rstest]
    #[case::four(4)]
    #[case::six(6)]
    #[case::none(0)]
    fn test_wrong_landmark_count(#[case] count: usize) {
        let raw = RawFaceRecord {
            landmarks: Some(vec![vec![1.0, 1.0]; count]),
            ..valid_record()
        };
        assert_eq!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::LandmarkCount(count))
        );
    }

    #[test]
    fn test_landmark_with_three_coordinates() {
        let mut raw = valid_record();
        raw.landmarks.as_mut().unwrap()[3] = vec![1.0, 2.0, 3.0];
        assert_eq!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::LandmarkShape(3))
        );
    }

    #[test]
    fn test_non_finite_landmark() {
        let mut raw = valid_record();
        raw.landmarks.as_mut().unwrap()[0] = vec![f64::NAN, 2.0];
        assert_eq!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::NonFiniteCoordinate("landmarks"))
        );
    }

    #[test]
    fn test_inverted_bbox() {
        let raw = RawFaceRecord {
            bbox: Some([220.0, 80.0, 100.0, 240.0]),
            ..valid_record()
        };
        assert_eq!(
            FaceObservation::try_from(&raw),
            Err(ObservationError::InvalidBoundingBox)
        );
    }

    #[test]
    fn test_deserialize_integer_coordinates() {
        let json = r#"{
            "name": "Alice",
            "similarity": 0.91,
            "bbox": [10, 20, 110, 140],
            "landmarks": [[40, 60], [80, 60], [60, 85], [45, 110], [75, 110]]
        }"#;
        let raw: RawFaceRecord = serde_json::from_str(json).unwrap();
        let obs = FaceObservation::try_from(&raw).unwrap();
        assert_eq!(obs.landmarks.mouth_right(), (75.0, 110.0));
        assert_eq!(obs.region.x2, 110.0);
    }

    #[test]
    fn test_deserialize_missing_fields_as_none() {
        let raw: RawFaceRecord = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert!(raw.similarity.is_none());
        assert!(raw.bbox.is_none());
        assert!(raw.landmarks.is_none());
    }
}
