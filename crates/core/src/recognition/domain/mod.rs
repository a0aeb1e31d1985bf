pub mod face_landmarks;
pub mod face_observation;
pub mod face_recognizer;
