pub mod behavior_classifier;
pub mod behavior_event;
