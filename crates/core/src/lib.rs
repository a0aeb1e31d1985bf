//! Identity-locked behavior tracking over per-frame face recognition results.
//!
//! A host loop feeds each frame's recognizer output to
//! [`pipeline::track_identity_use_case::TrackIdentityUseCase`], which locks
//! onto the configured target, classifies that person's head, eye and mouth
//! behavior while the lock holds, and appends the resulting events to an
//! [`events::domain::event_sink::EventSink`].

pub mod behavior;
pub mod events;
pub mod pipeline;
pub mod recognition;
pub mod shared;
pub mod tracking;
