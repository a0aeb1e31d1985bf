pub mod identity_lock;
pub mod tracking_overlay;
