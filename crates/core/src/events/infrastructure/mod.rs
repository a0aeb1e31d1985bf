pub mod action_log_sink;
pub mod memory_event_sink;
