pub mod frame_report;
pub mod track_identity_use_case;
