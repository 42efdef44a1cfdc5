//! Infrastructure layer: storage, wire formats, clocks and the request log file.

pub mod clock;
pub mod dto;
pub mod repository;
pub mod request_log;
