//! Ports - Trait definitions the application is written against.

pub mod job;
pub mod listing;
