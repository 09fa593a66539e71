//! Domain layer - Job output events.

pub mod jobs;
