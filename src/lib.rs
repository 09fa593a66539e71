//! Jobcast - runs named background jobs and streams their progress to the
//! browser as server-sent events.
//!
//! Hexagonal Architecture:
//! - domain/: Job output events
//! - ports/: Trait definitions (`Job`, `JobSink`, `DirectoryLister`)
//! - adapters/: Concrete jobs and the HTTP layer
//! - application/: Job registry and runner
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use adapters::http::app;
pub use adapters::jobs::standard_registry;
pub use config::ServerConfig;
