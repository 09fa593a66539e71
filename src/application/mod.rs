//! Application layer - Job registry and runner, written against ports only.

pub mod registry;
pub mod runner;

pub use registry::JobRegistry;
pub use runner::{JobExecution, JobRunner, RunnerError};
