//! Configuration loaded from the environment.

use crate::application::runner::MAX_CONCURRENT_JOBS;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Whether responses reach the client frame by frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamTransport {
    /// Each frame is flushed to the client as soon as it is written.
    #[default]
    Incremental,
    /// Something between us and the client holds the body back (e.g. a
    /// buffering proxy). Streaming requests are refused.
    Buffered,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stream transport `{0}`, expected `incremental` or `buffered`")]
pub struct UnknownTransport(String);

impl FromStr for StreamTransport {
    type Err = UnknownTransport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "incremental" => Ok(StreamTransport::Incremental),
            "buffered" => Ok(StreamTransport::Buffered),
            other => Err(UnknownTransport(other.to_string())),
        }
    }
}

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Jobs allowed to run at once before streams are refused with 503
    pub max_concurrent_jobs: usize,
    pub stream_transport: StreamTransport,
    /// Send an `event: done` frame when a job returns normally
    pub stream_done_event: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: String::from("127.0.0.1"),
            port: String::from("3000"),
            static_dir: String::from("static"),
            max_concurrent_jobs: MAX_CONCURRENT_JOBS,
            stream_transport: StreamTransport::Incremental,
            stream_done_event: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        Self {
            addr: env::var("ADDR").unwrap_or(defaults.addr),
            port: env::var("PORT").unwrap_or(defaults.port),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            max_concurrent_jobs: parse_var("MAX_CONCURRENT_JOBS", defaults.max_concurrent_jobs),
            stream_transport: parse_var("STREAM_TRANSPORT", defaults.stream_transport),
            stream_done_event: parse_var("STREAM_DONE_EVENT", defaults.stream_done_event),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(var = name, value = %raw, "Ignoring invalid value: {}", e);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_from_str() {
        assert_eq!("incremental".parse::<StreamTransport>(), Ok(StreamTransport::Incremental));
        assert_eq!("Buffered".parse::<StreamTransport>(), Ok(StreamTransport::Buffered));
        assert_eq!(
            "chunky".parse::<StreamTransport>(),
            Err(UnknownTransport("chunky".to_string()))
        );
    }

    #[test]
    fn test_parse_var_falls_back() {
        // Unique names keep these independent of other tests touching the environment.
        env::set_var("JOBCAST_TEST_LIMIT", "12");
        env::set_var("JOBCAST_TEST_BAD_LIMIT", "many");

        assert_eq!(parse_var("JOBCAST_TEST_LIMIT", 64usize), 12);
        assert_eq!(parse_var("JOBCAST_TEST_BAD_LIMIT", 64usize), 64);
        assert!(parse_var("JOBCAST_TEST_UNSET", true));
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.max_concurrent_jobs, 64);
        assert_eq!(config.stream_transport, StreamTransport::Incremental);
        assert!(!config.stream_done_event);
    }
}
