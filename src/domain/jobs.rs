/// Diagnostic streamed when a request names a job that is not registered.
pub const UNKNOWN_JOB_MESSAGE: &str = "Invalid job selected.";

/// Diagnostic streamed when a job task ends by panicking.
pub const JOB_PANICKED_MESSAGE: &str = "Job terminated unexpectedly.";

/// One unit of output produced while a job runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// A line of progress text.
    Progress(String),
    /// A line describing a failure. The job stops after sending it.
    Error(String),
    /// The job returned normally.
    Done,
}

impl JobEvent {
    pub fn progress(text: impl Into<String>) -> Self {
        JobEvent::Progress(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        JobEvent::Error(text.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            JobEvent::Progress(_) => "progress",
            JobEvent::Error(_) => "error",
            JobEvent::Done => "done",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            JobEvent::Progress(text) | JobEvent::Error(text) => text,
            JobEvent::Done => "done",
        }
    }
}
