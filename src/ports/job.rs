use crate::domain::jobs::JobEvent;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// The stream a job writes to has been closed or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("job output stream closed")]
pub struct SinkClosed;

/// A named unit of background work that reports progress through a [`JobSink`].
///
/// Implementations must turn their own failures into [`JobSink::error`] calls
/// and return normally; nothing is propagated across the task boundary.
#[async_trait]
pub trait Job: Send + Sync {
    /// Identifier used in `?job=` query strings. Unique within a registry.
    fn name(&self) -> &'static str;

    /// Human readable title for the job picker.
    fn label(&self) -> &'static str;

    /// Extra form markup the job needs, if any.
    fn fields(&self) -> Option<&'static str> {
        None
    }

    async fn run(&self, parameter: Option<&str>, sink: &JobSink);
}

/// Send-only end of a job's output channel.
///
/// Every send and pause also watches the execution's cancellation token, so a
/// job writing to a stream nobody reads anymore returns instead of blocking.
pub struct JobSink {
    job: String,
    tx: mpsc::Sender<JobEvent>,
    cancel: CancellationToken,
}

impl JobSink {
    /// Create a sink and the receiving end of its channel.
    pub fn channel(
        job: impl Into<String>,
        capacity: usize,
        cancel: CancellationToken,
    ) -> (Self, mpsc::Receiver<JobEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let sink = Self {
            job: job.into(),
            tx,
            cancel,
        };
        (sink, rx)
    }

    pub async fn progress(&self, text: impl Into<String>) -> Result<(), SinkClosed> {
        self.send(JobEvent::progress(text)).await
    }

    pub async fn error(&self, text: impl Into<String>) -> Result<(), SinkClosed> {
        self.send(JobEvent::error(text)).await
    }

    /// Sleep for `duration`, returning early with [`SinkClosed`] on cancellation.
    pub async fn pause(&self, duration: Duration) -> Result<(), SinkClosed> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SinkClosed),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }

    /// Resolves once the execution has been cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    async fn send(&self, event: JobEvent) -> Result<(), SinkClosed> {
        match &event {
            JobEvent::Progress(text) => tracing::info!(job = %self.job, "{}", text),
            JobEvent::Error(text) => tracing::warn!(job = %self.job, "{}", text),
            JobEvent::Done => {}
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SinkClosed),
            sent = self.tx.send(event) => sent.map_err(|_| SinkClosed),
        }
    }
}
