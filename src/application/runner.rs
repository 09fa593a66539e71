//! Launches one job per stream and hands its output back as an event stream.

use super::registry::JobRegistry;
use crate::domain::jobs::{JobEvent, JOB_PANICKED_MESSAGE, UNKNOWN_JOB_MESSAGE};
use crate::ports::job::JobSink;
use futures::Stream;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Slots in a job's output channel. One message in flight keeps the job in
/// lock step with the stream that drains it.
pub const CHANNEL_CAPACITY: usize = 1;

/// Default cap on jobs running at the same time.
pub const MAX_CONCURRENT_JOBS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunnerError {
    #[error("Too many jobs running (limit {limit}), try again later")]
    Saturated { limit: usize },
}

/// Starts jobs from a [`JobRegistry`], admitting at most `limit` at once.
pub struct JobRunner {
    registry: Arc<JobRegistry>,
    permits: Arc<Semaphore>,
    limit: usize,
}

impl JobRunner {
    pub fn new(registry: Arc<JobRegistry>, max_concurrent_jobs: usize) -> Self {
        let limit = max_concurrent_jobs.max(1);
        Self {
            registry,
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    #[cfg(test)]
    fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Spawn the job named `name` on a background task.
    ///
    /// Unknown names do not fail and spawn nothing: the execution yields a
    /// single [`UNKNOWN_JOB_MESSAGE`] error event. Only admission can fail.
    pub fn start(&self, name: &str, parameter: Option<String>) -> Result<JobExecution, RunnerError> {
        let Some(job) = self.registry.lookup(name) else {
            tracing::warn!(job = name, "Unknown job requested");
            return Ok(JobExecution {
                job: name.to_owned(),
                running: None,
            });
        };

        let permit = Arc::clone(&self.permits)
            .try_acquire_owned()
            .map_err(|_| {
                tracing::warn!(job = name, limit = self.limit, "Rejecting job, runner saturated");
                RunnerError::Saturated { limit: self.limit }
            })?;

        let cancel = CancellationToken::new();
        let (sink, events) = JobSink::channel(name, CHANNEL_CAPACITY, cancel.clone());

        tracing::info!(job = name, parameter = ?parameter, "Starting job");
        let task = tokio::spawn(async move {
            let _permit = permit;
            job.run(parameter.as_deref(), &sink).await;
            if sink.is_cancelled() {
                tracing::info!(job = job.name(), "Job stopped, stream went away");
            }
            // `sink` drops here, after `run` has returned, which closes the channel.
        });

        Ok(JobExecution {
            job: name.to_owned(),
            running: Some(Running {
                events,
                task,
                cancel,
            }),
        })
    }
}

/// The outcome of [`JobRunner::start`]. Holds the job's channel and task
/// when the name resolved to a registered job.
pub struct JobExecution {
    job: String,
    running: Option<Running>,
}

struct Running {
    events: mpsc::Receiver<JobEvent>,
    task: JoinHandle<()>,
    cancel: CancellationToken,
}

impl JobExecution {
    /// Drain the job's events in emission order, then join its task.
    ///
    /// The stream ends once the channel is closed and drained. A panicking job
    /// yields one [`JOB_PANICKED_MESSAGE`] error; a clean return yields
    /// [`JobEvent::Done`] when `emit_done` is set. Dropping the stream before
    /// it ends cancels the job. An unknown job yields only the
    /// [`UNKNOWN_JOB_MESSAGE`] error.
    pub fn into_stream(self, emit_done: bool) -> impl Stream<Item = JobEvent> + Send + 'static {
        let JobExecution { job, running } = self;

        // Guard created outside the generator so a stream dropped before its first poll still cancels.
        let running = running.map(|Running { events, task, cancel }| (events, task, cancel.drop_guard()));

        async_stream::stream! {
            match running {
                None => {
                    yield JobEvent::error(UNKNOWN_JOB_MESSAGE);
                }
                Some((mut events, task, _cancel_on_drop)) => {
                    while let Some(event) = events.recv().await {
                        yield event;
                    }

                    match task.await {
                        Ok(()) => {
                            tracing::debug!(job = %job, "Job finished");
                            if emit_done {
                                yield JobEvent::Done;
                            }
                        }
                        Err(err) if err.is_panic() => {
                            tracing::error!(job = %job, "Job panicked");
                            yield JobEvent::error(JOB_PANICKED_MESSAGE);
                        }
                        Err(err) => {
                            tracing::warn!(job = %job, error = %err, "Job task did not complete");
                        }
                    }
                }
            }
        }
    }
}
