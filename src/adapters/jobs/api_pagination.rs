use crate::ports::job::{Job, JobSink, SinkClosed};
use async_trait::async_trait;
use std::time::Duration;

/// Number of pages the simulated API returns.
pub const PAGE_COUNT: u32 = 5;

/// Simulated API call latency per page.
pub const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Pretends to walk a paginated API, reporting each page as it "arrives".
#[derive(Clone, Debug)]
pub struct ApiPagination {
    delay: Duration,
}

impl ApiPagination {
    pub fn new() -> Self {
        Self::with_delay(PAGE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    async fn fetch_pages(&self, sink: &JobSink) -> Result<(), SinkClosed> {
        for page in 1..=PAGE_COUNT {
            sink.pause(self.delay).await?;
            sink.progress(format!("Fetched page {} from API", page)).await?;
        }
        Ok(())
    }
}

impl Default for ApiPagination {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Job for ApiPagination {
    fn name(&self) -> &'static str {
        "job1"
    }

    fn label(&self) -> &'static str {
        "Job 1: Simulate API pagination"
    }

    async fn run(&self, _parameter: Option<&str>, sink: &JobSink) {
        if let Err(e) = self.fetch_pages(sink).await {
            tracing::debug!(job = self.name(), "Stopped early: {}", e);
        }
    }
}
