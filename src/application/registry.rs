use crate::ports::job::Job;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Read-only map from job identifier to its implementation.
///
/// Built once at startup and shared behind an `Arc`; there is no way to add
/// jobs after the server starts.
#[derive(Default, Clone)]
pub struct JobRegistry {
    jobs: BTreeMap<&'static str, Arc<dyn Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `job` under its own name, replacing any job already there.
    pub fn with_job(mut self, job: impl Job + 'static) -> Self {
        let name = job.name();
        if self.jobs.insert(name, Arc::new(job)).is_some() {
            tracing::warn!(job = name, "job registered twice, keeping the latest");
        }
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Job>> {
        self.jobs.get(name).cloned()
    }

    /// Registered jobs in identifier order.
    pub fn jobs(&self) -> impl Iterator<Item = &Arc<dyn Job>> {
        self.jobs.values()
    }

    /// Extra form markup for `name`, empty for jobs without fields and for unknown ids.
    pub fn fields(&self, name: &str) -> &'static str {
        self.jobs
            .get(name)
            .and_then(|job| job.fields())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
