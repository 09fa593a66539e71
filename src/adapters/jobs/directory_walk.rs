use super::fs_lister::FsLister;
use crate::ports::job::{Job, JobSink, SinkClosed};
use crate::ports::listing::DirectoryLister;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Simulated processing time per directory found.
pub const DIRECTORY_DELAY: Duration = Duration::from_millis(500);

const PATH_FIELD: &str = r#"<label>
    Directory path:
    <input type="text" name="path" placeholder=".">
</label>"#;

/// Reports the subdirectories of the path it is given, one line each.
#[derive(Clone)]
pub struct DirectoryWalk {
    lister: Arc<dyn DirectoryLister>,
    delay: Duration,
}

impl DirectoryWalk {
    pub fn new() -> Self {
        Self::with_lister(Arc::new(FsLister::new()), DIRECTORY_DELAY)
    }

    pub fn with_lister(lister: Arc<dyn DirectoryLister>, delay: Duration) -> Self {
        Self { lister, delay }
    }

    async fn walk(&self, dir: &Path, sink: &JobSink) -> Result<(), SinkClosed> {
        let lister = Arc::clone(&self.lister);
        let target = dir.to_path_buf();
        let listing = tokio::task::spawn_blocking(move || lister.list(&target))
            .await
            .unwrap_or_else(|e| Err(io::Error::new(io::ErrorKind::Other, e)));

        let entries = match listing {
            Ok(entries) => entries,
            Err(e) => return sink.error(format!("Error reading directory: {}", e)).await,
        };

        for entry in entries.iter().filter(|entry| entry.is_dir) {
            sink.progress(format!("Found directory: {}", entry.name)).await?;
            sink.pause(self.delay).await?;
        }
        Ok(())
    }
}

impl Default for DirectoryWalk {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Job for DirectoryWalk {
    fn name(&self) -> &'static str {
        "job2"
    }

    fn label(&self) -> &'static str {
        "Job 2: Simulate directory pagination"
    }

    fn fields(&self) -> Option<&'static str> {
        Some(PATH_FIELD)
    }

    async fn run(&self, parameter: Option<&str>, sink: &JobSink) {
        let dir = match parameter {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from("."),
        };

        if let Err(e) = self.walk(&dir, sink).await {
            tracing::debug!(job = self.name(), path = %dir.display(), "Stopped early: {}", e);
        }
    }
}
