//! Demonstration jobs.

pub mod api_pagination;
pub mod directory_walk;
pub mod fs_lister;

pub use api_pagination::ApiPagination;
pub use directory_walk::DirectoryWalk;
pub use fs_lister::FsLister;

use crate::application::JobRegistry;

/// Registry holding every job the server offers.
pub fn standard_registry() -> JobRegistry {
    JobRegistry::new()
        .with_job(ApiPagination::new())
        .with_job(DirectoryWalk::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_names() {
        let registry = standard_registry();
        let names: Vec<_> = registry.jobs().map(|job| job.name()).collect();

        assert_eq!(names, vec!["job1", "job2"]);
        assert_eq!(registry.fields("job1"), "");
        assert!(registry.fields("job2").contains("name=\"path\""));
    }
}
