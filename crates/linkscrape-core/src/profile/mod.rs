mod types;
mod validate;

pub use types::*;
pub use validate::Validate;

impl BatchResult {
    /// Assemble a run result stamped with the current local time
    pub fn new(profiles: Vec<ProfileRecord>, failures: Vec<FailedProfile>) -> Self {
        let status = if failures.is_empty() {
            RunStatus::Completed
        } else {
            RunStatus::CompletedWithErrors
        };

        Self {
            metadata: BatchMetadata {
                scraped_at: chrono::Local::now().to_rfc3339(),
                total_profiles: profiles.len(),
                status,
            },
            profiles,
            failures,
        }
    }
}
