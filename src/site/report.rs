//! Run summary

use crate::observability::Logger;

/// One site that could not be restored, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFailure {
    pub site: String,
    pub reason: String,
}

/// Outcome of a full run: which sites were restored, which failed.
#[derive(Debug, Default)]
pub struct RunReport {
    pub restored: Vec<String>,
    pub failed: Vec<SiteFailure>,
}

impl RunReport {
    /// Full success means every discovered site was restored.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Emit the end-of-run summary event.
    pub fn log_summary(&self) {
        let restored = self.restored.join(",");
        let failed: Vec<&str> = self.failed.iter().map(|f| f.site.as_str()).collect();
        let failed = failed.join(",");

        Logger::info(
            "restore_summary",
            &[
                ("restored", &restored),
                ("restored_count", &self.restored.len().to_string()),
                ("failed", &failed),
                ("failed_count", &self.failed.len().to_string()),
            ],
        );
    }
}
