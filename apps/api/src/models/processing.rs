use serde::Serialize;
use tokio::time::Instant;

use crate::pipeline::scheduler::DelayedTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

/// Ledger entry correlating an upload with its eventual completion.
/// Keyed by job id in the store; `resume_id` is a lookup reference only.
#[derive(Debug)]
pub struct ProcessingJob {
    pub resume_id: String,
    pub status: JobStatus,
    pub progress: u8,
    pub created_at: Instant,
    /// Set when the job reaches a terminal status; drives ledger eviction.
    pub finished_at: Option<Instant>,
    /// Pending completion. `None` once it has fired or been cancelled.
    pub task: Option<DelayedTask>,
}

impl ProcessingJob {
    pub fn new(resume_id: String) -> Self {
        Self {
            resume_id,
            status: JobStatus::Processing,
            progress: 0,
            created_at: Instant::now(),
            finished_at: None,
            task: None,
        }
    }

    pub fn finish(&mut self, status: JobStatus) {
        if status == JobStatus::Completed {
            self.progress = 100;
        }
        self.status = status;
        self.finished_at = Some(Instant::now());
        self.task = None;
    }

    pub fn is_terminal(&self) -> bool {
        self.status != JobStatus::Processing
    }

    pub fn snapshot(&self) -> AnalysisStatus {
        AnalysisStatus {
            status: match self.status {
                JobStatus::Processing => StatusKind::Processing,
                JobStatus::Completed => StatusKind::Completed,
                JobStatus::Failed => StatusKind::Failed,
            },
            progress: Some(self.progress),
        }
    }
}

/// Status as reported to pollers. `Unknown` is the sentinel for ids the
/// ledger does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Processing,
    Completed,
    Failed,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisStatus {
    pub status: StatusKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl AnalysisStatus {
    pub fn unknown() -> Self {
        Self {
            status: StatusKind::Unknown,
            progress: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, StatusKind::Completed | StatusKind::Failed)
    }
}
