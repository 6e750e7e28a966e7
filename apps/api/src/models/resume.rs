use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::analysis::AnalysisResult;

/// Lifecycle of a resume record. Ordering follows the state machine
/// `queued → processing → {completed | failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl ResumeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStatus::Queued => "queued",
            ResumeStatus::Processing => "processing",
            ResumeStatus::Completed => "completed",
            ResumeStatus::Failed => "failed",
        }
    }

    /// Forward-only transitions. Terminal states accept nothing.
    pub fn can_transition_to(&self, next: ResumeStatus) -> bool {
        matches!(
            (self, next),
            (ResumeStatus::Queued, ResumeStatus::Processing)
                | (ResumeStatus::Queued, ResumeStatus::Failed)
                | (ResumeStatus::Processing, ResumeStatus::Completed)
                | (ResumeStatus::Processing, ResumeStatus::Failed)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: String,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub status: ResumeStatus,
    /// Present if and only if `status == Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    /// Reason for a `Failed` status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResumeRecord {
    pub fn processing(id: String, filename: String) -> Self {
        Self {
            id,
            filename,
            upload_date: Utc::now(),
            status: ResumeStatus::Processing,
            analysis: None,
            error: None,
        }
    }

    /// Attaches the analysis and flips to `Completed`. Returns false and leaves
    /// the record untouched if the transition is not allowed.
    pub fn complete(&mut self, analysis: AnalysisResult) -> bool {
        if !self.status.can_transition_to(ResumeStatus::Completed) {
            return false;
        }
        self.status = ResumeStatus::Completed;
        self.analysis = Some(analysis);
        true
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        if !self.status.can_transition_to(ResumeStatus::Failed) {
            return false;
        }
        self.status = ResumeStatus::Failed;
        self.analysis = None;
        self.error = Some(reason.into());
        true
    }

    pub fn overall_score(&self) -> Option<u8> {
        self.analysis.as_ref().map(|a| a.overall_score)
    }
}
