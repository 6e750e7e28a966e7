//! Analysis scoring. A pluggable, trait-based engine that turns an uploaded
//! resume into an `AnalysisResult`.
//!
//! Default: `SyntheticAnalysisEngine` (randomised, content-independent).
//! A real parser/scorer can replace it behind the same trait without touching
//! the service or handlers. `AnalysisService` holds an `Arc<dyn AnalysisEngine>`.

pub mod synthesis;
pub mod taxonomy;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::job_profile::JobProfile;

/// Inputs available to an engine at completion time.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub resume_id: &'a str,
    pub filename: &'a str,
    /// The requested profile, already resolved against the store. `None` when
    /// the id did not match any profile.
    pub job_profile: Option<&'a JobProfile>,
}

#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Short label reported in mode info, e.g. "synthetic".
    fn name(&self) -> &'static str;

    async fn analyze(&self, request: AnalysisRequest<'_>) -> Result<AnalysisResult, AppError>;
}
