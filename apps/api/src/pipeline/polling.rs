//! Caller-side polling for upload completion.
//!
//! The service enforces no timeout of its own; whoever waits owns the budget.

use std::time::Duration;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::processing::AnalysisStatus;
use crate::pipeline::service::AnalysisService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            max_attempts: config.poll_max_attempts.max(1),
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            max_attempts: 30,
        }
    }
}

/// Polls `job_id` until it is completed or failed. Unknown ids keep being
/// polled like in-flight ones. Gives up with `AppError::Timeout` after
/// `max_attempts` polls.
pub async fn wait_for_completion(
    service: &AnalysisService,
    job_id: &str,
    policy: PollPolicy,
) -> Result<AnalysisStatus, AppError> {
    for attempt in 1..=policy.max_attempts {
        let status = service.status(job_id).await;
        if status.is_terminal() {
            tracing::debug!(job_id, attempt, "poll reached terminal status");
            return Ok(status);
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    tracing::warn!(job_id, attempts = policy.max_attempts, "analysis polling timed out");
    Err(AppError::Timeout(format!(
        "Analysis for job {job_id} did not finish after {} attempts",
        policy.max_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::processing::StatusKind;
    use crate::pipeline::service::tests::seeded_service;
    use crate::pipeline::upload::FileDescriptor;

    fn pdf() -> FileDescriptor {
        FileDescriptor::new("resume.pdf", 100, None)
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_completed_within_budget() {
        let service = seeded_service(0.0).await;
        let receipt = service.submit(pdf(), "frontend").await.unwrap();
        let status = wait_for_completion(&service, &receipt.job_id, PollPolicy::default())
            .await
            .unwrap();
        assert_eq!(status.status, StatusKind::Completed);
        assert!(service.result(&receipt.resume_id).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_failed_status() {
        let service = seeded_service(1.0).await;
        let receipt = service.submit(pdf(), "frontend").await.unwrap();
        let status = wait_for_completion(&service, &receipt.job_id, PollPolicy::default())
            .await
            .unwrap();
        assert_eq!(status.status, StatusKind::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_budget_too_small() {
        let service = seeded_service(0.0).await;
        let receipt = service.submit(pdf(), "frontend").await.unwrap();
        let policy = PollPolicy {
            interval: Duration::from_millis(1000),
            max_attempts: 2,
        };
        let err = wait_for_completion(&service, &receipt.job_id, policy)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_job_times_out() {
        let service = seeded_service(0.0).await;
        let policy = PollPolicy {
            interval: Duration::from_millis(10),
            max_attempts: 3,
        };
        assert!(matches!(
            wait_for_completion(&service, "ghost", policy).await,
            Err(AppError::Timeout(_))
        ));
    }
}
