//! Periodic eviction of finished jobs from the processing ledger.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::pipeline::service::AnalysisService;

/// Spawns a task that calls `evict_expired` every `every`. Runs until the
/// handle is aborted or the runtime shuts down.
pub fn spawn(service: AnalysisService, every: Duration) -> JoinHandle<()> {
    tracing::info!(
        every_secs = every.as_secs(),
        ttl_secs = service.settings().job_ttl.as_secs(),
        "ledger sweeper started"
    );
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // first tick is immediate
        loop {
            ticker.tick().await;
            service.evict_expired().await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::processing::AnalysisStatus;
    use crate::pipeline::service::tests::seeded_service;
    use crate::pipeline::upload::FileDescriptor;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_after_ttl() {
        // seeded_service keeps finished jobs for 60s
        let service = seeded_service(0.0).await;
        let receipt = service
            .submit(FileDescriptor::new("a.pdf", 1, None), "frontend")
            .await
            .unwrap();

        let sweeper = spawn(service.clone(), Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(100)).await;

        assert_eq!(service.status(&receipt.job_id).await, AnalysisStatus::unknown());
        sweeper.abort();
    }
}
