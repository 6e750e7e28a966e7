//! AnalysisService: the single owner of resume records, job profiles and the
//! processing ledger.
//!
//! Every public operation first waits out its simulated latency, then touches
//! the store under a short, synchronous lock. Uploads additionally schedule a
//! detached completion task; callers must poll `status` to see it land.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::job_profile::{JobProfile, NewJobProfile};
use crate::models::processing::{AnalysisStatus, JobStatus, ProcessingJob};
use crate::models::resume::{ResumeRecord, ResumeStatus};
use crate::pipeline::export::{self, ExportBlob, ExportFormat, ExportRow};
use crate::pipeline::latency::{Latency, Operation};
use crate::pipeline::scheduler::DelayedTask;
use crate::pipeline::upload::{self, FileDescriptor};
use crate::scoring::{AnalysisEngine, AnalysisRequest};
use crate::store::{Page, Store};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Time between upload and the completion handler firing.
    pub processing_delay: Duration,
    pub latency: Latency,
    /// How long terminal ledger entries are kept before eviction.
    pub job_ttl: Duration,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        let latency = if config.simulated_latency {
            Latency::realistic(config.latency_jitter)
        } else {
            Latency::none()
        };
        Self {
            processing_delay: config.processing_delay,
            latency,
            job_ttl: config.job_ttl,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(3000),
            latency: Latency::default(),
            job_ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub job_id: String,
    pub resume_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedFile {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReceipt {
    pub submitted: Vec<SubmitReceipt>,
    pub rejected: Vec<RejectedFile>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeInfo {
    pub mode: &'static str,
    pub scorer: &'static str,
    pub features: Vec<&'static str>,
    pub resumes: usize,
    pub job_profiles: usize,
    pub tracked_jobs: usize,
}

const FEATURES: &[&str] = &[
    "Realistic mock analysis results",
    "File upload simulation",
    "Batch upload",
    "Status polling",
    "Job cancellation",
    "Export functionality",
    "No external services required",
];

struct Inner {
    store: RwLock<Store>,
    engine: Arc<dyn AnalysisEngine>,
    settings: ServiceSettings,
}

/// Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct AnalysisService {
    inner: Arc<Inner>,
}

impl AnalysisService {
    pub fn new(engine: Arc<dyn AnalysisEngine>, settings: ServiceSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: RwLock::new(Store::new()),
                engine,
                settings,
            }),
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.inner.settings
    }

    /// Loads fixed records and profiles behind anything already stored.
    pub async fn seed(&self, resumes: Vec<ResumeRecord>, profiles: Vec<JobProfile>) {
        let mut store = self.inner.store.write().await;
        let (resume_count, profile_count) = (resumes.len(), profiles.len());
        for record in resumes {
            store.append_resume(record);
        }
        for profile in profiles {
            store.insert_profile(profile);
        }
        info!(resumes = resume_count, job_profiles = profile_count, "seeded demo data");
    }

    // ── upload lifecycle ───────────────────────────────────────────────────

    /// Validates `file`, records it as `processing` and schedules completion.
    /// Returns as soon as the record exists; the analysis lands later.
    pub async fn submit(
        &self,
        file: FileDescriptor,
        job_profile_id: &str,
    ) -> Result<SubmitReceipt, AppError> {
        upload::validate(&file)?;
        self.inner.settings.latency.simulate(Operation::Submit).await;

        let receipt = self.enqueue(file.name, job_profile_id).await;
        info!(
            job_id = %receipt.job_id,
            resume_id = %receipt.resume_id,
            size = file.size,
            job_profile_id,
            "resume queued for analysis"
        );
        Ok(receipt)
    }

    /// Submits each accepted file independently. Rejected files are reported,
    /// not fatal; an empty batch is.
    pub async fn submit_batch(
        &self,
        files: Vec<FileDescriptor>,
        job_profile_id: &str,
    ) -> Result<BatchReceipt, AppError> {
        if files.is_empty() {
            return Err(AppError::Validation("No files provided".to_string()));
        }
        self.inner
            .settings
            .latency
            .simulate(Operation::BatchSubmit)
            .await;

        let mut submitted = Vec::new();
        let mut rejected = Vec::new();
        for file in files {
            match upload::validate(&file) {
                Ok(_) => submitted.push(self.enqueue(file.name, job_profile_id).await),
                Err(err) => rejected.push(RejectedFile {
                    filename: file.name,
                    reason: err.to_string(),
                }),
            }
        }

        info!(
            submitted = submitted.len(),
            rejected = rejected.len(),
            job_profile_id,
            "batch upload queued"
        );
        Ok(BatchReceipt {
            submitted,
            rejected,
        })
    }

    async fn enqueue(&self, filename: String, job_profile_id: &str) -> SubmitReceipt {
        let mut store = self.inner.store.write().await;

        let resume_id = store.allocate_id();
        store.insert_resume(ResumeRecord::processing(resume_id.clone(), filename));

        // Allocated after the insert so it cannot equal `resume_id`.
        let job_id = store.allocate_id();
        let mut job = ProcessingJob::new(resume_id.clone());
        let task = DelayedTask::schedule(
            self.inner.settings.processing_delay,
            complete(
                Arc::clone(&self.inner),
                job_id.clone(),
                resume_id.clone(),
                job_profile_id.to_string(),
            ),
        );
        debug!(job_id = %job_id, due = ?task.due(), "completion scheduled");
        job.task = Some(task);
        // The completion task needs the write lock we hold, so it cannot
        // observe the ledger before this entry exists.
        store.insert_job(job_id.clone(), job);

        SubmitReceipt { job_id, resume_id }
    }

    /// Current ledger status; `unknown` for ids the ledger does not hold.
    pub async fn status(&self, job_id: &str) -> AnalysisStatus {
        self.inner.settings.latency.simulate(Operation::Status).await;
        let store = self.inner.store.read().await;
        store
            .job(job_id)
            .map(ProcessingJob::snapshot)
            .unwrap_or_else(AnalysisStatus::unknown)
    }

    /// Cancels an in-flight job. Its record is marked failed. Returns false if
    /// the job had already finished.
    pub async fn cancel(&self, job_id: &str) -> Result<bool, AppError> {
        self.inner.settings.latency.simulate(Operation::Cancel).await;
        let mut store = self.inner.store.write().await;

        let job = store
            .job_mut(job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
        if job.is_terminal() {
            return Ok(false);
        }
        if let Some(task) = job.task.take() {
            debug!(job_id, finished = task.is_finished(), "aborting pending completion");
            task.cancel();
        }
        job.finish(JobStatus::Failed);
        let resume_id = job.resume_id.clone();

        if let Some(record) = store.resume_mut(&resume_id) {
            record.fail("cancelled");
        }
        info!(job_id, resume_id = %resume_id, "analysis cancelled");
        Ok(true)
    }

    // ── queries ────────────────────────────────────────────────────────────

    pub async fn result(&self, resume_id: &str) -> Result<AnalysisResult, AppError> {
        self.inner.settings.latency.simulate(Operation::Result).await;
        let store = self.inner.store.read().await;

        let record = store
            .resume(resume_id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

        match (&record.status, &record.analysis) {
            (ResumeStatus::Completed, Some(analysis)) => Ok(analysis.clone()),
            (status, _) => Err(AppError::NotReady(format!(
                "Analysis for resume {resume_id} is not available (status: {})",
                status.as_str()
            ))),
        }
    }

    /// Records in `page`, newest first. The returned list is a copy;
    /// `Page::default()` returns everything.
    pub async fn list_resumes(&self, page: Page) -> Vec<ResumeRecord> {
        self.inner
            .settings
            .latency
            .simulate(Operation::ListResumes)
            .await;
        self.inner.store.read().await.resumes_page(page)
    }

    /// Removes a record. Absent ids are ignored. A pending completion for the
    /// record still fires and finds nothing to attach to.
    pub async fn delete_resume(&self, resume_id: &str) {
        self.inner
            .settings
            .latency
            .simulate(Operation::DeleteResume)
            .await;
        let removed = self.inner.store.write().await.remove_resume(resume_id);
        match removed {
            Some(record) => info!(resume_id, filename = %record.filename, "resume deleted"),
            None => debug!(resume_id, "delete ignored; resume not found"),
        }
    }

    pub async fn list_job_profiles(&self) -> Vec<JobProfile> {
        self.inner
            .settings
            .latency
            .simulate(Operation::ListProfiles)
            .await;
        self.inner.store.read().await.profiles().to_vec()
    }

    pub async fn create_job_profile(&self, profile: NewJobProfile) -> Result<JobProfile, AppError> {
        if profile.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        self.inner
            .settings
            .latency
            .simulate(Operation::CreateProfile)
            .await;
        let created = self.inner.store.write().await.create_profile(profile);
        info!(job_profile_id = %created.id, title = %created.title, "job profile created");
        Ok(created)
    }

    /// One row per requested id, in the order given.
    pub async fn export(
        &self,
        resume_ids: &[String],
        format: ExportFormat,
    ) -> Result<ExportBlob, AppError> {
        self.inner.settings.latency.simulate(Operation::Export).await;
        let rows: Vec<ExportRow> = {
            let store = self.inner.store.read().await;
            resume_ids
                .iter()
                .map(|id| ExportRow::from_record(store.resume(id)))
                .collect()
        };
        let blob = export::render(&rows, format)?;
        info!(rows = rows.len(), format = format.extension(), "analysis exported");
        Ok(blob)
    }

    // ── housekeeping ───────────────────────────────────────────────────────

    /// Drops terminal ledger entries older than the configured TTL.
    pub async fn evict_expired(&self) -> usize {
        let ttl = self.inner.settings.job_ttl;
        let evicted = self
            .inner
            .store
            .write()
            .await
            .evict_finished(ttl, Instant::now());
        if evicted > 0 {
            info!(evicted, "evicted finished jobs from ledger");
        }
        evicted
    }

    pub async fn mode_info(&self) -> ModeInfo {
        let store = self.inner.store.read().await;
        ModeInfo {
            mode: "demo",
            scorer: self.inner.engine.name(),
            features: FEATURES.to_vec(),
            resumes: store.resume_count(),
            job_profiles: store.profiles().len(),
            tracked_jobs: store.job_count(),
        }
    }
}

/// Completion handler. Runs once per submission after the processing delay.
///
/// The engine runs outside the lock; its result is applied only if the job is
/// still in flight and the record still exists.
async fn complete(inner: Arc<Inner>, job_id: String, resume_id: String, job_profile_id: String) {
    let snapshot = {
        let store = inner.store.read().await;
        store
            .resume(&resume_id)
            .map(|r| (r.filename.clone(), store.profile(&job_profile_id).cloned()))
    };

    let outcome = match &snapshot {
        Some((filename, profile)) => Some(
            inner
                .engine
                .analyze(AnalysisRequest {
                    resume_id: &resume_id,
                    filename,
                    job_profile: profile.as_ref(),
                })
                .await,
        ),
        None => None,
    };

    let mut store = inner.store.write().await;
    if !store.job(&job_id).is_some_and(|j| !j.is_terminal()) {
        debug!(job_id = %job_id, "completion skipped; job no longer in flight");
        return;
    }

    let status = match outcome {
        None => {
            debug!(resume_id = %resume_id, "resume removed before completion");
            JobStatus::Completed
        }
        Some(Ok(analysis)) => {
            match store.resume_mut(&resume_id) {
                Some(record) => {
                    record.complete(analysis);
                }
                None => debug!(resume_id = %resume_id, "resume removed during analysis"),
            }
            JobStatus::Completed
        }
        Some(Err(err)) => {
            warn!(job_id = %job_id, resume_id = %resume_id, error = %err, "analysis failed");
            if let Some(record) = store.resume_mut(&resume_id) {
                record.fail(err.to_string());
            }
            JobStatus::Failed
        }
    };

    let elapsed_ms = store.job_mut(&job_id).map(|job| {
        job.finish(status);
        job.created_at.elapsed().as_millis() as u64
    });
    info!(
        job_id = %job_id,
        resume_id = %resume_id,
        status = ?status,
        elapsed_ms,
        "analysis finished"
    );
}
