//! In-memory store for resume records, job profiles and the processing ledger.
//!
//! The store is plain data behind whatever lock its owner chooses; every
//! method here is synchronous. `AnalysisService` holds it in a
//! `tokio::sync::RwLock` and never awaits while holding the guard.

pub mod ids;

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use tokio::time::Instant;

use crate::models::job_profile::{JobProfile, NewJobProfile};
use crate::models::processing::ProcessingJob;
use crate::models::resume::ResumeRecord;
use ids::IdAllocator;

/// A window over the newest-first resume list. `limit: None` means no bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Store {
    /// Newest first.
    resumes: VecDeque<ResumeRecord>,
    profiles: Vec<JobProfile>,
    jobs: HashMap<String, ProcessingJob>,
    /// Evicted job ids. Never handed out again, so a stale poller keeps
    /// seeing `unknown` rather than someone else's job.
    retired: HashSet<String>,
    ids: IdAllocator,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id unused by any resume, profile, ledger entry or evicted job.
    pub fn allocate_id(&self) -> String {
        self.ids.allocate(|candidate| self.is_taken(candidate))
    }

    fn is_taken(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
            || self.retired.contains(id)
            || self.resumes.iter().any(|r| r.id == id)
            || self.profiles.iter().any(|p| p.id == id)
    }

    // ── resumes ────────────────────────────────────────────────────────────

    pub fn insert_resume(&mut self, record: ResumeRecord) {
        self.resumes.push_front(record);
    }

    /// Appends behind existing records. Used for seed data that is older than
    /// anything already present.
    pub fn append_resume(&mut self, record: ResumeRecord) {
        self.resumes.push_back(record);
    }

    pub fn resume(&self, id: &str) -> Option<&ResumeRecord> {
        self.resumes.iter().find(|r| r.id == id)
    }

    pub fn resume_mut(&mut self, id: &str) -> Option<&mut ResumeRecord> {
        self.resumes.iter_mut().find(|r| r.id == id)
    }

    pub fn remove_resume(&mut self, id: &str) -> Option<ResumeRecord> {
        let index = self.resumes.iter().position(|r| r.id == id)?;
        self.resumes.remove(index)
    }

    /// Owned copy of the records in `page`, newest first.
    pub fn resumes_page(&self, page: Page) -> Vec<ResumeRecord> {
        self.resumes
            .iter()
            .skip(page.offset)
            .take(page.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    pub fn resume_count(&self) -> usize {
        self.resumes.len()
    }

    // ── job profiles ───────────────────────────────────────────────────────

    pub fn profiles(&self) -> &[JobProfile] {
        &self.profiles
    }

    pub fn profile(&self, id: &str) -> Option<&JobProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Stores `profile` under a freshly allocated id.
    pub fn create_profile(&mut self, profile: NewJobProfile) -> JobProfile {
        let created = profile.with_id(self.allocate_id());
        self.profiles.push(created.clone());
        created
    }

    /// Stores a profile with a caller-chosen id. Seed data only.
    pub fn insert_profile(&mut self, profile: JobProfile) {
        self.profiles.push(profile);
    }

    // ── processing ledger ──────────────────────────────────────────────────

    pub fn insert_job(&mut self, job_id: String, job: ProcessingJob) {
        self.jobs.insert(job_id, job);
    }

    pub fn job(&self, job_id: &str) -> Option<&ProcessingJob> {
        self.jobs.get(job_id)
    }

    pub fn job_mut(&mut self, job_id: &str) -> Option<&mut ProcessingJob> {
        self.jobs.get_mut(job_id)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Drops terminal ledger entries that finished more than `ttl` before `now`.
    /// In-flight jobs are never evicted. Returns the number removed.
    pub fn evict_finished(&mut self, ttl: Duration, now: Instant) -> usize {
        let expired: Vec<String> = self
            .jobs
            .iter()
            .filter(|(_, job)| {
                job.finished_at
                    .is_some_and(|finished| now.saturating_duration_since(finished) >= ttl)
            })
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            self.jobs.remove(id);
        }
        let evicted = expired.len();
        self.retired.extend(expired);
        evicted
    }
}
