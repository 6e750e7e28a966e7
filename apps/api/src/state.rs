use crate::pipeline::polling::PollPolicy;
use crate::pipeline::service::AnalysisService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns every resume, job profile and ledger entry. Clones share one store.
    pub service: AnalysisService,
    /// Budget for the server-side wait endpoint.
    pub poll: PollPolicy,
}
