//! Axum route handlers for the analysis API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::job_profile::{JobProfile, NewJobProfile};
use crate::models::processing::AnalysisStatus;
use crate::models::resume::ResumeRecord;
use crate::pipeline::export::ExportFormat;
use crate::pipeline::polling::wait_for_completion;
use crate::pipeline::service::{BatchReceipt, SubmitReceipt};
use crate::pipeline::upload::FileDescriptor;
use crate::state::AppState;
use crate::store::Page;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub receipt: SubmitReceipt,
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/// `?limit=&offset=` on the resume list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl From<ListParams> for Page {
    fn from(params: ListParams) -> Self {
        Page {
            offset: params.offset,
            limit: Some(params.limit),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resume_ids: Vec<String>,
    pub format: ExportFormat,
}

/// Fields pulled out of an upload form.
struct UploadForm {
    files: Vec<FileDescriptor>,
    job_profile_id: String,
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed upload: {err}"))
}

/// Collects every file part named `file_field` plus the `jobProfileId` text part.
async fn read_upload_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<UploadForm, AppError> {
    let mut files = Vec::new();
    let mut job_profile_id = String::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(n) if n == file_field => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                files.push(FileDescriptor::new(
                    filename,
                    data.len() as u64,
                    content_type.as_deref(),
                ));
            }
            Some("jobProfileId") => {
                job_profile_id = field.text().await.map_err(multipart_error)?;
            }
            _ => {}
        }
    }

    Ok(UploadForm {
        files,
        job_profile_id,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload
///
/// Multipart with a `resume` file and optional `jobProfileId`. Returns as soon
/// as the resume is queued.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart?, "resume").await?;
    let file = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let receipt = state.service.submit(file, &form.job_profile_id).await?;

    Ok(Json(UploadResponse {
        receipt,
        status: "processing",
        message: "Resume uploaded successfully and queued for analysis",
    }))
}

/// POST /api/batch-upload
pub async fn handle_batch_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BatchReceipt>, AppError> {
    let form = read_upload_form(multipart?, "resumes").await?;
    let receipt = state
        .service
        .submit_batch(form.files, &form.job_profile_id)
        .await?;
    Ok(Json(receipt))
}

/// GET /api/analysis/:id/status
pub async fn handle_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Json<AnalysisStatus> {
    Json(state.service.status(&job_id).await)
}

/// GET /api/analysis/:id/wait
///
/// Long-polls on the server's poll policy; 504 when the budget runs out.
pub async fn handle_wait(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<AnalysisStatus>, AppError> {
    let status = wait_for_completion(&state.service, &job_id, state.poll).await?;
    Ok(Json(status))
}

/// POST /api/analysis/:id/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<CancelResponse>, AppError> {
    let cancelled = state.service.cancel(&job_id).await?;
    Ok(Json(CancelResponse { cancelled }))
}

/// GET /api/analysis/:id
pub async fn handle_result(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<AnalysisResult>, AppError> {
    Ok(Json(state.service.result(&resume_id).await?))
}

/// GET /api/resumes?limit=50&offset=0
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let Query(params) = params?;
    Ok(Json(state.service.list_resumes(params.into()).await))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> StatusCode {
    state.service.delete_resume(&resume_id).await;
    StatusCode::NO_CONTENT
}

/// GET /api/job-profiles
pub async fn handle_list_job_profiles(State(state): State<AppState>) -> Json<Vec<JobProfile>> {
    Json(state.service.list_job_profiles().await)
}

/// POST /api/job-profiles
pub async fn handle_create_job_profile(
    State(state): State<AppState>,
    payload: Result<Json<NewJobProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<JobProfile>), AppError> {
    let Json(profile) = payload?;
    let created = state.service.create_job_profile(profile).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/export
pub async fn handle_export(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let blob = state
        .service
        .export(&request.resume_ids, request.format)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, blob.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", blob.filename),
            ),
        ],
        blob.bytes,
    ))
}
