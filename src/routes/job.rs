use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{CreateJobPayload, JobListQuery, JobListResponse, JobResponse},
    error::Result,
    models::user::{CurrentUser, Role},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobResponse>),
        (status = 303, description = "Caller is not an employer; sent back to the dashboard"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn post_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<Response> {
    payload.validate()?;

    // Role mismatch is a silent denial: bounce to the dashboard, no error body.
    if user.require_role()? != Role::Employer {
        return Ok(Redirect::to("/api/dashboard").into_response());
    }

    let job = state.job_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring match on title, company name or location")
    ),
    responses(
        (status = 200, description = "Matching jobs", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list(query.q.as_deref()).await?;
    Ok(Json(JobListResponse::from(jobs)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}
