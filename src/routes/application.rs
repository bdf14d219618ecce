use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::{
    dto::application_dto::{
        ApplicationDetailResponse, ApplicationResponse, JobApplicantsResponse, ReviewPayload,
    },
    error::{Error, Result},
    models::user::{CurrentUser, Role},
    utils::upload,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/apply/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplicationResponse>),
        (status = 400, description = "Missing resume or cover letter, or rejected file type"),
        (status = 403, description = "Caller is not an applicant"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    if user.require_role()? != Role::Applicant {
        return Err(Error::Forbidden(
            "only applicants may apply to jobs".to_string(),
        ));
    }

    // Verify the job before touching the multipart body or disk.
    let job = state.job_service.get_by_id(job_id).await?;

    let mut cover_letter: Option<String> = None;
    let mut resume: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "cover_letter" => cover_letter = Some(field.text().await?),
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.bin").to_string();
                let data = field.bytes().await?;
                resume = Some((filename, data));
            }
            _ => {}
        }
    }

    let cover_letter = cover_letter
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| Error::BadRequest("cover_letter is required".to_string()))?;
    let (filename, data) =
        resume.ok_or_else(|| Error::BadRequest("resume file is required".to_string()))?;

    let resume_path = upload::store_resume(&filename, &data).await?;
    let application = state
        .application_service
        .submit(user.id, job.id, resume_path, cover_letter)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/view-applicants/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications for the job", body = Json<JobApplicantsResponse>),
        (status = 404, description = "Job not found or not posted by the caller")
    )
)]
#[axum::debug_handler]
pub async fn view_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_owned(user.id, job_id).await?;
    let applications = state.application_service.list_for_job(job.id).await?;

    Ok(Json(JobApplicantsResponse {
        job: job.into(),
        applications: applications.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/review/{application_id}",
    params(
        ("application_id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application up for review", body = Json<ApplicationDetailResponse>),
        (status = 403, description = "Application belongs to another employer's job"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn review_form(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .get_for_review(user.id, application_id)
        .await?;
    Ok(Json(ApplicationDetailResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/api/review/{application_id}",
    params(
        ("application_id" = Uuid, Path, description = "Application ID")
    ),
    request_body = ReviewPayload,
    responses(
        (status = 200, description = "Application after the decision; unknown decisions change nothing", body = Json<ApplicationDetailResponse>),
        (status = 403, description = "Application belongs to another employer's job"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn review(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .review(user.id, application_id, &payload.decision)
        .await?;
    Ok(Json(ApplicationDetailResponse::from(application)))
}
