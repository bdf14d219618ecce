use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Extension, Json,
};

use crate::{
    dto::{
        application_dto::{ApplicationListQuery, ApplicationListResponse},
        job_dto::JobListResponse,
    },
    error::{Error, Result},
    models::{
        application::ApplicationStatus,
        user::{CurrentUser, Role},
    },
    AppState,
};

/// Routes the caller to the dashboard for their role. The match is
/// exhaustive; an account without a profile gets an explicit error
/// instead of falling through to either side.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 303, description = "Redirect to the role dashboard"),
        (status = 403, description = "No profile associated with this account")
    )
)]
#[axum::debug_handler]
pub async fn dashboard(Extension(user): Extension<CurrentUser>) -> Result<impl IntoResponse> {
    let target = match user.require_role()? {
        Role::Employer => "/api/employer",
        Role::Applicant => "/api/applicant",
    };
    Ok(Redirect::to(target))
}

#[utoipa::path(
    get,
    path = "/api/employer",
    responses(
        (status = 200, description = "Jobs posted by the caller", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn employer_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_by_employer(user.id).await?;
    Ok(Json(JobListResponse::from(jobs)))
}

#[utoipa::path(
    get,
    path = "/api/applicant",
    params(
        ("status" = Option<String>, Query, description = "Filter by review status; unknown values are ignored")
    ),
    responses(
        (status = 200, description = "The caller's applications", body = Json<ApplicationListResponse>),
        (status = 403, description = "Caller is not an applicant")
    )
)]
#[axum::debug_handler]
pub async fn applicant_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    if user.require_role()? != Role::Applicant {
        return Err(Error::Forbidden(
            "only applicants may view this dashboard".to_string(),
        ));
    }

    let status = query.status.as_deref().and_then(ApplicationStatus::parse);
    let applications = state
        .application_service
        .list_for_applicant(user.id, status)
        .await?;
    Ok(Json(ApplicationListResponse::from(applications)))
}
