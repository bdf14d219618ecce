use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::job_dto::JobResponse;
use crate::models::application::{Application, ApplicationDetail, ApplicationStatus};

/// Bare application row, returned when an application is first submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: uuid::Uuid,
    pub job_id: uuid::Uuid,
    pub applicant_id: uuid::Uuid,
    pub resume_path: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Application joined with its job and applicant, for dashboards and review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDetailResponse {
    pub id: uuid::Uuid,
    pub job_id: uuid::Uuid,
    pub job_title: String,
    pub company_name: String,
    pub applicant_id: uuid::Uuid,
    pub applicant_username: String,
    pub resume_path: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationDetailResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicantsResponse {
    pub job: JobResponse,
    pub applications: Vec<ApplicationDetailResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub decision: String,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            applicant_id: value.applicant_id,
            resume_path: value.resume_path,
            cover_letter: value.cover_letter,
            status: value.status,
            applied_at: value.applied_at,
        }
    }
}

impl From<ApplicationDetail> for ApplicationDetailResponse {
    fn from(value: ApplicationDetail) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            job_title: value.job_title,
            company_name: value.company_name,
            applicant_id: value.applicant_id,
            applicant_username: value.applicant_username,
            resume_path: value.resume_path,
            cover_letter: value.cover_letter,
            status: value.status,
            applied_at: value.applied_at,
        }
    }
}

impl From<Vec<ApplicationDetail>> for ApplicationListResponse {
    fn from(value: Vec<ApplicationDetail>) -> Self {
        Self {
            items: value.into_iter().map(Into::into).collect(),
        }
    }
}
