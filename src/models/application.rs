use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review state of an application. New rows always start at `Pending`;
/// the only transitions are pending -> approved and pending -> rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Used for the `?status=` listing filter; unknown values yield None
    /// and the caller falls back to an unfiltered listing.
    pub fn parse(value: &str) -> Option<ApplicationStatus> {
        if value.eq_ignore_ascii_case("pending") {
            Some(ApplicationStatus::Pending)
        } else if value.eq_ignore_ascii_case("approved") {
            Some(ApplicationStatus::Approved)
        } else if value.eq_ignore_ascii_case("rejected") {
            Some(ApplicationStatus::Rejected)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

/// An employer's verdict on a pending application. Deliberately narrower
/// than `ApplicationStatus`: there is no way to decide "pending".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub fn parse(value: &str) -> Option<ReviewDecision> {
        if value.eq_ignore_ascii_case("approved") {
            Some(ReviewDecision::Approved)
        } else if value.eq_ignore_ascii_case("rejected") {
            Some(ReviewDecision::Rejected)
        } else {
            None
        }
    }

    pub fn status(&self) -> ApplicationStatus {
        match self {
            ReviewDecision::Approved => ApplicationStatus::Approved,
            ReviewDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub resume_path: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Application row joined with its job and applicant, as shown on the
/// applicant dashboard and the employer's applicant listing.
/// `job_posted_by` carries the owning employer for the review ownership
/// check and is not exposed in responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationDetail {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub job_posted_by: Uuid,
    pub applicant_id: Uuid,
    pub applicant_username: String,
    pub resume_path: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}
