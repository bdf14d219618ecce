use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::Job;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: uuid::Uuid,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub description: String,
    pub posted_by: uuid::Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub q: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company_name: value.company_name,
            location: value.location,
            description: value.description,
            posted_by: value.posted_by,
            created_at: value.created_at,
        }
    }
}

impl From<Vec<Job>> for JobListResponse {
    fn from(value: Vec<Job>) -> Self {
        Self {
            items: value.into_iter().map(Into::into).collect(),
        }
    }
}
