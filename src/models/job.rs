use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub description: String,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
}
