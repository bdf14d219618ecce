use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::CreateJobPayload;
use crate::error::{Error, Result};
use crate::models::job::Job;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, employer_id: Uuid, payload: CreateJobPayload) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, company_name, location, description, posted_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, company_name, location, description, posted_by, created_at
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.company_name)
        .bind(&payload.location)
        .bind(&payload.description)
        .bind(employer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    /// All jobs in posting order, or a case-insensitive substring search
    /// across title, company name and location.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Job>> {
        let query = search.map(str::trim).filter(|q| !q.is_empty());

        let jobs = match query {
            Some(q) => {
                let pattern = format!("%{}%", escape_like(q));
                sqlx::query_as::<_, Job>(
                    r#"
                    SELECT id, title, company_name, location, description, posted_by, created_at
                    FROM jobs
                    WHERE title ILIKE $1 OR company_name ILIKE $1 OR location ILIKE $1
                    ORDER BY created_at
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Job>(
                    r#"
                    SELECT id, title, company_name, location, description, posted_by, created_at
                    FROM jobs
                    ORDER BY created_at
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, company_name, location, description, posted_by, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        job.ok_or_else(|| Error::NotFound("job not found".to_string()))
    }

    /// Ownership is folded into the lookup: a job posted by someone else
    /// is indistinguishable from a missing one.
    pub async fn get_owned(&self, employer_id: Uuid, job_id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, company_name, location, description, posted_by, created_at
            FROM jobs
            WHERE id = $1 AND posted_by = $2
            "#,
        )
        .bind(job_id)
        .bind(employer_id)
        .fetch_optional(&self.pool)
        .await?;

        job.ok_or_else(|| Error::NotFound("job not found".to_string()))
    }

    pub async fn list_by_employer(&self, employer_id: Uuid) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, company_name, location, description, posted_by, created_at
            FROM jobs
            WHERE posted_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }
}

/// Escapes LIKE metacharacters so a query matches them literally.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
