use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationDetail, ApplicationStatus, ReviewDecision,
};

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the application with the default pending status. The job
    /// must already be verified to exist and the resume already stored.
    pub async fn submit(
        &self,
        applicant_id: Uuid,
        job_id: Uuid,
        resume_path: String,
        cover_letter: String,
    ) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, applicant_id, resume_path, cover_letter)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, applicant_id, resume_path, cover_letter, status, applied_at
            "#,
        )
        .bind(job_id)
        .bind(applicant_id)
        .bind(&resume_path)
        .bind(&cover_letter)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(ref db) = err {
                if db.constraint() == Some("applications_job_id_applicant_id_key") {
                    return Error::AlreadyApplied;
                }
            }
            err.into()
        })?;

        Ok(application)
    }

    /// An applicant's own applications, newest first. A status that does
    /// not parse is ignored and the listing stays unfiltered.
    pub async fn list_for_applicant(
        &self,
        applicant_id: Uuid,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationDetail>> {
        let applications = match status {
            Some(status) => {
                sqlx::query_as::<_, ApplicationDetail>(
                    r#"
                    SELECT a.id, a.job_id, j.title AS job_title, j.company_name,
                           j.posted_by AS job_posted_by, a.applicant_id,
                           u.username AS applicant_username, a.resume_path,
                           a.cover_letter, a.status, a.applied_at
                    FROM applications a
                    JOIN jobs j ON j.id = a.job_id
                    JOIN users u ON u.id = a.applicant_id
                    WHERE a.applicant_id = $1 AND a.status = $2
                    ORDER BY a.applied_at DESC
                    "#,
                )
                .bind(applicant_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ApplicationDetail>(
                    r#"
                    SELECT a.id, a.job_id, j.title AS job_title, j.company_name,
                           j.posted_by AS job_posted_by, a.applicant_id,
                           u.username AS applicant_username, a.resume_path,
                           a.cover_letter, a.status, a.applied_at
                    FROM applications a
                    JOIN jobs j ON j.id = a.job_id
                    JOIN users u ON u.id = a.applicant_id
                    WHERE a.applicant_id = $1
                    ORDER BY a.applied_at DESC
                    "#,
                )
                .bind(applicant_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(applications)
    }

    /// Applications for one job. Callers must have resolved the job
    /// through the owner-folded lookup first.
    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationDetail>> {
        let applications = sqlx::query_as::<_, ApplicationDetail>(
            r#"
            SELECT a.id, a.job_id, j.title AS job_title, j.company_name,
                   j.posted_by AS job_posted_by, a.applicant_id,
                   u.username AS applicant_username, a.resume_path,
                   a.cover_letter, a.status, a.applied_at
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.applicant_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    /// Loads an application for review. A missing application is NotFound;
    /// an application on someone else's job is Forbidden, kept distinct so
    /// the caller renders the unauthorized page rather than a 404.
    pub async fn get_for_review(
        &self,
        employer_id: Uuid,
        application_id: Uuid,
    ) -> Result<ApplicationDetail> {
        let application = sqlx::query_as::<_, ApplicationDetail>(
            r#"
            SELECT a.id, a.job_id, j.title AS job_title, j.company_name,
                   j.posted_by AS job_posted_by, a.applicant_id,
                   u.username AS applicant_username, a.resume_path,
                   a.cover_letter, a.status, a.applied_at
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.applicant_id
            WHERE a.id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        let application =
            application.ok_or_else(|| Error::NotFound("application not found".to_string()))?;

        if application.job_posted_by != employer_id {
            return Err(Error::Forbidden(
                "only the employer who posted the job may review its applications".to_string(),
            ));
        }

        Ok(application)
    }

    /// Applies an employer's decision. Decisions only move a pending
    /// application to approved or rejected; anything else (an unknown
    /// decision value, or an application that is already decided) leaves
    /// the row untouched and returns its current state.
    pub async fn review(
        &self,
        employer_id: Uuid,
        application_id: Uuid,
        decision: &str,
    ) -> Result<ApplicationDetail> {
        let mut application = self.get_for_review(employer_id, application_id).await?;

        let Some(decision) = ReviewDecision::parse(decision) else {
            return Ok(application);
        };
        if application.status.is_decided() {
            return Ok(application);
        }

        let status = decision.status();
        sqlx::query("UPDATE applications SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(application.id)
            .execute(&self.pool)
            .await?;

        application.status = status;
        Ok(application)
    }
}
