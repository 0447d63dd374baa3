use crate::error::Result;
use crate::models::applicant::Applicant;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ApplicantService {
    pool: PgPool,
}

impl ApplicantService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert-only: resubmission creates a new row, there is no duplicate
    /// guard.
    pub async fn create(
        &self,
        job_code: &str,
        name: &str,
        email: &str,
        cv_url: &str,
    ) -> Result<Applicant> {
        let applicant = sqlx::query_as::<_, Applicant>(
            "INSERT INTO applicants (job_id, name, email, cv_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, job_id, name, email, cv_url, created_at",
        )
        .bind(job_code)
        .bind(name)
        .bind(email)
        .bind(cv_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(applicant)
    }

    pub async fn list_for_job_codes(&self, job_codes: &[String]) -> Result<Vec<Applicant>> {
        if job_codes.is_empty() {
            return Ok(Vec::new());
        }
        let applicants = sqlx::query_as::<_, Applicant>(
            "SELECT id, job_id, name, email, cv_url, created_at \
             FROM applicants WHERE job_id = ANY($1)",
        )
        .bind(job_codes)
        .fetch_all(&self.pool)
        .await?;
        Ok(applicants)
    }
}
