use crate::error::{Error, Result};
use crate::models::job_listing::{JobListing, STATUS_ACTIVE, STATUS_CLOSED};
use sqlx::PgPool;
use uuid::Uuid;

const LISTING_COLUMNS: &str = "id, job_id, job_profile, company_name, job_description, \
     education_required, location_type, expected_salary, ranking_criteria, \
     status, hr_user_id, created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All listings owned by one HR user, newest first.
    pub async fn list_owned(&self, hr_user_id: Uuid) -> Result<Vec<JobListing>> {
        let query = format!(
            "SELECT {} FROM job_listings WHERE hr_user_id = $1 ORDER BY created_at DESC",
            LISTING_COLUMNS
        );
        let jobs = sqlx::query_as::<_, JobListing>(&query)
            .bind(hr_user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn get_owned(&self, id: Uuid, hr_user_id: Uuid) -> Result<JobListing> {
        let query = format!(
            "SELECT {} FROM job_listings WHERE id = $1 AND hr_user_id = $2",
            LISTING_COLUMNS
        );
        let job = sqlx::query_as::<_, JobListing>(&query)
            .bind(id)
            .bind(hr_user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job listing not found".into()))?;
        Ok(job)
    }

    /// Lookup by the human job code, scoped to the owner. Used to anchor the
    /// shortlist and compare actions to a single job.
    pub async fn get_owned_by_job_code(&self, job_code: &str, hr_user_id: Uuid) -> Result<JobListing> {
        let query = format!(
            "SELECT {} FROM job_listings WHERE job_id = $1 AND hr_user_id = $2",
            LISTING_COLUMNS
        );
        let job = sqlx::query_as::<_, JobListing>(&query)
            .bind(job_code)
            .bind(hr_user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job listing not found".into()))?;
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<JobListing>> {
        let query = format!("SELECT {} FROM job_listings WHERE id = $1", LISTING_COLUMNS);
        let job = sqlx::query_as::<_, JobListing>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    /// Toggle Active/Closed. Any other requested status is refused; listings
    /// have no further lifecycle in this service.
    pub async fn update_status(&self, id: Uuid, hr_user_id: Uuid, status: &str) -> Result<JobListing> {
        if status != STATUS_ACTIVE && status != STATUS_CLOSED {
            return Err(Error::BadRequest(format!(
                "Unsupported job status: {}",
                status
            )));
        }
        self.get_owned(id, hr_user_id).await?;

        let query = format!(
            "UPDATE job_listings SET status = $1, updated_at = NOW() \
             WHERE id = $2 AND hr_user_id = $3 RETURNING {}",
            LISTING_COLUMNS
        );
        let job = sqlx::query_as::<_, JobListing>(&query)
            .bind(status)
            .bind(id)
            .bind(hr_user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    /// Two-step public resolution: direct listing id first, then shortlink
    /// target. Returns None when neither resolves.
    pub async fn resolve_apply_reference(&self, reference: &str) -> Result<Option<JobListing>> {
        if let Ok(id) = Uuid::parse_str(reference) {
            if let Some(job) = self.get_by_id(id).await? {
                return Ok(Some(job));
            }
        }

        let target = sqlx::query_scalar::<_, Uuid>(
            "SELECT job_listing_id FROM shortlinks WHERE id = $1",
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;

        match target {
            Some(job_listing_id) => self.get_by_id(job_listing_id).await,
            None => Ok(None),
        }
    }

    pub async fn get_by_job_code(&self, job_code: &str) -> Result<Option<JobListing>> {
        let query = format!("SELECT {} FROM job_listings WHERE job_id = $1", LISTING_COLUMNS);
        let job = sqlx::query_as::<_, JobListing>(&query)
            .bind(job_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }
}
