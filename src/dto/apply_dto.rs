use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::job_listing::JobListing;

/// Resolution outcome of the public apply page. Not-found and closed are
/// terminal states of the page, not errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ApplyPageState {
    NotFound,
    Closed,
    Open { job: PublicJob },
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicJob {
    pub id: Uuid,
    pub job_id: String,
    pub job_profile: String,
    pub company_name: String,
    pub job_description: String,
}

impl ApplyPageState {
    pub fn from_lookup(job: Option<JobListing>) -> Self {
        match job {
            None => ApplyPageState::NotFound,
            Some(job) if job.is_closed() => ApplyPageState::Closed,
            Some(job) => ApplyPageState::Open {
                job: PublicJob {
                    id: job.id,
                    job_id: job.job_id,
                    job_profile: job.job_profile,
                    company_name: job.company_name,
                    job_description: job.job_description,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyResponse {
    pub id: Uuid,
    pub status: String,
    /// False when the applicant row committed but the analyzer forward
    /// failed; the submission itself still succeeded.
    pub analysis_forwarded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_listing::{STATUS_ACTIVE, STATUS_CLOSED};

    fn listing(status: &str) -> JobListing {
        JobListing {
            id: Uuid::new_v4(),
            job_id: "JOB-42".into(),
            job_profile: "Backend Engineer".into(),
            company_name: "Acme".into(),
            job_description: "Build things".into(),
            education_required: None,
            location_type: None,
            expected_salary: None,
            ranking_criteria: None,
            status: status.into(),
            hr_user_id: Uuid::new_v4(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn missing_listing_is_not_found() {
        assert!(matches!(
            ApplyPageState::from_lookup(None),
            ApplyPageState::NotFound
        ));
    }

    #[test]
    fn closed_listing_resolves_to_closed_even_though_row_exists() {
        assert!(matches!(
            ApplyPageState::from_lookup(Some(listing(STATUS_CLOSED))),
            ApplyPageState::Closed
        ));
    }

    #[test]
    fn active_listing_is_open_with_public_fields() {
        match ApplyPageState::from_lookup(Some(listing(STATUS_ACTIVE))) {
            ApplyPageState::Open { job } => {
                assert_eq!(job.job_id, "JOB-42");
                assert_eq!(job.company_name, "Acme");
            }
            other => panic!("expected open state, got {:?}", other),
        }
    }
}
