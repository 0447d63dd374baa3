use std::collections::HashMap;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::dashboard_dto::{ActivityEntry, DashboardStats, JobApplicantCount},
    error::Result,
    middleware::auth::Claims,
    models::analyzed_resume::CandidateStatus,
    AppState,
};

const RECENT_ACTIVITY_LIMIT: usize = 10;

/// All counters are derived from the same two collections the pipeline view
/// reads, so the dashboard and the candidate list can never disagree.
#[axum::debug_handler]
pub async fn stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_owned(claims.user_id()?).await?;
    let job_codes: Vec<String> = jobs.iter().map(|j| j.job_id.clone()).collect();
    let resumes = state
        .candidate_service
        .list_for_job_codes(&job_codes)
        .await?;

    let total_candidates = resumes.len();
    let shortlisted = resumes
        .iter()
        .filter(|r| r.workflow_status() == CandidateStatus::Shortlisted)
        .count();
    let active_jobs = jobs.iter().filter(|j| !j.is_closed()).count();

    let mut per_job: HashMap<&str, usize> = HashMap::new();
    for resume in &resumes {
        *per_job.entry(resume.job_id.as_str()).or_default() += 1;
    }
    let job_counts: Vec<JobApplicantCount> = jobs
        .iter()
        .map(|job| JobApplicantCount {
            job_id: job.job_id.clone(),
            job_profile: job.job_profile.clone(),
            status: job.status.clone(),
            applicants: per_job.get(job.job_id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    // Resumes arrive newest-first from the service.
    let recent_activity: Vec<ActivityEntry> = resumes
        .iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|r| ActivityEntry {
            candidate_id: r.id,
            candidate_name: r.name.clone(),
            job_id: r.job_id.clone(),
            status: r.workflow_status().as_str().to_string(),
            created_at: r.created_at,
        })
        .collect();

    Ok(Json(DashboardStats {
        total_candidates,
        active_jobs,
        shortlisted,
        pending: total_candidates - shortlisted,
        jobs: job_counts,
        recent_activity,
    }))
}
