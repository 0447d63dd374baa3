use std::collections::HashSet;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        CandidateListQuery, CandidateListResponse, ComparePayload, CompareResponse,
        NotificationOutcome, ShortlistPayload, ShortlistResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    services::candidate_service::{
        check_compare_bounds, partition_for_shortlist, CandidateService, StatusFilter,
    },
    AppState,
};

/// Load contract of the pipeline view: jobs first, then resumes for the
/// owned job-code set, then applicant rows for the CV fallback join. A user
/// with no jobs short-circuits to an empty set.
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let filter = StatusFilter::parse(query.status.as_deref())?;
    let jobs = state.job_service.list_owned(claims.user_id()?).await?;
    if jobs.is_empty() {
        return Ok(Json(CandidateListResponse {
            items: Vec::new(),
            total: 0,
        }));
    }

    let job_codes: Vec<String> = match &query.job_id {
        Some(code) => {
            if !jobs.iter().any(|j| &j.job_id == code) {
                return Err(Error::NotFound("Job listing not found".into()));
            }
            vec![code.clone()]
        }
        None => jobs.iter().map(|j| j.job_id.clone()).collect(),
    };

    let resumes = state
        .candidate_service
        .list_for_job_codes(&job_codes)
        .await?;
    let applicants = state
        .applicant_service
        .list_for_job_codes(&job_codes)
        .await?;

    let mut items = CandidateService::with_cv_fallback(resumes, &applicants);
    items.retain(|c| filter.matches(c.status));
    let total = items.len();
    Ok(Json(CandidateListResponse { items, total }))
}

/// Shortlist & notify. Two composed mutations followed by one best-effort
/// notification: selected ids become `shortlisted`, the job's remaining
/// unscored candidates become `rejected`, then the notification webhook is
/// told whom to email. A notification failure is reported but never rolls
/// the committed status changes back.
#[axum::debug_handler]
pub async fn shortlist_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ShortlistPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state
        .job_service
        .get_owned_by_job_code(&payload.job_id, claims.user_id()?)
        .await?;

    let candidates = state
        .candidate_service
        .list_for_job_codes(&[job.job_id.clone()])
        .await?;
    let selected: HashSet<Uuid> = payload.candidate_ids.iter().copied().collect();

    let (to_shortlist, to_reject) = partition_for_shortlist(&candidates, &selected);
    if to_shortlist.len() != selected.len() {
        return Err(Error::BadRequest(
            "Selection contains candidates outside this job".into(),
        ));
    }

    state.candidate_service.shortlist(&to_shortlist).await?;
    tracing::debug!(
        "Sweeping {} unscored candidates of {} into rejected",
        to_reject.len(),
        job.job_id
    );
    let auto_rejected = state
        .candidate_service
        .auto_reject_unscored(&job.job_id, &to_shortlist)
        .await?;

    let emails: Vec<String> = candidates
        .iter()
        .filter(|c| selected.contains(&c.id))
        .filter_map(|c| c.email.clone())
        .collect();
    let notification = match state
        .automation_service
        .notify_shortlisted(&emails, &job.job_profile, &job.company_name)
        .await
    {
        Ok(()) => NotificationOutcome::Sent,
        Err(e) => {
            tracing::error!(
                "Shortlist notification failed after committed mutation for {}: {:?}",
                job.job_id,
                e
            );
            NotificationOutcome::Failed
        }
    };

    Ok(Json(ShortlistResponse {
        shortlisted: to_shortlist.len(),
        auto_rejected: auto_rejected as usize,
        notification,
    }))
}

/// Compare a bounded selection through the external comparison service.
/// Selections outside [2, 10] are refused before anything leaves this
/// process.
#[axum::debug_handler]
pub async fn compare_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ComparePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    check_compare_bounds(payload.candidate_ids.len())?;

    let job = state
        .job_service
        .get_owned_by_job_code(&payload.job_id, claims.user_id()?)
        .await?;
    let candidates = state
        .candidate_service
        .get_by_ids(&payload.candidate_ids)
        .await?;
    if candidates.len() != payload.candidate_ids.len()
        || candidates.iter().any(|c| c.job_id != job.job_id)
    {
        return Err(Error::BadRequest(
            "Selection contains candidates outside this job".into(),
        ));
    }

    let rankings = state
        .automation_service
        .compare_candidates(&job, &candidates)
        .await?;
    Ok(Json(CompareResponse { rankings }))
}
