use std::collections::{HashMap, HashSet};

use crate::dto::candidate_dto::CandidateResponse;
use crate::error::{Error, Result};
use crate::models::analyzed_resume::{AnalyzedResume, CandidateStatus};
use crate::models::applicant::Applicant;
use sqlx::PgPool;
use uuid::Uuid;

pub const COMPARE_MIN_SELECTION: usize = 2;
pub const COMPARE_MAX_SELECTION: usize = 10;

const RESUME_COLUMNS: &str = "id, job_id, name, phone, city, email, educational_details, \
     job_history, skills, summarize, vote, consideration, status, cv_url, created_at";

/// Status filter of the pipeline view. `New` matches rows whose status
/// column is empty or absent as well as the literal "new".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    New,
    Shortlisted,
    Rejected,
    Interviewed,
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some("all") => Ok(StatusFilter::All),
            Some("new") => Ok(StatusFilter::New),
            Some("shortlisted") => Ok(StatusFilter::Shortlisted),
            Some("rejected") => Ok(StatusFilter::Rejected),
            Some("interviewed") => Ok(StatusFilter::Interviewed),
            Some(other) => Err(Error::BadRequest(format!(
                "Unknown status filter: {}",
                other
            ))),
        }
    }

    pub fn matches(&self, status: CandidateStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::New => status == CandidateStatus::New,
            StatusFilter::Shortlisted => status == CandidateStatus::Shortlisted,
            StatusFilter::Rejected => status == CandidateStatus::Rejected,
            StatusFilter::Interviewed => status == CandidateStatus::Interviewed,
        }
    }
}

/// Split one job's candidate set for the shortlist action: the selected ids
/// go to `shortlisted`, and of the rest only still-unscored candidates are
/// swept into `auto_rejected`. Previously interviewed or already-rejected
/// rows are left untouched.
pub fn partition_for_shortlist(
    candidates: &[AnalyzedResume],
    selected: &HashSet<Uuid>,
) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut shortlisted = Vec::new();
    let mut auto_rejected = Vec::new();
    for candidate in candidates {
        if selected.contains(&candidate.id) {
            shortlisted.push(candidate.id);
        } else if candidate.is_unscored() {
            auto_rejected.push(candidate.id);
        }
    }
    (shortlisted, auto_rejected)
}

/// Ids visible under the active filter; "select all" operates on exactly
/// this set, never on the full unfiltered collection.
pub fn visible_ids(candidates: &[AnalyzedResume], filter: StatusFilter) -> Vec<Uuid> {
    candidates
        .iter()
        .filter(|c| filter.matches(c.workflow_status()))
        .map(|c| c.id)
        .collect()
}

pub fn check_compare_bounds(selection_len: usize) -> Result<()> {
    if !(COMPARE_MIN_SELECTION..=COMPARE_MAX_SELECTION).contains(&selection_len) {
        return Err(Error::BadRequest(format!(
            "Comparison requires between {} and {} selected candidates, got {}",
            COMPARE_MIN_SELECTION, COMPARE_MAX_SELECTION, selection_len
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_job_codes(&self, job_codes: &[String]) -> Result<Vec<AnalyzedResume>> {
        // An empty code set short-circuits; `= ANY('{}')` would be a valid
        // query but the caller has nothing to see.
        if job_codes.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {} FROM ai_analysed_resume WHERE job_id = ANY($1) ORDER BY created_at DESC",
            RESUME_COLUMNS
        );
        let resumes = sqlx::query_as::<_, AnalyzedResume>(&query)
            .bind(job_codes)
            .fetch_all(&self.pool)
            .await?;
        Ok(resumes)
    }

    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<AnalyzedResume>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {} FROM ai_analysed_resume WHERE id = ANY($1)",
            RESUME_COLUMNS
        );
        let resumes = sqlx::query_as::<_, AnalyzedResume>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(resumes)
    }

    /// Join analyzed resumes with applicant rows to recover a CV link where
    /// the resume row's own reference is blank. Join key is the exact
    /// `(email, job_id)` pair.
    pub fn with_cv_fallback(
        resumes: Vec<AnalyzedResume>,
        applicants: &[Applicant],
    ) -> Vec<CandidateResponse> {
        let cv_by_key: HashMap<(&str, &str), &str> = applicants
            .iter()
            .map(|a| ((a.email.as_str(), a.job_id.as_str()), a.cv_url.as_str()))
            .collect();

        resumes
            .into_iter()
            .map(|resume| {
                let fallback = resume
                    .email
                    .as_deref()
                    .and_then(|email| cv_by_key.get(&(email, resume.job_id.as_str())))
                    .map(|url| url.to_string());
                CandidateResponse::from_resume(resume, fallback)
            })
            .collect()
    }

    /// Phase one of the shortlist action: flip the selected ids. Returns the
    /// number of rows actually updated.
    pub async fn shortlist(&self, ids: &[Uuid]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = sqlx::query("UPDATE ai_analysed_resume SET status = 'shortlisted' WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    /// Phase two: sweep the rest of the job's still-unscored candidates into
    /// `rejected`. Candidates already interviewed or rejected keep their
    /// state.
    pub async fn auto_reject_unscored(&self, job_code: &str, excluded: &[Uuid]) -> Result<u64> {
        let res = sqlx::query(
            "UPDATE ai_analysed_resume SET status = 'rejected' \
             WHERE job_id = $1 \
               AND NOT (id = ANY($2)) \
               AND (status IS NULL OR btrim(status) = '' OR status = 'new')",
        )
        .bind(job_code)
        .bind(excluded)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(id: Uuid, status: Option<&str>) -> AnalyzedResume {
        AnalyzedResume {
            id,
            job_id: "JOB-1".into(),
            name: None,
            phone: None,
            city: None,
            email: Some(format!("{}@example.com", id)),
            educational_details: None,
            job_history: None,
            skills: None,
            summarize: None,
            vote: None,
            consideration: None,
            status: status.map(Into::into),
            cv_url: None,
            created_at: None,
        }
    }

    #[test]
    fn filter_new_matches_empty_and_absent_status() {
        let filter = StatusFilter::parse(Some("new")).unwrap();
        for raw in [None, Some(""), Some("new")] {
            assert!(filter.matches(resume(Uuid::new_v4(), raw).workflow_status()));
        }
        assert!(!filter.matches(resume(Uuid::new_v4(), Some("rejected")).workflow_status()));
    }

    #[test]
    fn unknown_filter_is_refused() {
        assert!(StatusFilter::parse(Some("archived")).is_err());
        assert_eq!(StatusFilter::parse(None).unwrap(), StatusFilter::All);
    }

    #[test]
    fn shortlist_partition_leaves_scored_candidates_untouched() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let candidates = vec![
            resume(a, Some("new")),
            resume(b, None),
            resume(c, Some("interviewed")),
        ];
        let selected: HashSet<Uuid> = [a].into_iter().collect();

        let (shortlisted, auto_rejected) = partition_for_shortlist(&candidates, &selected);
        assert_eq!(shortlisted, vec![a]);
        assert_eq!(auto_rejected, vec![b]);
    }

    #[test]
    fn already_rejected_candidates_are_not_swept_again() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let candidates = vec![resume(a, Some("rejected")), resume(b, Some("new"))];
        let selected: HashSet<Uuid> = [b].into_iter().collect();

        let (shortlisted, auto_rejected) = partition_for_shortlist(&candidates, &selected);
        assert_eq!(shortlisted, vec![b]);
        assert!(auto_rejected.is_empty());
    }

    #[test]
    fn select_all_is_scoped_to_the_active_filter() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let candidates = vec![
            resume(a, Some("shortlisted")),
            resume(b, None),
            resume(c, Some("new")),
        ];

        let under_new = visible_ids(&candidates, StatusFilter::New);
        assert_eq!(under_new, vec![b, c]);

        // Changing the filter afterwards yields a different visible set but
        // does not mutate the previously captured selection.
        let under_all = visible_ids(&candidates, StatusFilter::All);
        assert_eq!(under_all, vec![a, b, c]);
        assert_eq!(under_new, vec![b, c]);
    }

    #[test]
    fn compare_bounds_are_inclusive_two_to_ten() {
        assert!(check_compare_bounds(1).is_err());
        assert!(check_compare_bounds(2).is_ok());
        assert!(check_compare_bounds(5).is_ok());
        assert!(check_compare_bounds(10).is_ok());
        assert!(check_compare_bounds(11).is_err());
    }
}
