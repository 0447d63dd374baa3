use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        CreateJobPayload, CreateJobResponse, EnhanceDescriptionPayload,
        EnhanceDescriptionResponse, JobListResponse, JobResponse, UpdateJobStatusPayload,
    },
    error::Result,
    middleware::auth::Claims,
    services::automation_service::JobDraft,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Listings owned by the caller", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_owned(claims.user_id()?).await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(JobListResponse { items }))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Listing created by the automation", body = Json<CreateJobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 502, description = "Create-job automation unreachable")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let user = state.auth_service.get_user(user_id).await?;

    let draft = JobDraft {
        job_prompt: payload.job_prompt,
        hr_user_id: user_id,
        company_name: user.company_name,
        education_required: payload.education_required,
        location_type: payload.location_type,
        expected_salary: payload.expected_salary,
        ranking_criteria: payload.ranking_criteria,
        interview_questions: payload.interview_questions,
    };
    let created = state.automation_service.create_job(&draft).await?;

    // The listing now exists regardless of what happens to the shortlink;
    // a failed insert leaves the id-based apply link as the only one.
    let short_id = match state
        .shortlink_service
        .create_for_listing(created.id)
        .await
    {
        Ok(link) => Some(link.id),
        Err(e) => {
            tracing::error!(
                "Shortlink insert failed for listing {}: {:?}",
                created.id,
                e
            );
            None
        }
    };

    let config = crate::config::get_config();
    let apply_url = format!("{}/apply?id={}", config.public_base_url, created.id);
    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            id: created.id,
            job_id: created.job_id,
            short_id,
            apply_url,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/jobs/enhance",
    request_body = EnhanceDescriptionPayload,
    responses(
        (status = 200, description = "Enhanced description", body = Json<EnhanceDescriptionResponse>),
        (status = 502, description = "Enhancement automation unreachable")
    )
)]
#[axum::debug_handler]
pub async fn enhance_description(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<EnhanceDescriptionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let user = state.auth_service.get_user(user_id).await?;
    let enhanced_jd = state
        .automation_service
        .enhance_description(&payload.job_description, &user.company_name, user_id)
        .await?;
    Ok(Json(EnhanceDescriptionResponse { enhanced_jd }))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Job listing ID")
    ),
    request_body = UpdateJobStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<JobResponse>),
        (status = 404, description = "Listing not found or not owned")
    )
)]
#[axum::debug_handler]
pub async fn update_job_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateJobStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state
        .job_service
        .update_status(id, claims.user_id()?, &payload.status)
        .await?;
    Ok(Json(JobResponse::from(job)))
}
