use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use bytes::Bytes;

use crate::{
    dto::apply_dto::{ApplyPageState, ApplyResponse},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/public/jobs/{reference}",
    params(
        ("reference" = String, Path, description = "Listing ID or shortlink ID")
    ),
    responses(
        (status = 200, description = "Resolution state of the apply page", body = Json<ApplyPageState>)
    )
)]
#[axum::debug_handler]
pub async fn resolve_job(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.resolve_apply_reference(&reference).await?;
    Ok(Json(ApplyPageState::from_lookup(job)))
}

struct ApplicationForm {
    job_id: String,
    name: String,
    email: String,
    cv_filename: String,
    cv_data: Bytes,
}

async fn read_application_form(mut multipart: Multipart) -> Result<ApplicationForm> {
    let mut job_id = None;
    let mut name = None;
    let mut email = None;
    let mut cv = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "job_id" => job_id = Some(field.text().await?),
            "name" => name = Some(field.text().await?),
            "email" => email = Some(field.text().await?),
            "cv" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| Error::BadRequest("CV file has no filename".into()))?;
                cv = Some((filename, field.bytes().await?));
            }
            _ => {}
        }
    }

    let job_id = job_id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::BadRequest("Missing job_id".into()))?;
    let name = name
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::BadRequest("Missing name".into()))?;
    let email = email
        .filter(|v| !v.trim().is_empty() && v.contains('@'))
        .ok_or_else(|| Error::BadRequest("Missing or invalid email".into()))?;
    let (cv_filename, cv_data) =
        cv.ok_or_else(|| Error::BadRequest("Missing CV file".into()))?;
    if cv_data.is_empty() {
        return Err(Error::BadRequest("CV file is empty".into()));
    }

    Ok(ApplicationForm {
        job_id,
        name,
        email,
        cv_filename,
        cv_data,
    })
}

#[utoipa::path(
    post,
    path = "/api/public/apply",
    responses(
        (status = 201, description = "Application stored", body = Json<ApplyResponse>),
        (status = 400, description = "Invalid form or closed listing"),
        (status = 404, description = "Unknown job")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_application_form(multipart).await?;

    let job = state
        .job_service
        .get_by_job_code(&form.job_id)
        .await?
        .ok_or_else(|| Error::NotFound("Job listing not found".into()))?;
    if job.is_closed() {
        return Err(Error::BadRequest(
            "This position is no longer accepting applications".into(),
        ));
    }

    let stored = state
        .storage_service
        .store_cv(&job.job_id, &form.cv_filename, &form.cv_data)
        .await?;
    let applicant = state
        .applicant_service
        .create(&job.job_id, &form.name, &form.email, &stored.public_url)
        .await?;

    // The applicant row is committed at this point; a failed forward is
    // reported, not rolled back.
    let analysis_forwarded = match state
        .automation_service
        .forward_application(
            &job,
            &form.name,
            &form.email,
            &stored.public_url,
            &form.cv_filename,
            &form.cv_data,
        )
        .await
    {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                "Resume analyzer forward failed for applicant {}: {:?}",
                applicant.id,
                e
            );
            false
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            id: applicant.id,
            status: "received".to_string(),
            analysis_forwarded,
        }),
    ))
}
