//! Axum route handlers for the Jobs API.
//!
//! Each handler is registered under both the bare and the `/api` prefix.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::db::DbConn;
use crate::errors::AppError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::jobs::store;
use crate::models::job::{Job, JobPatch, ListParams, NewJob};
use crate::state::AppState;

/// GET /jobs/
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Vec<Job>>, AppError> {
    let (limit, offset) = params.window(state.config.max_page_size)?;
    let jobs = store::list(&mut conn, &params.search, limit, offset).await?;
    Ok(Json(jobs))
}

/// POST /jobs/post/
pub async fn handle_create_job(
    DbConn(mut conn): DbConn,
    JsonBody(payload): JsonBody<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let draft = payload.validate()?;
    let today = chrono::Local::now().date_naive();

    let job = store::create(&mut conn, draft, today).await?;
    info!("Created job {} ({} at {})", job.id, job.title, job.company);

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /jobs/:id/
pub async fn handle_get_job(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Job>, AppError> {
    let job = store::get(&mut conn, id)
        .await?
        .ok_or_else(AppError::job_not_found)?;
    Ok(Json(job))
}

/// PUT /jobs/:id/
///
/// Only the keys present in the body change; `id` and `date_posted` never do.
pub async fn handle_update_job(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
    JsonBody(patch): JsonBody<JobPatch>,
) -> Result<Json<Job>, AppError> {
    if store::get(&mut conn, id).await?.is_none() {
        return Err(AppError::job_not_found());
    }

    let assignments = patch.into_assignments()?;
    let changed = assignments.len();
    let job = store::update(&mut conn, id, assignments)
        .await?
        .ok_or_else(AppError::job_not_found)?;

    if changed > 0 {
        info!("Updated {changed} field(s) of job {id}");
    }
    Ok(Json(job))
}

/// DELETE /jobs/:id/
pub async fn handle_delete_job(
    PathParam(id): PathParam<i64>,
    DbConn(mut conn): DbConn,
) -> Result<Json<Value>, AppError> {
    if !store::delete(&mut conn, id).await? {
        return Err(AppError::job_not_found());
    }

    info!("Deleted job {id}");
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
