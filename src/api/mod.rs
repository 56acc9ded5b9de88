//! HTTP API.

mod error;

pub use error::ErrorBody;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::{
    AnalysisResult, AnalyzeRequest, CachedRepository, Issue, RepoName, ScanRequest, ScanResult,
};
use crate::scanner::INVALID_REPO_MESSAGE;
use crate::services::Services;

pub fn create_router(services: Services) -> Router {
    Router::new()
        .route("/api/scan", post(scan))
        .route("/api/analyze", post(analyze))
        .route("/api/repos", get(list_repositories))
        .route("/api/issues", get(list_issues))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(services)
}

async fn scan(
    State(services): State<Services>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResult>, AppError> {
    let Json(req) = payload?;
    let result = services
        .scanner
        .scan(req.repo.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(result))
}

async fn analyze(
    State(services): State<Services>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(req) = payload?;
    let result = services
        .analyzer
        .analyze(
            req.repo.as_deref().unwrap_or_default(),
            req.prompt.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(result))
}

async fn list_repositories(
    State(services): State<Services>,
) -> Result<Json<Vec<CachedRepository>>, AppError> {
    let repos = services
        .db
        .list_repositories()
        .map_err(|e| AppError::persistence("Failed to list cached repositories", e))?;
    Ok(Json(repos))
}

#[derive(Debug, Deserialize)]
struct IssuesQuery {
    repo: Option<String>,
}

async fn list_issues(
    State(services): State<Services>,
    Query(query): Query<IssuesQuery>,
) -> Result<Json<Vec<Issue>>, AppError> {
    let repo = query
        .repo
        .as_deref()
        .and_then(RepoName::parse)
        .ok_or_else(|| AppError::InvalidInput(INVALID_REPO_MESSAGE.to_string()))?;
    let issues = services
        .db
        .get_issues_for_repo(repo.as_str())
        .map_err(|e| AppError::persistence("Failed to fetch cached issues", e))?;
    Ok(Json(issues))
}
