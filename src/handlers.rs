use crate::cards::{build_overview, gender_cards};
use crate::demographics::aggregate;
use crate::errors::AppError;
use crate::models::{DemographicsResponse, OverviewResponse, StatusResponse};
use crate::state::{AppState, LoadState, Snapshot};
use crate::table::{
    demographic_columns, sort_rows, SortDirection, SortKey, SortSpec, DEFAULT_SORT,
};
use crate::ui::{render_demographics, render_index};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let company = match state.current().await {
        LoadState::Ready(snapshot) => snapshot
            .data
            .company_info
            .as_ref()
            .and_then(|info| info.name.clone()),
        _ => None,
    };
    Html(render_index(company.as_deref()))
}

pub async fn demographic_view() -> Html<String> {
    Html(render_demographics())
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.current().await.status())
}

pub async fn refresh(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.refresh().await.status())
}

/// The fetched document exactly as received.
pub async fn get_marketing(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = ready_snapshot(&state).await?;
    Ok(Json(snapshot.raw.clone()))
}

pub async fn get_overview(
    State(state): State<AppState>,
) -> Result<Json<OverviewResponse>, AppError> {
    let snapshot = ready_snapshot(&state).await?;
    Ok(Json(build_overview(&snapshot.data)))
}

pub async fn get_demographics(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Result<Json<DemographicsResponse>, AppError> {
    let requested = parse_sort(&query)?;
    let snapshot = ready_snapshot(&state).await?;

    let mut report = aggregate(&snapshot.data.campaigns);
    if let Some(spec) = requested {
        sort_rows(&mut report.rows, spec);
    }

    Ok(Json(DemographicsResponse {
        cards: gender_cards(&report.gender_totals),
        report,
        columns: demographic_columns(),
        sort: requested,
    }))
}

fn parse_sort(query: &SortQuery) -> Result<Option<SortSpec>, AppError> {
    let key = query
        .sort
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()
        .map_err(AppError::bad_request)?;
    let direction = query
        .dir
        .as_deref()
        .map(str::parse::<SortDirection>)
        .transpose()
        .map_err(AppError::bad_request)?;

    Ok(match (key, direction) {
        (None, None) => None,
        (key, direction) => Some(SortSpec {
            key: key.unwrap_or(DEFAULT_SORT.key),
            direction: direction.unwrap_or(SortDirection::Asc),
        }),
    })
}

async fn ready_snapshot(state: &AppState) -> Result<Arc<Snapshot>, AppError> {
    match state.current().await {
        LoadState::Ready(snapshot) => Ok(snapshot),
        LoadState::Loading => Err(AppError::unavailable("marketing data is still loading")),
        LoadState::Failed(message) => Err(AppError::bad_gateway(message)),
    }
}
