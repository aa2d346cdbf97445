//! HTTP handlers for the REST API.
//!
//! Each handler resolves its query against the configuration, then runs the
//! pipeline on the blocking pool through the service layer.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use std::path::PathBuf;

use super::dto::{HealthResponse, OccupancyQuery};
use super::error::AppError;
use super::state::AppState;
use crate::api::{OccupancyData, PivotMatrix, TimelineSeries, Weekday};
use crate::config::validate_zmax;
use crate::pipeline::timeline_for;
use crate::services::{self, RenderOptions};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Query after defaults and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
    pub path: PathBuf,
    pub filter_open: bool,
    pub zmax: f64,
    pub weekday: Option<Weekday>,
}

/// Apply configuration defaults to `query` and validate it.
pub fn resolve_query(state: &AppState, query: OccupancyQuery) -> Result<ResolvedQuery, AppError> {
    let config = &state.config;

    let path = match query.path {
        Some(p) if !config.allow_source_override => {
            return Err(AppError::BadRequest(format!(
                "Source override is disabled; cannot read '{}'",
                p
            )));
        }
        Some(p) => PathBuf::from(p),
        None => config.data_path.clone(),
    };

    let zmax = query.zmax.unwrap_or(config.zmax);
    validate_zmax(zmax)?;

    let weekday = query
        .weekday
        .map(|w| w.parse::<Weekday>())
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(ResolvedQuery {
        path,
        filter_open: query.filter_open.unwrap_or(config.filter_open_hours),
        zmax,
        weekday,
    })
}

async fn run_pipeline(state: &AppState, query: &ResolvedQuery) -> Result<OccupancyData, AppError> {
    let cache = state.cache.clone();
    let options = state.config.loader_options();
    let path = query.path.clone();
    let filter_open = query.filter_open;

    let data = tokio::task::spawn_blocking(move || {
        services::load_occupancy(&path, &options, filter_open, Some(&cache))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(data)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_path: state.config.data_path.display().to_string(),
    }))
}

// =============================================================================
// Occupancy Endpoints
// =============================================================================

/// GET /v1/occupancy
///
/// Heatmap matrix, full timeline and summary in one payload.
pub async fn get_occupancy(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> HandlerResult<OccupancyData> {
    let resolved = resolve_query(&state, query)?;
    let data = run_pipeline(&state, &resolved).await?;
    Ok(Json(data))
}

/// GET /v1/occupancy/heatmap
pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> HandlerResult<PivotMatrix> {
    let resolved = resolve_query(&state, query)?;
    let data = run_pipeline(&state, &resolved).await?;
    Ok(Json(data.heatmap))
}

/// GET /v1/occupancy/timeline
///
/// Aggregate rows of one weekday (Monday when unspecified), by time of day.
pub async fn get_timeline(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> HandlerResult<TimelineSeries> {
    let resolved = resolve_query(&state, query)?;
    let weekday = resolved.weekday.unwrap_or(Weekday::Monday);
    let data = run_pipeline(&state, &resolved).await?;

    Ok(Json(TimelineSeries {
        weekday,
        points: timeline_for(&data.timeline, weekday),
    }))
}

// =============================================================================
// Dashboard Page
// =============================================================================

/// GET /v1/dashboard
///
/// Rendered HTML page. Without `weekday` the timeline shows every day.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> Result<Html<String>, AppError> {
    let resolved = resolve_query(&state, query)?;
    let data = run_pipeline(&state, &resolved).await?;
    let opts = RenderOptions {
        zmax: resolved.zmax,
        percent_scale: state.config.percent_scale,
    };
    Ok(Html(services::render_dashboard(
        &data,
        resolved.weekday,
        &opts,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use axum::http::StatusCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "Timestamp,percent_filled\n\
                       2024-01-01 07:03:00,0.5\n\
                       2024-01-01 07:03:00,0.7\n\
                       2024-01-06 18:00:00,0.9\n";

    fn state_for(file: &NamedTempFile) -> AppState {
        AppState::new(DashboardConfig {
            data_path: file.path().to_path_buf(),
            ..Default::default()
        })
    }

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_resolve_query_defaults() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let resolved = resolve_query(&state, OccupancyQuery::default()).unwrap();
        assert_eq!(resolved.path, file.path());
        assert!(resolved.filter_open);
        assert_eq!(resolved.zmax, 120.0);
        assert_eq!(resolved.weekday, None);
    }

    #[test]
    fn test_resolve_query_rejects_path_override() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let query = OccupancyQuery {
            path: Some("/etc/passwd".to_string()),
            ..Default::default()
        };
        let err = resolve_query(&state, query).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_resolve_query_rejects_bad_zmax_and_weekday() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let zmax = OccupancyQuery {
            zmax: Some(200.0),
            ..Default::default()
        };
        assert!(matches!(resolve_query(&state, zmax), Err(AppError::BadRequest(_))));

        let weekday = OccupancyQuery {
            weekday: Some("Caturday".to_string()),
            ..Default::default()
        };
        assert!(matches!(resolve_query(&state, weekday), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_get_occupancy() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let Json(data) = get_occupancy(State(state), Query(OccupancyQuery::default()))
            .await
            .unwrap();
        assert_eq!(data.timeline.len(), 1);
        assert_eq!(data.timeline[0].bucket_label, "07:00");
        assert!((data.timeline[0].avg_fill - 0.6).abs() < 1e-12);
        assert_eq!(data.summary.samples_used, 2);
    }

    #[tokio::test]
    async fn test_get_occupancy_unfiltered_keeps_saturday_close() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let query = OccupancyQuery {
            filter_open: Some(false),
            ..Default::default()
        };
        let Json(data) = get_occupancy(State(state), Query(query)).await.unwrap();
        assert_eq!(data.timeline.len(), 2);
        assert_eq!(data.timeline[1].weekday, Weekday::Saturday);
    }

    #[tokio::test]
    async fn test_get_timeline_defaults_to_monday() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let Json(series) = get_timeline(State(state), Query(OccupancyQuery::default()))
            .await
            .unwrap();
        assert_eq!(series.weekday, Weekday::Monday);
        assert_eq!(series.points.len(), 1);
    }

    #[tokio::test]
    async fn test_get_heatmap_has_seven_rows() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let Json(matrix) = get_heatmap(State(state), Query(OccupancyQuery::default()))
            .await
            .unwrap();
        assert_eq!(matrix.values.len(), 7);
        assert!(matrix.row(Weekday::Saturday).iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn test_all_filtered_is_no_data() {
        let file = csv_file("Timestamp,percent_filled\n2024-01-06 18:00:00,0.9\n");
        let state = state_for(&file);
        let err = get_occupancy(State(state), Query(OccupancyQuery::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoData(_)));
    }

    #[tokio::test]
    async fn test_missing_source_is_not_found() {
        let state = AppState::new(DashboardConfig {
            data_path: PathBuf::from("/no/such/source.csv"),
            ..Default::default()
        });
        let err = get_heatmap(State(state), Query(OccupancyQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_dashboard_html() {
        let file = csv_file(CSV);
        let state = state_for(&file);
        let query = OccupancyQuery {
            zmax: Some(100.0),
            ..Default::default()
        };
        let Html(body) = get_dashboard(State(state), Query(query)).await.unwrap();
        assert!(body.contains("RSF Gym Occupancy Dashboard"));
        assert!(body.contains("\"zmax\":100.0"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = AppState::new(DashboardConfig::default());
        let Json(health) = health_check(State(state)).await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.data_path, "scraped_data2.csv");
    }
}
