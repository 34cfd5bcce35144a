//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Local;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::domain::DomainError;
use crate::export::{RECEIPT_FILENAME, render_receipt};
use crate::favorites::FavoriteEntry;
use crate::planner::{PlanError, Planner, RouteRequest, Trip};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Message shown when no route connects the chosen stops.
pub const NO_PATH_MESSAGE: &str = "No path found between the selected stations.";

/// Message shown when source and destination are the same.
pub const SAME_STOP_MESSAGE: &str = "Source and destination cannot be the same!";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/stops/:name", get(describe_stop))
        .route("/route", get(plan_route))
        .route("/route/export", get(export_route))
        .route("/favorites", get(list_favorites).post(save_favorite))
        .route("/favorites/:index", get(show_favorite))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let stops = state
        .network
        .stops()
        .iter()
        .map(|s| StopView::from_result(&StopResult::from_stop(s)))
        .collect();

    let template = IndexTemplate {
        stops,
        metrics: MetricView::all(),
    };
    render(&template).map(Html)
}

/// List every stop with its line and position.
async fn list_stops(State(state): State<AppState>) -> Json<StopsResponse> {
    let stops = state
        .network
        .stops()
        .iter()
        .map(StopResult::from_stop)
        .collect();

    Json(StopsResponse { stops })
}

/// Line and position of one stop.
async fn describe_stop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StopResult>, AppError> {
    let stop = state
        .network
        .describe_stop(&name)
        .map_err(|_| AppError::NotFound {
            message: format!("Unknown station: {name}"),
        })?;

    Ok(Json(StopResult::from_stop(stop)))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a trip for a query.
fn plan(state: &AppState, query: &RouteQuery) -> Result<Trip, AppError> {
    let request = RouteRequest::new(&query.source, &query.destination, query.metric());
    Planner::new(&state.network)
        .plan(&request, &state.fare)
        .map_err(AppError::from)
}

/// Compute a route between two stops.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);

    let trip = match plan(&state, &query) {
        Ok(trip) => trip,
        // Expected outcomes become a notice in the page rather than an error.
        Err(e) if html => return Ok(e.into_notice()),
        Err(e) => return Err(e),
    };

    let result = RouteResult::from_trip(&state.network, &trip, &state.fare)?;

    if html {
        let template = RouteResultTemplate {
            trip: TripView::from_result(&result),
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        Ok(Json(result).into_response())
    }
}

/// Download a plain-text receipt for a route.
async fn export_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let trip = plan(&state, &query)?;
    let receipt = render_receipt(&trip.route, trip.metric, &trip.metrics, &state.fare);

    let disposition = format!("attachment; filename=\"{RECEIPT_FILENAME}\"");
    let mut response = receipt.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}

/// Save the route for a query to favourites.
///
/// The route is recomputed server-side so the saved snapshot always matches
/// the network.
async fn save_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(query): Form<RouteQuery>,
) -> Result<Response, AppError> {
    let trip = plan(&state, &query)?;
    let entry = FavoriteEntry::from_trip(&trip, Local::now());
    let summary = entry.summary();
    let index = state.favorites.append(entry).await;

    info!(index, %summary, "saved favorite");

    if accepts_html(&headers) {
        Ok(Redirect::to(&format!("/favorites/{index}")).into_response())
    } else {
        Ok((StatusCode::CREATED, Json(SaveFavoriteResponse { index })).into_response())
    }
}

/// List saved favourites.
async fn list_favorites(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let favorites = state
        .favorites
        .list()
        .await
        .iter()
        .enumerate()
        .map(|(i, entry)| FavoriteResult::from_entry(&state.network, i, entry, &state.fare))
        .collect::<Result<Vec<_>, _>>()?;

    if accepts_html(&headers) {
        let template = FavoritesTemplate {
            favorites: favorites.iter().map(FavoriteView::from_result).collect(),
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        Ok(Json(FavoritesResponse { favorites }).into_response())
    }
}

/// Show one saved favourite.
async fn show_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(index): Path<usize>,
) -> Result<Response, AppError> {
    let entry = state
        .favorites
        .get(index)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("No saved route {index}"),
        })?;

    let favorite = FavoriteResult::from_entry(&state.network, index, &entry, &state.fare)?;

    if accepts_html(&headers) {
        let template = FavoriteDetailTemplate {
            favorite: FavoriteView::from_result(&favorite),
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        Ok(Json(favorite).into_response())
    }
}

fn render(template: &impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug, PartialEq)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        }
    }

    /// Render as an HTML notice fragment, keeping the status code.
    fn into_notice(self) -> Response {
        let status = self.status();
        let kind = if status.is_server_error() {
            error!("[{status}] {}", self.message());
            "error"
        } else {
            "warning"
        };

        let template = NoticeTemplate {
            kind,
            message: self.message().to_string(),
        };
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => (status, format!("Template error: {}", e)).into_response(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::UnknownStop(name) => AppError::BadRequest {
                message: format!("Unknown station: {name}"),
            },
            PlanError::SameStop(_) => AppError::BadRequest {
                message: SAME_STOP_MESSAGE.to_string(),
            },
            PlanError::NoPath { .. } => AppError::NotFound {
                message: NO_PATH_MESSAGE.to_string(),
            },
            PlanError::Internal(e) => AppError::from(e),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.message().to_string();

        if status.is_server_error() {
            error!("[{status}] {message}");
        } else {
            warn!("[{status}] {message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Metric, StopId};
    use crate::network::{NetworkBuilder, hyderabad_metro};
    use crate::planner::FareConfig;

    fn state() -> AppState {
        AppState::new(hyderabad_metro().unwrap(), FareConfig::default())
    }

    fn query(source: &str, destination: &str, metric: Metric) -> RouteQuery {
        RouteQuery {
            source: source.into(),
            destination: destination.into(),
            metric: Some(metric),
        }
    }

    fn html_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers
    }

    #[test]
    fn accepts_html_header() {
        assert!(accepts_html(&html_headers()));
        assert!(!accepts_html(&HeaderMap::new()));
    }

    #[test]
    fn plan_error_mapping() {
        let id = StopId::parse("A").unwrap();

        assert_eq!(
            AppError::from(PlanError::NoPath {
                from: id.clone(),
                to: StopId::parse("B").unwrap(),
            }),
            AppError::NotFound {
                message: NO_PATH_MESSAGE.into()
            }
        );
        assert_eq!(
            AppError::from(PlanError::SameStop(id)),
            AppError::BadRequest {
                message: SAME_STOP_MESSAGE.into()
            }
        );
        assert_eq!(
            AppError::from(PlanError::UnknownStop("Z".into())),
            AppError::BadRequest {
                message: "Unknown station: Z".into()
            }
        );
        assert_eq!(
            AppError::from(PlanError::Internal(DomainError::InvalidRoute("x".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn plan_route_json() {
        let response = plan_route(
            State(state()),
            HeaderMap::new(),
            Query(query("Miyapur", "Charminar", Metric::Distance)),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn plan_route_same_stop_is_bad_request() {
        let err = plan_route(
            State(state()),
            HeaderMap::new(),
            Query(query("JNTU", "JNTU", Metric::Time)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn plan_route_no_path_renders_notice_for_html() {
        let network = NetworkBuilder::new()
            .stop("A", "Red", (0.0, 0.0))
            .stop("B", "Red", (0.0, 1.0))
            .build()
            .unwrap();
        let state = AppState::new(network, FareConfig::default());

        let response = plan_route(
            State(state.clone()),
            html_headers(),
            Query(query("A", "B", Metric::Distance)),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err = plan_route(
            State(state),
            HeaderMap::new(),
            Query(query("A", "B", Metric::Distance)),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            AppError::NotFound {
                message: NO_PATH_MESSAGE.into()
            }
        );
    }

    #[tokio::test]
    async fn export_sets_download_headers() {
        let response = export_route(
            State(state()),
            Query(query("Ameerpet", "Paradise", Metric::Time)),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"metro_route.txt\""
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn save_then_show_favorite() {
        let state = state();

        let response = save_favorite(
            State(state.clone()),
            HeaderMap::new(),
            Form(query("KPHB", "Begumpet", Metric::Distance)),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(state.favorites.len().await, 1);

        let response = save_favorite(
            State(state.clone()),
            html_headers(),
            Form(query("KPHB", "Begumpet", Metric::Distance)),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/favorites/1");

        let response = show_favorite(State(state.clone()), html_headers(), Path(1))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let err = show_favorite(State(state), HeaderMap::new(), Path(7))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn failed_save_leaves_log_untouched() {
        let state = state();

        let err = save_favorite(
            State(state.clone()),
            HeaderMap::new(),
            Form(query("KPHB", "Atlantis", Metric::Distance)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(state.favorites.is_empty().await);
    }

    #[tokio::test]
    async fn describe_unknown_stop() {
        let err = describe_stop(State(state()), Path("Atlantis".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let Json(stop) = describe_stop(State(state()), Path("Paradise".to_string()))
            .await
            .unwrap();
        assert_eq!(stop.line, "Green");
    }

    #[tokio::test]
    async fn index_lists_every_stop() {
        let Html(page) = index_page(State(state())).await.unwrap();
        assert!(page.contains("Miyapur (Orange Line)"));
        assert!(page.contains("Charminar (Green Line)"));
        assert!(page.contains("Shortest Time"));
    }
}
