//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::dataset::DatasetError;
use crate::domain::{ClockTime, Node};
use crate::network::NetworkSnapshot;
use crate::planner::{ItineraryPlanner, UpcomingDepartureFinder};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/nodes", get(list_nodes))
        .route("/api/nodes/:id", get(get_node))
        .route("/api/nodes/:id/neighbors", get(get_neighbors))
        .route("/api/path/local", get(local_path))
        .route("/api/routes", get(plan_routes))
        .route("/api/routes/:route_id", get(route_details))
        .route("/api/catalog", get(catalog))
        .route("/api/buses/upcoming", get(upcoming_buses))
        .route("/api/buses/schedule/:route_id", get(route_schedule))
        .route("/admin/reload", post(reload_network))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the planning forms.
async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.network.current().await;
    let template = IndexTemplate {
        places: PlaceView::sorted(snapshot.graph()),
        default_time: now().to_string(),
    };
    render(&template)
}

/// Unknown paths: an error page for browsers, JSON otherwise.
async fn not_found(headers: HeaderMap) -> Response {
    if accepts_html(&headers) {
        let template = ErrorTemplate {
            title: "Not found".to_string(),
            message: "There is nothing at this address.".to_string(),
        };
        let html = template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        (StatusCode::NOT_FOUND, Html(html)).into_response()
    } else {
        AppError::NotFound {
            message: "Not found".to_string(),
        }
        .into_response()
    }
}

/// All nodes, in dataset order.
async fn list_nodes(State(state): State<AppState>) -> Json<NodesResponse> {
    let snapshot = state.network.current().await;
    let nodes: Vec<NodeResult> = snapshot
        .graph()
        .nodes()
        .iter()
        .map(NodeResult::from_node)
        .collect();

    Json(NodesResponse {
        count: nodes.len(),
        nodes,
    })
}

/// One node by ID.
async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeResult>, AppError> {
    let snapshot = state.network.current().await;
    let node = find_node(&snapshot, &id)?;
    Ok(Json(NodeResult::from_node(node)))
}

/// Outgoing local edges of a node.
async fn get_neighbors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NeighborsResponse>, AppError> {
    let snapshot = state.network.current().await;
    let graph = snapshot.graph();
    let node = find_node(&snapshot, &id)?;

    let neighbors: Vec<NeighborResult> = graph
        .neighbors(node.id.as_str())
        .iter()
        .map(|e| NeighborResult::from_edge(e, graph))
        .collect();

    Ok(Json(NeighborsResponse {
        id: node.id.to_string(),
        count: neighbors.len(),
        neighbors,
    }))
}

/// Shortest path over local edges only.
async fn local_path(
    State(state): State<AppState>,
    Query(req): Query<PlanQuery>,
) -> Result<Json<LocalPathResponse>, AppError> {
    let (from, to) = required_endpoints(req.from.as_deref(), req.to.as_deref())?;

    let snapshot = state.network.current().await;
    let graph = snapshot.graph();
    let origin = find_node(&snapshot, from)?;
    let destination = find_node(&snapshot, to)?;

    let path = graph.local_shortest_path(origin.id.as_str(), destination.id.as_str());
    Ok(Json(LocalPathResponse::from_path(
        &path,
        origin,
        destination,
        graph,
    )))
}

/// Plan door-to-door options between two nodes.
async fn plan_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<PlanQuery>,
) -> Result<Response, AppError> {
    let (from, to) = required_endpoints(req.from.as_deref(), req.to.as_deref())?;
    let departure = time_or_now(req.time.as_deref())?;

    let snapshot = state.network.current().await;
    let graph = snapshot.graph();
    let origin = find_node(&snapshot, from)?;
    let destination = find_node(&snapshot, to)?;

    let planner =
        ItineraryPlanner::for_snapshot(&snapshot, state.config.estimator(), &state.config);
    let options = state
        .plans
        .get_or_plan(
            snapshot.generation(),
            origin.id.clone(),
            destination.id.clone(),
            departure,
            || planner.plan(origin.id.as_str(), destination.id.as_str(), departure),
        )
        .await;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = PlanResultsTemplate {
            from_name: origin.name.clone(),
            to_name: destination.name.clone(),
            departure: departure.to_string(),
            options: options
                .iter()
                .map(|o| OptionView::from_option(o, departure, graph))
                .collect(),
        };
        render(&template)
    } else {
        let options: Vec<OptionResult> = options
            .iter()
            .map(|o| OptionResult::from_option(o, departure, graph))
            .collect();

        Ok(Json(PlanResponse {
            from: PlaceRef::from_node(origin),
            to: PlaceRef::from_node(destination),
            departure_time: departure.to_string(),
            count: options.len(),
            options,
        })
        .into_response())
    }
}

/// One route with its distinct stops and trips.
async fn route_details(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<RouteDetailsResponse>, AppError> {
    let snapshot = state.network.current().await;
    let catalog = snapshot.catalog();
    let id = route_id.trim();
    let (Some(route), Some(stops)) = (catalog.route(id), catalog.route_stops(id)) else {
        return Err(AppError::NotFound {
            message: format!("Route not found: {}", route_id),
        });
    };

    Ok(Json(RouteDetailsResponse::from_route(
        route,
        &stops,
        snapshot.graph(),
    )))
}

/// Summary of every route.
async fn catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let snapshot = state.network.current().await;
    let routes: Vec<RouteSummary> = snapshot
        .catalog()
        .routes()
        .iter()
        .map(RouteSummary::from_route)
        .collect();

    Json(CatalogResponse {
        count: routes.len(),
        routes,
    })
}

/// Buses due at a stop soon.
async fn upcoming_buses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<UpcomingQuery>,
) -> Result<Response, AppError> {
    let from = non_empty(req.from.as_deref()).ok_or_else(|| AppError::BadRequest {
        message: "Missing required parameter: from".to_string(),
    })?;
    let now = time_or_now(req.time.as_deref())?;
    let limit = parse_limit(req.limit.as_deref());

    let snapshot = state.network.current().await;
    let graph = snapshot.graph();
    let origin = find_node(&snapshot, from)?;
    let destination = non_empty(req.to.as_deref())
        .map(|to| find_node(&snapshot, to))
        .transpose()?;

    let finder =
        UpcomingDepartureFinder::for_snapshot(&snapshot, state.config.estimator(), &state.config);
    let buses = finder.upcoming(
        origin.id.as_str(),
        destination.map(|d| d.id.as_str()),
        now,
        limit,
    );

    if accepts_html(&headers) {
        let template = UpcomingTemplate {
            location: origin.name.clone(),
            current_time: now.to_string(),
            buses: buses
                .iter()
                .map(|b| BusView::from_departure(b, graph))
                .collect(),
        };
        render(&template)
    } else {
        let buses: Vec<BusResult> = buses
            .iter()
            .map(|b| BusResult::from_departure(b, graph))
            .collect();

        Ok(Json(UpcomingResponse {
            location: PlaceRef::from_node(origin),
            current_time: now.to_string(),
            count: buses.len(),
            buses,
        })
        .into_response())
    }
}

/// Full estimated schedule of one route.
async fn route_schedule(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let snapshot = state.network.current().await;
    let route_id = route_id.trim();
    let not_found = || AppError::NotFound {
        message: format!("Route not found: {}", route_id),
    };

    let route = snapshot.catalog().route(route_id).ok_or_else(not_found)?;
    let finder =
        UpcomingDepartureFinder::for_snapshot(&snapshot, state.config.estimator(), &state.config);
    let trips = finder.route_timetable(route_id).ok_or_else(not_found)?;

    Ok(Json(ScheduleResponse::from_timetables(
        route,
        &trips,
        snapshot.graph(),
    )))
}

/// Re-read the dataset and publish it. Cached plans are dropped.
async fn reload_network(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let snapshot = state.network.reload().await?;
    state.plans.invalidate_all();
    info!(
        generation = snapshot.generation(),
        "network reloaded on request"
    );

    Ok(Json(ReloadResponse::from_snapshot(&snapshot)))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render(template: &impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

fn now() -> ClockTime {
    ClockTime::from_naive_time(Local::now().time())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Both endpoints of a query, or 400 naming the missing ones.
fn required_endpoints<'q>(
    from: Option<&'q str>,
    to: Option<&'q str>,
) -> Result<(&'q str, &'q str), AppError> {
    match (non_empty(from), non_empty(to)) {
        (Some(from), Some(to)) => Ok((from, to)),
        (from, to) => {
            let missing: Vec<&str> = [("from", from), ("to", to)]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(name, _)| name)
                .collect();
            Err(AppError::BadRequest {
                message: format!("Missing required parameters: {}", missing.join(", ")),
            })
        }
    }
}

/// Parse an `HH:MM` query time, defaulting to the local wall clock.
fn time_or_now(time: Option<&str>) -> Result<ClockTime, AppError> {
    match non_empty(time) {
        Some(t) => ClockTime::parse_hhmm(t).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        }),
        None => Ok(now()),
    }
}

/// A caller-supplied limit. Anything that is not a whole number means "no
/// limit given", which the finder turns into its default.
fn parse_limit(limit: Option<&str>) -> Option<usize> {
    non_empty(limit).and_then(|l| l.parse().ok())
}

fn find_node<'s>(snapshot: &'s NetworkSnapshot, id: &str) -> Result<&'s Node, AppError> {
    snapshot
        .graph()
        .node(id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Node not found: {}", id),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DatasetError> for AppError {
    fn from(e: DatasetError) -> Self {
        match e {
            DatasetError::NoSource => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: format!("Reload failed: {}", e),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
