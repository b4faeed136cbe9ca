pub mod session_cookie;

use axum::extract::{Form, Path};
use axum::response::{Html, Redirect, Response};
use axum::routing::post;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::{FilterCriteria, IndexedRecord, SearchForm};
use crate::present::{self, html};
use crate::services::filter;
use crate::session::Restored;
use crate::state::AppState;

pub use session_cookie::{SESSION_COOKIE, SessionCookie};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_view))
        .route("/search", post(search))
        .route("/reset", post(reset))
        .route("/mappings/{position}", get(select_mapping))
        .route("/detail", get(detail_view))
        .route("/api/facets", get(api_facets))
        .route("/api/search", post(api_search))
        .route("/api/session", get(api_session))
        .route("/api/selection", get(api_selection))
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.sessions.store().ping().await?;
    Ok(StatusCode::OK)
}

async fn list_view(State(state): State<AppState>, session: SessionCookie) -> Response {
    let restored = state.sessions.restore(&session.id).await;
    let criteria = restored.criteria.unwrap_or_default();
    let rows = restored.results.as_deref().map(present::render_list);

    session.attach(Html(html::list_page(&state.facets, &criteria, rows.as_deref())))
}

async fn search(
    State(state): State<AppState>,
    session: SessionCookie,
    Form(form): Form<SearchForm>,
) -> Response {
    let criteria = FilterCriteria::from(form);
    let results = run_search(&state, &session, &criteria).await;
    let rows = present::render_list(&results);

    session.attach(Html(html::list_page(&state.facets, &criteria, Some(rows.as_slice()))))
}

async fn reset(State(state): State<AppState>, session: SessionCookie) -> Response {
    if let Err(e) = state.sessions.clear(&session.id).await {
        warn!("failed to clear session {}: {}", session.id, e);
    }
    let rows = present::render_list(state.records.records());

    session.attach(Html(html::list_page(&state.facets, &FilterCriteria::default(), Some(rows.as_slice()))))
}

async fn select_mapping(
    State(state): State<AppState>,
    session: SessionCookie,
    Path(position): Path<usize>,
) -> Result<Response, AppError> {
    let record = state.records.get(position).ok_or(AppError::NotFound)?;
    if let Err(e) = state.sessions.select_for_detail(&session.id, record).await {
        warn!("failed to store selection for session {}: {}", session.id, e);
    }

    Ok(session.attach(Redirect::to("../detail")))
}

async fn detail_view(State(state): State<AppState>, session: SessionCookie) -> Response {
    let selection = state.sessions.read_selection(&session.id).await;
    session.attach(Html(html::detail_page(selection.as_ref())))
}

async fn api_facets(State(state): State<AppState>) -> Json<crate::services::FacetIndex> {
    Json(state.facets.as_ref().clone())
}

async fn api_search(
    State(state): State<AppState>,
    session: SessionCookie,
    Json(criteria): Json<FilterCriteria>,
) -> Response {
    let results = run_search(&state, &session, &criteria).await;
    session.attach(Json(results))
}

async fn api_session(State(state): State<AppState>, session: SessionCookie) -> Response {
    let restored: Restored = state.sessions.restore(&session.id).await;
    session.attach(Json(restored))
}

async fn api_selection(State(state): State<AppState>, session: SessionCookie) -> Response {
    let selection = state.sessions.read_selection(&session.id).await;
    session.attach(Json(selection))
}

/// Filters the store and records the search in the session. A failed write
/// is logged; the caller still gets its results.
async fn run_search(state: &AppState, session: &SessionCookie, criteria: &FilterCriteria) -> Vec<IndexedRecord> {
    let results = filter::apply(state.records.records(), criteria);
    debug!("search {:?} matched {} of {}", criteria, results.len(), state.records.len());

    if let Err(e) = state.sessions.persist(&session.id, criteria, &results).await {
        warn!("failed to persist search for session {}: {}", session.id, e);
    }
    results
}
