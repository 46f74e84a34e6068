use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use search_core::builder;
use search_core::persist::{load_index, save_index, IndexPaths};
use search_core::source::DirSource;
use search_core::{QueryEngine, SearchConfig, SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<usize>,
    pub ranking: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
    pub data_dir: PathBuf,
    pub index_dir: PathBuf,
}

/// Load the persisted index (building it from the data directory when no
/// snapshot exists yet) and wire up the router.
pub fn build_app(index_dir: String, data_dir: String) -> Result<Router> {
    let config = SearchConfig::from_env();
    let paths = IndexPaths::new(&index_dir);
    let index = match load_index(&paths) {
        Ok(index) => index,
        Err(SearchError::IndexNotFound { .. }) => {
            tracing::info!(data_dir = %data_dir, "no index snapshot, building from data directory");
            let index = builder::build_from_source(&DirSource::new(&data_dir))?;
            save_index(&paths, &index)?;
            index
        }
        Err(err) => return Err(err.into()),
    };

    let state = AppState {
        engine: Arc::new(QueryEngine::new(index, config)),
        data_dir: PathBuf::from(data_dir),
        index_dir: PathBuf::from(index_dir),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/index", post(rebuild_handler))
        .route("/settings", get(settings_handler))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "ranking": state.engine.config().ranking.as_str(),
    }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let k = params.k.map(|k| k.clamp(1, 100));
    let results = state.engine.search(&params.q, k, params.ranking.as_deref());
    Json(SearchResponse { results })
}

async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match state.engine.document(&doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "title": doc.title,
            "url": doc.url,
            "content": doc.content,
        }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "document not found" })),
        )),
    }
}

/// Rebuild from the data directory, persist the new snapshot, then swap it
/// in atomically together with a fresh result cache.
async fn rebuild_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let source = DirSource::new(&state.data_dir);
    let index = builder::build_from_source(&source).map_err(internal_error)?;
    save_index(&IndexPaths::new(&state.index_dir), &index).map_err(internal_error)?;
    let indexed = index.num_docs;
    state.engine.swap_index(index);
    state.engine.reset_cache();
    tracing::info!(indexed, "index rebuilt");
    Ok(Json(serde_json::json!({ "indexed": indexed })))
}

async fn settings_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.engine.config();
    Json(serde_json::json!({
        "ranking": config.ranking.as_str(),
        "max_results": config.max_results,
        "bm25": { "k1": config.bm25.k1, "b": config.bm25.b },
    }))
}

fn internal_error(err: SearchError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
