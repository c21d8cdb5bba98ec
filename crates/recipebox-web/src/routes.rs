//! HTTP routes
//!
//! - `GET /`             HTML index with all recipes and the edit form
//! - `POST /recipes`     form submit (create or update), redirects to `/`
//! - `GET /api/recipes`  all recipes as JSON
//! - `POST /api/recipes` JSON create or update, returns the stored recipe
//! - `GET /static/*`     files from the configured static directory
//!
//! Every request gets a fresh `RequestId`. It is recorded on the request span,
//! and handler errors carry it back as the `x-request-id` response header.

use std::path::Path;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{Html, Redirect, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use recipebox_core::model::{ingredients, parse_recipe_id};
use recipebox_core::{Recipe, RecipeDraft, RecipeError};
use recipebox_core_types::RequestId;
use recipebox_engine::commands::recipe::{recipe_list, recipe_upsert};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::render;
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/recipes", post(submit_form))
        .route("/api/recipes", get(list_json).post(upsert_json))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(middleware::from_fn(assign_request_id))
        .with_state(state)
}

async fn assign_request_id(mut req: Request, next: Next) -> Response {
    req.extensions_mut().insert(RequestId::new());
    next.run(req).await
}

fn request_span(req: &Request) -> tracing::Span {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_default();
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

/// Form fields posted from the index page
#[derive(Debug, Deserialize)]
pub struct RecipeForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: String,
}

impl RecipeForm {
    /// Blank id means create; ingredients are split on `|`
    pub fn into_draft(self) -> Result<RecipeDraft, RecipeError> {
        let id = parse_recipe_id(&self.id)?;
        Ok(RecipeDraft::from_parts(
            id,
            self.name,
            ingredients::split_input(&self.ingredients),
        ))
    }
}

/// JSON body for `POST /api/recipes`
#[derive(Debug, Deserialize)]
pub struct RecipePayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl From<RecipePayload> for RecipeDraft {
    fn from(payload: RecipePayload) -> Self {
        RecipeDraft::from_parts(payload.id, payload.name, payload.ingredients)
    }
}

async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, ApiError> {
    let recipes = state
        .with_store(|store| recipe_list(store.connection()))
        .await
        .map_err(|e| ApiError::for_request(e, &request_id))?;
    Ok(Html(render::index_page(&recipes)))
}

async fn submit_form(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<RecipeForm>,
) -> Result<Redirect, ApiError> {
    let draft = form
        .into_draft()
        .map_err(|e| ApiError::for_request(e, &request_id))?;
    state
        .with_store(move |store| recipe_upsert(store.connection_mut(), draft))
        .await
        .map_err(|e| ApiError::for_request(e, &request_id))?;
    Ok(Redirect::to("/"))
}

async fn list_json(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state
        .with_store(|store| recipe_list(store.connection()))
        .await
        .map_err(|e| ApiError::for_request(e, &request_id))?;
    Ok(Json(recipes))
}

async fn upsert_json(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(payload): Json<RecipePayload>,
) -> Result<Json<Recipe>, ApiError> {
    let draft = RecipeDraft::from(payload);
    let recipe = state
        .with_store(move |store| recipe_upsert(store.connection_mut(), draft))
        .await
        .map_err(|e| ApiError::for_request(e, &request_id))?;
    Ok(Json(recipe))
}
