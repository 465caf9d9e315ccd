//! HTTP front-end: the dish form, its JSON twin, and a health check.

pub mod render;

use crate::core::explorer::DishExplorer;
use crate::core::{DishQuery, ImageGenerator, PlacesProvider, TextGenerator};
use crate::utils::error::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// 表單欄位（`food_name` 必填，由 `DishQuery::new` 驗證）
#[derive(Debug, Default, Deserialize)]
pub struct DishForm {
    pub food_name: Option<String>,
    pub zip_code: Option<String>,
}

impl DishForm {
    fn into_query(self) -> Result<DishQuery> {
        DishQuery::new(self.food_name.as_deref(), self.zip_code.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct AppState<T: TextGenerator, I: ImageGenerator, P: PlacesProvider> {
    explorer: Arc<DishExplorer<T, I, P>>,
}

impl<T: TextGenerator, I: ImageGenerator, P: PlacesProvider> Clone for AppState<T, I, P> {
    fn clone(&self) -> Self {
        Self {
            explorer: Arc::clone(&self.explorer),
        }
    }
}

pub fn create_router<T, I, P>(explorer: DishExplorer<T, I, P>) -> Router
where
    T: TextGenerator + 'static,
    I: ImageGenerator + 'static,
    P: PlacesProvider + 'static,
{
    let state = AppState {
        explorer: Arc::new(explorer),
    };

    Router::new()
        .route("/", get(index).post(submit_form::<T, I, P>))
        .route("/api/dish", post(submit_json::<T, I, P>))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render::render_form(None))
}

async fn submit_form<T, I, P>(
    State(state): State<AppState<T, I, P>>,
    Form(form): Form<DishForm>,
) -> Response
where
    T: TextGenerator + 'static,
    I: ImageGenerator + 'static,
    P: PlacesProvider + 'static,
{
    let query = match form.into_query() {
        Ok(query) => query,
        Err(e) => {
            tracing::info!("Rejected form submission: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Html(render::render_form(Some(&e.user_friendly_message()))),
            )
                .into_response();
        }
    };

    let report = state.explorer.explore(&query).await;
    Html(render::render_result(&report)).into_response()
}

async fn submit_json<T, I, P>(
    State(state): State<AppState<T, I, P>>,
    Form(form): Form<DishForm>,
) -> Response
where
    T: TextGenerator + 'static,
    I: ImageGenerator + 'static,
    P: PlacesProvider + 'static,
{
    match form.into_query() {
        Ok(query) => Json(state.explorer.explore(&query).await).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.user_friendly_message(),
            }),
        )
            .into_response(),
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
