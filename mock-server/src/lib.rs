//! In-memory stand-in for the todo REST service.
//!
//! Serves the collection under `/api/todos`, newest first, with `{"error"}`
//! JSON bodies on failures and an HTML page for unknown routes, the way a
//! typical web framework answers a mistyped path.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const API_PREFIX: &str = "/api/todos";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Todos in listing order, newest first.
pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

/// Router over a caller-owned store, so tests can seed or inspect it.
pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route(API_PREFIX, get(list_todos).post(create_todo))
        .route(&format!("{API_PREFIX}/"), get(list_todos).post(create_todo))
        .route(&format!("{API_PREFIX}/{{id}}"), put(update_todo).delete(delete_todo))
        .fallback(not_found_page)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn validate_title(title: &str) -> Result<String, Response> {
    let title = title.trim();
    if title.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "title is required"));
    }
    Ok(title.to_string())
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), Response> {
    let Json(input) = payload.map_err(|e| error(StatusCode::BAD_REQUEST, &e.body_text()))?;
    let title = validate_title(&input.title)?;
    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4().simple().to_string(),
        title,
        description: input.description,
        completed: false,
        created_at: now,
        updated_at: now,
    };
    info!(id = %todo.id, "created todo");
    db.write().await.insert(0, todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, Response> {
    let Json(input) = payload.map_err(|e| error(StatusCode::BAD_REQUEST, &e.body_text()))?;
    let title = input.title.as_deref().map(validate_title).transpose()?;

    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|todo| todo.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "todo not found"))?;
    if let Some(title) = title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = description;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    info!(%id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut todos = db.write().await;
    let Some(index) = todos.iter().position(|todo| todo.id == id) else {
        return error(StatusCode::NOT_FOUND, "todo not found");
    };
    todos.remove(index);
    info!(%id, "deleted todo");
    Json(json!({ "message": "todo deleted", "_id": id })).into_response()
}

async fn not_found_page(uri: Uri) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(format!(
            "<!DOCTYPE html>\n<html><head><title>Error</title></head>\
             <body><pre>Cannot GET {}</pre></body></html>",
            uri.path()
        )),
    )
}
