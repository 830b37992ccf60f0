use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Html,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// What the server saw for one request to `/echo`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub type History = Arc<RwLock<Vec<Echo>>>;

pub const TEXT_BODY: &str = "hello from the mock server";
pub const HTML_BODY: &str = "<html><body><h1>mock</h1></body></html>";

pub fn app() -> Router {
    let history: History = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/history", get(list_history))
        .route("/text", get(text))
        .route("/html", get(html))
        .route("/status/{code}", any(status))
        .with_state(history)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(
    State(history): State<History>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let echo = Echo {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    };
    history.write().await.push(echo.clone());
    Json(echo)
}

async fn list_history(State(history): State<History>) -> Json<Vec<Echo>> {
    Json(history.read().await.clone())
}

async fn text() -> &'static str {
    TEXT_BODY
}

async fn html() -> Html<&'static str> {
    Html(HTML_BODY)
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}
