//! Landing page
//!
//! Author: hephaex@gmail.com

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::io::ErrorKind;
use std::sync::Arc;

const INDEX_FILE: &str = "index.html";

#[derive(Serialize)]
pub struct StatusMessage {
    pub message: String,
}

/// Serve `index.html` from the static directory, or a JSON status message
/// when the page is not deployed.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let path = state.config.server.static_dir.join(INDEX_FILE);

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No landing page, answering with status");
            Ok(Json(StatusMessage {
                message: format!(
                    "UBN lookup API is running, but {} was not found",
                    path.display()
                ),
            })
            .into_response())
        }
        Err(e) => {
            tracing::error!(path = %path.display(), "Failed to read landing page: {e}");
            Err(e.into())
        }
    }
}
