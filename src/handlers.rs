//! HTTP route handlers for the portfolio server.
//!
//! Each request reloads the data file; a load failure is a 500 with a short
//! text body.

use crate::models::Portfolio;
use crate::templates::{render_page, PageOptions};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub filter: Option<String>,
}

fn load(state: &AppState) -> Result<Portfolio, Response> {
    state.load_portfolio().map_err(|e| {
        error!("Failed to load {}: {}", state.data_file.display(), e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load portfolio data").into_response()
    })
}

// ============================================================================
// Page
// ============================================================================

pub async fn index(
    Query(query): Query<IndexQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let portfolio = match load(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let shell = match state.load_shell() {
        Ok(shell) => shell,
        Err(e) => {
            error!("Failed to read page shell: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load page shell").into_response();
        }
    };

    let options = PageOptions {
        filter: query.filter,
        ..state.page.clone()
    };
    Html(render_page(&portfolio, shell.as_deref(), &options)).into_response()
}

// ============================================================================
// JSON API
// ============================================================================

pub async fn portfolio_json(State(state): State<Arc<AppState>>) -> Response {
    match load(&state) {
        Ok(portfolio) => Json(portfolio).into_response(),
        Err(resp) => resp,
    }
}

#[derive(Debug, Serialize)]
pub struct PublicationSummary {
    pub title: String,
    pub year: String,
    pub url: String,
    pub citations: u32,
}

#[derive(Debug, Serialize)]
pub struct PublicationsResponse {
    pub total_citations: u64,
    pub publications: Vec<PublicationSummary>,
}

pub async fn publications_json(State(state): State<Arc<AppState>>) -> Response {
    let portfolio = match load(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let total_citations = portfolio.total_citations();
    let publications = portfolio
        .publications
        .into_iter()
        .map(|p| PublicationSummary {
            title: p.title,
            year: p.year,
            url: p.url,
            citations: p.citations,
        })
        .collect();

    Json(PublicationsResponse {
        total_citations,
        publications,
    })
    .into_response()
}
