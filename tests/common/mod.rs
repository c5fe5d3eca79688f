//! In-process stand-in for the company data backend.
//!
//! Special company ids: `missing` answers 404, `broken` answers 500 and
//! `garbage` answers a body of the wrong shape.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::task::JoinHandle;

type Params = HashMap<String, String>;

pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/api/companies/:id", get(overview))
            .route("/api/companies/:id/reviews", get(reviews))
            .route("/api/companies/:id/salaries", get(salaries))
            .route("/api/companies/:id/stock", get(stock))
            .route("/api/companies/:id/taxes", get(taxes))
            .route("/api/search/:kind", get(search))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, hits, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Number of requests the backend has answered.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Short-circuits the special company ids.
fn special(id: &str) -> Option<Response> {
    match id {
        "missing" => Some((StatusCode::NOT_FOUND, "no such company").into_response()),
        "broken" => Some((StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()),
        "garbage" => Some(Json(json!({ "unexpected": true })).into_response()),
        _ => None,
    }
}

fn param<'a>(params: &'a Params, name: &str, default: &'a str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or(default)
}

async fn overview(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<String>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if let Some(resp) = special(&id) {
        return resp;
    }
    Json(json!({
        "id": id,
        "name": format!("Company {}", id),
        "industry": "Software",
        "employeeCount": 1200,
        "averageRating": 4.1
    }))
    .into_response()
}

/// Echoes the filters into the review titles so callers can check what was sent.
async fn reviews(
    State(hits): State<Arc<AtomicUsize>>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if let Some(resp) = special(&id) {
        return resp;
    }
    let page: u32 = param(&params, "page", "0").parse().unwrap_or(0);
    let page_size: u32 = param(&params, "pageSize", "5").parse().unwrap_or(5);
    let title = format!(
        "sort={} rating={}",
        param(&params, "sort", ""),
        param(&params, "rating", "")
    );
    Json(json!({
        "reviews": [{
            "id": format!("{}-{}", id, page),
            "title": title,
            "rating": 4,
            "createdAt": "2024-05-01T09:30:00Z"
        }],
        "total": 1,
        "page": page,
        "pageSize": page_size,
        "averageRating": 4.0,
        "ratingDistribution": { "4": 1 }
    }))
    .into_response()
}

/// Echoes the search text as the job title.
async fn salaries(
    State(hits): State<Arc<AtomicUsize>>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if let Some(resp) = special(&id) {
        return resp;
    }
    Json(json!({
        "salaries": [{
            "id": "s1",
            "jobTitle": param(&params, "search", ""),
            "baseSalary": 120000.0,
            "currency": "USD",
            "yearsOfExperience": 3
        }],
        "total": 1,
        "page": param(&params, "page", "0").parse::<u32>().unwrap_or(0),
        "pageSize": param(&params, "pageSize", "5").parse::<u32>().unwrap_or(5),
        "summary": {
            "count": 1,
            "min": 120000.0,
            "max": 120000.0,
            "median": 120000.0,
            "average": 120000.0
        }
    }))
    .into_response()
}

async fn stock(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<String>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if let Some(resp) = special(&id) {
        return resp;
    }
    Json(json!({
        "symbol": "ACME",
        "price": 101.25,
        "currency": "USD",
        "changePercent": -0.4,
        "asOf": "2024-05-01T16:00:00Z"
    }))
    .into_response()
}

async fn taxes(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<String>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if let Some(resp) = special(&id) {
        return resp;
    }
    Json(json!({
        "currency": "USD",
        "records": [
            { "year": 2022, "incomeTax": 1500000.0, "effectiveRate": 0.19 },
            { "year": 2023, "incomeTax": 1750000.0, "effectiveRate": 0.21 }
        ]
    }))
    .into_response()
}

async fn search(
    State(hits): State<Arc<AtomicUsize>>,
    Path(kind): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let q = param(&params, "q", "");
    Json(json!([
        { "id": "1", "name": format!("{} ({})", q, kind) }
    ]))
    .into_response()
}
