use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub adult: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpstreamError {
    pub status_code: u32,
    pub status_message: String,
    pub success: bool,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub api_key: Option<String>,
    #[serde(default)]
    pub query: String,
    pub language: Option<String>,
    #[serde(default)]
    pub adult: bool,
}

struct AppState {
    api_key: String,
    catalog: Vec<Movie>,
}

type Shared = Arc<AppState>;

pub fn app(api_key: &str) -> Router {
    let state = Arc::new(AppState {
        api_key: api_key.to_string(),
        catalog: catalog(),
    });
    Router::new()
        .route("/3/search/movie", get(search_movies))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn search_movies(
    State(state): State<Shared>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, (StatusCode, Json<UpstreamError>)> {
    if params.api_key.as_deref() != Some(state.api_key.as_str()) {
        tracing::warn!("rejecting search with invalid api key");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(UpstreamError {
                status_code: 7,
                status_message: "Invalid API key: You must be granted a valid key.".to_string(),
                success: false,
            }),
        ));
    }

    let needle = params.query.trim().to_lowercase();
    let results: Vec<Movie> = if needle.is_empty() {
        Vec::new()
    } else {
        state
            .catalog
            .iter()
            .filter(|m| params.adult || !m.adult)
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    };

    tracing::debug!(
        query = %params.query,
        language = params.language.as_deref().unwrap_or(""),
        hits = results.len(),
        "search"
    );

    Ok(Json(SearchPage {
        page: 1,
        total_pages: u32::from(!results.is_empty()),
        total_results: results.len(),
        results,
    }))
}

fn movie(
    id: i64,
    title: &str,
    release_date: &str,
    overview: &str,
    poster_path: Option<&str>,
    backdrop_path: Option<&str>,
    vote_average: f64,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        release_date: release_date.to_string(),
        overview: overview.to_string(),
        poster_path: poster_path.map(str::to_string),
        backdrop_path: backdrop_path.map(str::to_string),
        vote_average,
        adult: false,
    }
}

/// Fixed catalog served by the mock, in the order search results are returned.
pub fn catalog() -> Vec<Movie> {
    vec![
        movie(
            603,
            "Matrix",
            "1999-03-30",
            "Um hacker descobre que a realidade é uma simulação.",
            Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"),
            Some("/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg"),
            8.217,
        ),
        movie(
            604,
            "Matrix Reloaded",
            "2003-05-15",
            "Neo e os rebeldes defendem Zion.",
            Some("/9TGHDvWrqKBzwDxDodHYXEmOE6J.jpg"),
            None,
            7.1,
        ),
        movie(
            605,
            "Matrix Revolutions",
            "2003-11-05",
            "",
            None,
            None,
            6.7,
        ),
        movie(
            680,
            "Pulp Fiction: Tempo de Violência",
            "1994-09-10",
            "Histórias entrelaçadas de crime em Los Angeles.",
            Some("/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg"),
            Some("/suaEOtk1N1sgg2MTM7oZd2cfVp3.jpg"),
            8.5,
        ),
        movie(999_001, "Projeto Sem Data", "", "Em produção.", None, None, 0.0),
        Movie {
            adult: true,
            ..movie(999_002, "Matrix Adult Parody", "2010-01-01", "", None, None, 2.0)
        },
    ]
}
