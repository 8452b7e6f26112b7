//! Display-ready projections of the search state.
//!
//! View models hold no logic beyond what is needed to render: the year
//! derived from the release date, a rating label, and image slots resolved
//! to either a URL or a placeholder. Building them never performs I/O; the
//! detail view in particular is built from the record already in the result
//! list.

use crate::config::ImageConfig;
use crate::store::{SearchState, SearchStatus};
use crate::types::{ImageSource, MovieId, MovieRecord};

pub const SCREEN_TITLE: &str = "Pesquisa de Filmes";
pub const SEARCH_PLACEHOLDER: &str = "Digite o nome do filme";
pub const CLOSE_LABEL: &str = "Fechar";
pub const NO_RESULTS_MESSAGE: &str = "Nenhum filme encontrado";

/// One row in the results list.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub overview: String,
    pub rating: f64,
    pub rating_label: String,
    pub poster: ImageSource,
}

impl MovieRow {
    pub fn new(record: &MovieRecord, images: &ImageConfig) -> Self {
        Self {
            id: record.id(),
            title: record.title().to_string(),
            year: record.release_year().to_string(),
            overview: record.overview().to_string(),
            rating: record.vote_average(),
            rating_label: rating_label(record.vote_average()),
            poster: record.poster(images),
        }
    }
}

/// The detail sheet for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub overview: String,
    pub rating: f64,
    pub rating_label: String,
    pub poster: ImageSource,
    pub backdrop: ImageSource,
}

impl MovieDetail {
    pub fn new(record: &MovieRecord, images: &ImageConfig) -> Self {
        Self {
            id: record.id(),
            title: record.title().to_string(),
            year: record.release_year().to_string(),
            overview: record.overview().to_string(),
            rating: record.vote_average(),
            rating_label: rating_label(record.vote_average()),
            poster: record.poster(images),
            backdrop: record.backdrop(images),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    NoResults,
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Error(message) => message,
            Banner::NoResults => NO_RESULTS_MESSAGE,
        }
    }
}

/// Everything the search screen renders for one state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchViewModel {
    pub title: &'static str,
    pub query: String,
    pub search_placeholder: &'static str,
    pub show_clear_button: bool,
    pub rows: Vec<MovieRow>,
    pub is_loading: bool,
    pub banner: Option<Banner>,
    pub detail: Option<MovieDetail>,
    pub close_label: &'static str,
}

impl SearchViewModel {
    pub fn new(state: &SearchState, images: &ImageConfig) -> Self {
        let rows: Vec<MovieRow> = state
            .results
            .iter()
            .map(|record| MovieRow::new(record, images))
            .collect();

        let banner = match &state.status {
            SearchStatus::Failed(info) => Some(Banner::Error(info.message.clone())),
            SearchStatus::Loaded if rows.is_empty() => Some(Banner::NoResults),
            _ => None,
        };

        Self {
            title: SCREEN_TITLE,
            query: state.query.clone(),
            search_placeholder: SEARCH_PLACEHOLDER,
            show_clear_button: !state.query.is_empty(),
            rows,
            is_loading: state.is_loading(),
            banner,
            detail: state
                .selected_record()
                .map(|record| MovieDetail::new(record, images)),
            close_label: CLOSE_LABEL,
        }
    }
}

/// The rating exactly as decoded; whole numbers keep their `.0`.
fn rating_label(vote_average: f64) -> String {
    if vote_average.is_finite() && vote_average.fract() == 0.0 {
        format!("{vote_average:.1}")
    } else {
        vote_average.to_string()
    }
}
