//! Movie records as returned by the search endpoint.
//!
//! # Design
//! Field names follow Rust conventions; serde renames are not needed because
//! the wire format is already snake_case. Fields are private so a decoded
//! record cannot be mutated after the fact; accessors hand out borrows.
//! Unknown upstream fields (`genre_ids`, `popularity`, ...) are ignored.

use serde::Deserialize;

use crate::config::ImageConfig;

/// Catalog identifier of a movie.
pub type MovieId = i64;

/// One decoded movie entry from the search API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieRecord {
    id: MovieId,
    title: String,
    release_date: String,
    overview: String,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: f64,
}

impl MovieRecord {
    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    pub fn overview(&self) -> &str {
        &self.overview
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        self.backdrop_path.as_deref()
    }

    pub fn vote_average(&self) -> f64 {
        self.vote_average
    }

    /// The first four characters of `release_date`.
    ///
    /// An empty release date yields an empty year; shorter strings are
    /// returned whole.
    pub fn release_year(&self) -> &str {
        match self.release_date.char_indices().nth(4) {
            Some((end, _)) => &self.release_date[..end],
            None => &self.release_date,
        }
    }

    pub fn poster(&self, images: &ImageConfig) -> ImageSource {
        ImageSource::from_path(images, ImageSize::W500, self.poster_path())
    }

    pub fn backdrop(&self, images: &ImageConfig) -> ImageSource {
        ImageSource::from_path(images, ImageSize::W1280, self.backdrop_path())
    }
}

/// Envelope of a search response. Paging fields are accepted and dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    pub results: Vec<MovieRecord>,
}

/// Rendition widths offered by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W500,
    W1280,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::W500 => "w500",
            ImageSize::W1280 => "w1280",
        }
    }
}

/// What an image slot should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Placeholder,
}

impl ImageSource {
    fn from_path(images: &ImageConfig, size: ImageSize, path: Option<&str>) -> Self {
        match path {
            Some(path) if !path.is_empty() => ImageSource::Remote(format!(
                "{}/{}{}",
                images.base_url.trim_end_matches('/'),
                size.as_str(),
                path
            )),
            _ => ImageSource::Placeholder,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ImageSource::Remote(url) => Some(url),
            ImageSource::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder)
    }
}
