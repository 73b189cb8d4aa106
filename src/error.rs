use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

/// Failures from the upstream API and the local store.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {0}")]
    Status(u16),

    #[error("Invalid data structure from API: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lock poisoned: {0}")]
    Lock(String),
}

/// Outcome of loading the first page of a listing route.
///
/// These are rendered in place of the story grid; none of them abort the app.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Invalid page number")]
    InvalidPage,

    #[error("Page exceeds available range")]
    PageOutOfRange { page: i64, nb_pages: u32 },

    #[error(transparent)]
    Upstream(#[from] ScoutError),
}
