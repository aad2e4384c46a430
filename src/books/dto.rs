use serde::{Deserialize, Serialize};
use time::Date;

use crate::books::repo_types::{Book, NewBook};
use crate::error::AppError;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Body of `POST /books/` and `PUT /books/{id}`.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    #[serde(with = "iso_date")]
    pub published_date: Date,
}

impl From<BookRequest> for NewBook {
    fn from(r: BookRequest) -> Self {
        Self {
            title: r.title,
            author: r.author,
            published_date: r.published_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(with = "iso_date")]
    pub published_date: Date,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            published_date: b.published_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    10
}

impl Pagination {
    pub fn validate(self) -> Result<Self, AppError> {
        if self.skip < 0 || self.limit < 0 {
            return Err(AppError::Validation("skip and limit must be non-negative".into()));
        }
        Ok(self)
    }
}
