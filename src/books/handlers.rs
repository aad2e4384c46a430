use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::CurrentUser,
    books::{
        dto::{BookRequest, BookResponse, MessageResponse, Pagination},
        services,
    },
    error::AppError,
    extract::{ValidJson, ValidPath, ValidQuery},
    state::AppState,
};

pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books/", post(create_book).get(list_books))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn create_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidJson(payload): ValidJson<BookRequest>,
) -> Result<Json<BookResponse>, AppError> {
    let book = services::create(state.books.as_ref(), user.id, payload.into()).await?;
    Ok(Json(book.into()))
}

#[instrument(skip_all, fields(user_id = user.id, offset = p.skip, limit = p.limit))]
pub async fn list_books(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidQuery(p): ValidQuery<Pagination>,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    let p = p.validate()?;
    let books = services::list(state.books.as_ref(), user.id, p.skip, p.limit).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

#[instrument(skip_all, fields(user_id = user.id, book_id = id))]
pub async fn get_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<BookResponse>, AppError> {
    let book = services::get(state.books.as_ref(), user.id, id).await?;
    Ok(Json(book.into()))
}

#[instrument(skip_all, fields(user_id = user.id, book_id = id))]
pub async fn update_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(id): ValidPath<i64>,
    ValidJson(payload): ValidJson<BookRequest>,
) -> Result<Json<BookResponse>, AppError> {
    let book = services::update(state.books.as_ref(), user.id, id, payload.into()).await?;
    Ok(Json(book.into()))
}

#[instrument(skip_all, fields(user_id = user.id, book_id = id))]
pub async fn delete_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    services::delete(state.books.as_ref(), user.id, id).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted successfully",
    }))
}
