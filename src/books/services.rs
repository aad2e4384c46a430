use tracing::{debug, info};

use crate::books::{
    repo::BookStore,
    repo_types::{Book, NewBook},
};
use crate::error::AppError;

pub async fn create(books: &dyn BookStore, owner_id: i64, book: NewBook) -> Result<Book, AppError> {
    let book = books.create_book(owner_id, &book).await?;
    info!(owner_id = book.owner_id, book_id = book.id, "book created");
    Ok(book)
}

pub async fn list(
    books: &dyn BookStore,
    owner_id: i64,
    skip: i64,
    limit: i64,
) -> Result<Vec<Book>, AppError> {
    Ok(books.list_books(owner_id, skip, limit).await?)
}

/// A book owned by someone else is reported as not found.
pub async fn get(books: &dyn BookStore, owner_id: i64, book_id: i64) -> Result<Book, AppError> {
    books.get_book(owner_id, book_id).await?.ok_or_else(|| {
        debug!(owner_id, book_id, "book not found for owner");
        AppError::NotFound
    })
}

pub async fn update(
    books: &dyn BookStore,
    owner_id: i64,
    book_id: i64,
    book: NewBook,
) -> Result<Book, AppError> {
    let book = books
        .update_book(owner_id, book_id, &book)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(owner_id, book_id, "book updated");
    Ok(book)
}

pub async fn delete(books: &dyn BookStore, owner_id: i64, book_id: i64) -> Result<(), AppError> {
    if !books.delete_book(owner_id, book_id).await? {
        return Err(AppError::NotFound);
    }
    info!(owner_id, book_id, "book deleted");
    Ok(())
}
