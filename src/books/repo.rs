use async_trait::async_trait;

use crate::books::repo_types::{Book, BookRow, NewBook};
use crate::db::Database;
use crate::error::StoreError;

/// Persistence for books. Every lookup is filtered by owner as well as id.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create_book(&self, owner_id: i64, book: &NewBook) -> Result<Book, StoreError>;

    /// Books of `owner_id` in insertion order, skipping `skip` and returning at most `limit`.
    async fn list_books(&self, owner_id: i64, skip: i64, limit: i64)
        -> Result<Vec<Book>, StoreError>;

    async fn get_book(&self, owner_id: i64, book_id: i64) -> Result<Option<Book>, StoreError>;

    /// Replaces title, author and published date. `None` if no such book for this owner.
    async fn update_book(
        &self,
        owner_id: i64,
        book_id: i64,
        book: &NewBook,
    ) -> Result<Option<Book>, StoreError>;

    /// `false` if no such book for this owner.
    async fn delete_book(&self, owner_id: i64, book_id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
impl BookStore for Database {
    async fn create_book(&self, owner_id: i64, book: &NewBook) -> Result<Book, StoreError> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, author, published_date, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, published_date, user_id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_date)
        .bind(owner_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row.into())
    }

    async fn list_books(
        &self,
        owner_id: i64,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Book>, StoreError> {
        let mut conn = self.acquire().await?;
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, published_date, user_id
            FROM books
            WHERE user_id = $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get_book(&self, owner_id: i64, book_id: i64) -> Result<Option<Book>, StoreError> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, published_date, user_id
            FROM books
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(book_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn update_book(
        &self,
        owner_id: i64,
        book_id: i64,
        book: &NewBook,
    ) -> Result<Option<Book>, StoreError> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
               SET title = $1, author = $2, published_date = $3
             WHERE id = $4 AND user_id = $5
            RETURNING id, title, author, published_date, user_id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_date)
        .bind(book_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn delete_book(&self, owner_id: i64, book_id: i64) -> Result<bool, StoreError> {
        let mut conn = self.acquire().await?;
        let done = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(book_id)
            .bind(owner_id)
            .execute(&mut *conn)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
