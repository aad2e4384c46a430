//! In-process store used by the test suite in place of PostgreSQL.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::auth::{repo::UserStore, repo_types::User};
use crate::books::{
    repo::BookStore,
    repo_types::{Book, NewBook},
};
use crate::error::StoreError;

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    books: Vec<Book>,
    next_user_id: i64,
    next_book_id: i64,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().expect("memory store poisoned")
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Duplicate);
        }
        t.next_user_id += 1;
        let user = User {
            id: t.next_user_id,
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            is_active: true,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create_book(&self, owner_id: i64, book: &NewBook) -> Result<Book, StoreError> {
        let mut t = self.tables();
        t.next_book_id += 1;
        let book = Book {
            id: t.next_book_id,
            owner_id,
            title: book.title.clone(),
            author: book.author.clone(),
            published_date: book.published_date,
        };
        t.books.push(book.clone());
        Ok(book)
    }

    async fn list_books(
        &self,
        owner_id: i64,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Book>, StoreError> {
        Ok(self
            .tables()
            .books
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn get_book(&self, owner_id: i64, book_id: i64) -> Result<Option<Book>, StoreError> {
        Ok(self
            .tables()
            .books
            .iter()
            .find(|b| b.id == book_id && b.owner_id == owner_id)
            .cloned())
    }

    async fn update_book(
        &self,
        owner_id: i64,
        book_id: i64,
        book: &NewBook,
    ) -> Result<Option<Book>, StoreError> {
        let mut t = self.tables();
        let Some(row) = t
            .books
            .iter_mut()
            .find(|b| b.id == book_id && b.owner_id == owner_id)
        else {
            return Ok(None);
        };
        row.title = book.title.clone();
        row.author = book.author.clone();
        row.published_date = book.published_date;
        Ok(Some(row.clone()))
    }

    async fn delete_book(&self, owner_id: i64, book_id: i64) -> Result<bool, StoreError> {
        let mut t = self.tables();
        let before = t.books.len();
        t.books.retain(|b| !(b.id == book_id && b.owner_id == owner_id));
        Ok(t.books.len() != before)
    }
}
