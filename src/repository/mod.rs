//! Persistence boundary of the catalog.
//!
//! Services depend on the reader/writer traits only; [`DieselRepository`] is
//! the SQLite-backed implementation used by the server.

use crate::db::{DbConnection, DbPool};
use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::filter::{Predicate, QueryPlan};
use crate::domain::types::{BookId, Username};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod book;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod user;

/// Diesel-backed repository sharing one connection pool across all traits.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

pub trait BookReader {
    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>>;
    /// Every book ordered by id, for the administration list.
    fn list_books(&self) -> RepositoryResult<Vec<Book>>;
    /// Executes the plan: predicates, ordering and page window.
    fn find_books(&self, plan: &QueryPlan) -> RepositoryResult<Vec<Book>>;
    /// Number of books matching all predicates, ignoring the page window.
    fn count_books(&self, predicates: &[Predicate]) -> RepositoryResult<usize>;
}

pub trait BookWriter {
    fn create_book(&self, new_book: &NewBook) -> RepositoryResult<Book>;
    /// Returns the number of updated rows.
    fn update_book(&self, id: BookId, updates: &UpdateBook) -> RepositoryResult<usize>;
    /// Returns the number of removed rows.
    fn delete_book(&self, id: BookId) -> RepositoryResult<usize>;
}

pub trait UserReader {
    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}
