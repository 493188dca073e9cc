//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::filter::{Predicate, QueryPlan};
use crate::domain::types::{BookId, Username};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{BookReader, BookWriter, UserReader, UserWriter};

mock! {
    pub Repository {}

    impl BookReader for Repository {
        fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>>;
        fn list_books(&self) -> RepositoryResult<Vec<Book>>;
        fn find_books(&self, plan: &QueryPlan) -> RepositoryResult<Vec<Book>>;
        fn count_books(&self, predicates: &[Predicate]) -> RepositoryResult<usize>;
    }

    impl BookWriter for Repository {
        fn create_book(&self, new_book: &NewBook) -> RepositoryResult<Book>;
        fn update_book(&self, id: BookId, updates: &UpdateBook) -> RepositoryResult<usize>;
        fn delete_book(&self, id: BookId) -> RepositoryResult<usize>;
    }

    impl UserReader for Repository {
        fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}
