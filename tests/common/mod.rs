//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use bookstore_catalog::db::{DbPool, establish_connection_pool};
use chrono::NaiveDate;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use bookstore_catalog::domain::book::NewBook;
use bookstore_catalog::domain::types::{AuthorName, BookName, PageCount, Price};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database living in a temporary directory. The files are
/// removed when the value is dropped.
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url).expect("build pool");
        let mut conn = pool.get().expect("checkout connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { dir, path, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

pub fn new_book(name: &str, genre: &str, on_sale: &str, price: f64) -> NewBook {
    NewBook::new(
        BookName::new(name).unwrap(),
        AuthorName::new("Test Author").unwrap(),
        PageCount::new(200).unwrap(),
        NaiveDate::from_ymd_opt(2020, 5, 17).unwrap(),
        genre,
        on_sale,
        Price::new(price).unwrap(),
    )
}
