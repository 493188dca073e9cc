use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::book::Book;

/// Data required to render the book edit form.
#[derive(Debug, Serialize)]
pub struct BookPageData {
    /// `None` when creating a new book.
    pub book: Option<Book>,
    /// Date pre-filled in the form.
    pub publication_date: NaiveDate,
}

/// What a save request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}
