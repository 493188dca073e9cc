use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AuthorName, BookId, BookName, PageCount, Price};

/// Catalog entry as stored in the `books` table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub name: BookName,
    pub author: AuthorName,
    pub pages: PageCount,
    pub publication_date: NaiveDate,
    pub genre: String,
    /// Opaque sale marker compared by plain string equality.
    pub on_sale: String,
    pub price: Price,
}

/// Payload for inserting a new book.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBook {
    pub name: BookName,
    pub author: AuthorName,
    pub pages: PageCount,
    pub publication_date: NaiveDate,
    pub genre: String,
    pub on_sale: String,
    pub price: Price,
}

/// Full replacement of a book's editable fields.
pub type UpdateBook = NewBook;

impl NewBook {
    #[must_use]
    pub fn new(
        name: BookName,
        author: AuthorName,
        pages: PageCount,
        publication_date: NaiveDate,
        genre: impl Into<String>,
        on_sale: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            name,
            author,
            pages,
            publication_date,
            genre: genre.into().trim().to_string(),
            on_sale: on_sale.into().trim().to_string(),
            price,
        }
    }
}
