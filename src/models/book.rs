use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::book::{Book as DomainBook, NewBook as DomainNewBook};
use crate::domain::types::{
    AuthorName, BookId, BookName, PageCount, Price, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::books)]
/// Diesel model for [`crate::domain::book::Book`].
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub pages: i32,
    pub publication_date: NaiveDate,
    pub genre: String,
    pub on_sale: String,
    pub price: f64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::books)]
/// Insertable and changeset form of [`Book`].
pub struct NewBook<'a> {
    pub name: &'a str,
    pub author: &'a str,
    pub pages: i32,
    pub publication_date: NaiveDate,
    pub genre: &'a str,
    pub on_sale: &'a str,
    pub price: f64,
}

impl TryFrom<Book> for DomainBook {
    type Error = TypeConstraintError;

    fn try_from(book: Book) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookId::new(book.id)?,
            name: BookName::new(book.name)?,
            author: AuthorName::new(book.author)?,
            pages: PageCount::new(book.pages)?,
            publication_date: book.publication_date,
            genre: book.genre,
            on_sale: book.on_sale,
            price: Price::new(book.price)?,
        })
    }
}

impl<'a> From<&'a DomainNewBook> for NewBook<'a> {
    fn from(book: &'a DomainNewBook) -> Self {
        Self {
            name: book.name.as_str(),
            author: book.author.as_str(),
            pages: book.pages.get(),
            publication_date: book.publication_date,
            genre: book.genre.as_str(),
            on_sale: book.on_sale.as_str(),
            price: book.price.get(),
        }
    }
}
