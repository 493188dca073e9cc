use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::filter::{NumericField, Predicate, QueryPlan, SortKey, TextField};
use crate::domain::types::BookId;
use crate::models::book::{Book as DbBook, NewBook as DbNewBook};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BookReader, BookWriter, DieselRepository};
use crate::schema::books;

/// Boxed `books` query with every predicate applied as a bound parameter.
fn filtered(predicates: &[Predicate]) -> books::BoxedQuery<'_, Sqlite> {
    let mut query = books::table.into_boxed::<Sqlite>();

    for predicate in predicates {
        query = match predicate {
            Predicate::Equals {
                field: TextField::Genre,
                value,
            } => query.filter(books::genre.eq(value.as_str())),
            Predicate::Equals {
                field: TextField::OnSale,
                value,
            } => query.filter(books::on_sale.eq(value.as_str())),
            Predicate::Between {
                field: NumericField::Price,
                low,
                high,
            } => query.filter(books::price.between(*low, *high)),
        };
    }

    query
}

fn into_domain(rows: Vec<DbBook>) -> RepositoryResult<Vec<Book>> {
    rows.into_iter()
        .map(|row| Book::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl BookReader for DieselRepository {
    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>> {
        let mut conn = self.conn()?;
        let book = books::table
            .find(id.get())
            .first::<DbBook>(&mut conn)
            .optional()?;

        book.map(Book::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_books(&self) -> RepositoryResult<Vec<Book>> {
        let mut conn = self.conn()?;
        let rows = books::table
            .order(books::id.asc())
            .load::<DbBook>(&mut conn)?;

        into_domain(rows)
    }

    fn find_books(&self, plan: &QueryPlan) -> RepositoryResult<Vec<Book>> {
        let mut conn = self.conn()?;

        let query = filtered(plan.predicates());
        let query = match plan.sort() {
            SortKey::None => query,
            SortKey::PriceAscending => query.order(books::price.asc()),
            SortKey::PriceDescending => query.order(books::price.desc()),
            SortKey::NameAscending => query.order(books::name.asc()),
            SortKey::NameDescending => query.order(books::name.desc()),
        };

        let window = plan.window();
        let rows = query
            .limit(window.limit)
            .offset(window.offset)
            .load::<DbBook>(&mut conn)?;

        into_domain(rows)
    }

    fn count_books(&self, predicates: &[Predicate]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total = filtered(predicates).count().get_result::<i64>(&mut conn)?;

        Ok(usize::try_from(total).unwrap_or_default())
    }
}

impl BookWriter for DieselRepository {
    fn create_book(&self, new_book: &NewBook) -> RepositoryResult<Book> {
        let mut conn = self.conn()?;
        let insertable: DbNewBook = new_book.into();

        let created = diesel::insert_into(books::table)
            .values(&insertable)
            .get_result::<DbBook>(&mut conn)?;

        Ok(Book::try_from(created)?)
    }

    fn update_book(&self, id: BookId, updates: &UpdateBook) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let changes: DbNewBook = updates.into();

        let affected = diesel::update(books::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_book(&self, id: BookId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(books::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
