//! Services behind the book administration pages.

use chrono::Local;

use crate::domain::book::Book;
use crate::dto::books::{BookPageData, SaveOutcome};
use crate::forms::books::{BookIdQuery, SaveBookForm, SaveBookPayload};
use crate::repository::{BookReader, BookWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads every book for the administration list.
pub fn list_books<R>(repo: &R) -> ServiceResult<Vec<Book>>
where
    R: BookReader + ?Sized,
{
    Ok(repo.list_books()?)
}

/// Loads the book edit form. Without an id the form is empty and dated today.
pub fn load_book<R>(repo: &R, query: &BookIdQuery) -> ServiceResult<BookPageData>
where
    R: BookReader + ?Sized,
{
    let Some(id) = query.book_id()? else {
        return Ok(BookPageData {
            book: None,
            publication_date: Local::now().date_naive(),
        });
    };

    let book = repo.get_book_by_id(id)?.ok_or(ServiceError::NotFound)?;

    Ok(BookPageData {
        publication_date: book.publication_date,
        book: Some(book),
    })
}

/// Inserts a new book or replaces the fields of an existing one.
pub fn save_book<R>(repo: &R, form: SaveBookForm) -> ServiceResult<SaveOutcome>
where
    R: BookWriter + ?Sized,
{
    let SaveBookPayload { id, book } = SaveBookPayload::try_from(form)?;

    match id {
        None => {
            let created = repo.create_book(&book)?;
            log::info!("Created book {}", created.id);
            Ok(SaveOutcome::Created)
        }
        Some(id) => match repo.update_book(id, &book)? {
            0 => Err(ServiceError::NotFound),
            _ => {
                log::info!("Updated book {id}");
                Ok(SaveOutcome::Updated)
            }
        },
    }
}

/// Removes the book named by the query. Returns the number of removed rows;
/// a request without an id removes nothing.
pub fn delete_book<R>(repo: &R, query: &BookIdQuery) -> ServiceResult<usize>
where
    R: BookWriter + ?Sized,
{
    let Some(id) = query.book_id()? else {
        return Ok(0);
    };

    let removed = repo.delete_book(id)?;
    log::info!("Deleted {removed} book(s) with id {id}");

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{AuthorName, BookId, BookName, PageCount, Price};
    use crate::forms::FormError;
    use crate::repository::mock::MockRepository;

    fn sample_book(id: i32) -> Book {
        Book {
            id: BookId::new(id).unwrap(),
            name: BookName::new("Dune").unwrap(),
            author: AuthorName::new("Frank Herbert").unwrap(),
            pages: PageCount::new(412).unwrap(),
            publication_date: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
            genre: "Sci-Fi".to_string(),
            on_sale: "yes".to_string(),
            price: Price::new(9.99).unwrap(),
        }
    }

    fn form(id: &str) -> SaveBookForm {
        SaveBookForm {
            id: id.to_string(),
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            pages: "412".to_string(),
            publication_date: "1965-08-01".to_string(),
            genre: "Sci-Fi".to_string(),
            on_sale: "yes".to_string(),
            price: "9.99".to_string(),
        }
    }

    fn id_query(id: &str) -> BookIdQuery {
        BookIdQuery {
            id: Some(id.to_string()),
        }
    }

    #[test]
    fn list_returns_repository_books() {
        let mut repo = MockRepository::new();
        repo.expect_list_books()
            .times(1)
            .returning(|| Ok(vec![sample_book(1), sample_book(2)]));

        let books = list_books(&repo).unwrap();

        assert_eq!(books.len(), 2);
    }

    #[test]
    fn new_book_form_is_dated_today() {
        let mut repo = MockRepository::new();
        repo.expect_get_book_by_id().times(0);

        let data = load_book(&repo, &BookIdQuery::default()).unwrap();

        assert!(data.book.is_none());
        assert_eq!(data.publication_date, Local::now().date_naive());
    }

    #[test]
    fn existing_book_is_loaded() {
        let mut repo = MockRepository::new();
        repo.expect_get_book_by_id()
            .withf(|id| id.get() == 7)
            .times(1)
            .returning(|id| Ok(Some(sample_book(id.get()))));

        let data = load_book(&repo, &id_query("7")).unwrap();

        assert_eq!(data.book.unwrap().id.get(), 7);
        assert_eq!(
            data.publication_date,
            NaiveDate::from_ymd_opt(1965, 8, 1).unwrap()
        );
    }

    #[test]
    fn missing_book_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_book_by_id().returning(|_| Ok(None));

        let result = load_book(&repo, &id_query("7"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn save_without_id_creates() {
        let mut repo = MockRepository::new();
        repo.expect_create_book()
            .withf(|book| book.name.as_str() == "Dune" && book.price.get() == 9.99)
            .times(1)
            .returning(|_| Ok(sample_book(1)));
        repo.expect_update_book().times(0);

        assert_eq!(save_book(&repo, form("")).unwrap(), SaveOutcome::Created);
    }

    #[test]
    fn save_with_id_updates() {
        let mut repo = MockRepository::new();
        repo.expect_create_book().times(0);
        repo.expect_update_book()
            .withf(|id, _| id.get() == 3)
            .times(1)
            .returning(|_, _| Ok(1));

        assert_eq!(save_book(&repo, form("3")).unwrap(), SaveOutcome::Updated);
    }

    #[test]
    fn updating_unknown_book_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_book().returning(|_, _| Ok(0));

        assert!(matches!(
            save_book(&repo, form("99")),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn invalid_form_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_book().times(0);
        repo.expect_update_book().times(0);

        let result = save_book(
            &repo,
            SaveBookForm {
                price: "free".to_string(),
                ..form("")
            },
        );

        assert!(matches!(
            result,
            Err(ServiceError::Form(FormError::InvalidField { field: "price" }))
        ));
    }

    #[test]
    fn delete_without_id_is_a_no_op() {
        let mut repo = MockRepository::new();
        repo.expect_delete_book().times(0);

        assert_eq!(delete_book(&repo, &BookIdQuery::default()).unwrap(), 0);
    }

    #[test]
    fn delete_reports_removed_rows() {
        let mut repo = MockRepository::new();
        repo.expect_delete_book()
            .withf(|id| id.get() == 4)
            .times(1)
            .returning(|_| Ok(1));

        assert_eq!(delete_book(&repo, &id_query("4")).unwrap(), 1);
    }
}
