use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::book::NewBook;
use crate::domain::types::{AuthorName, BookId, BookName, PageCount, Price};
use crate::forms::{FormError, non_blank, parse_field};

/// Date format used by the book form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `?id=` parameter of the book view and delete endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct BookIdQuery {
    pub id: Option<String>,
}

impl BookIdQuery {
    /// `None` when no id was given.
    pub fn book_id(&self) -> Result<Option<BookId>, FormError> {
        parse_book_id(self.id.as_deref())
    }
}

/// Missing, blank and `0` all mean "no book yet".
fn parse_book_id(raw: Option<&str>) -> Result<Option<BookId>, FormError> {
    match parse_field::<i32>(raw, "id")? {
        None | Some(0) => Ok(None),
        Some(id) => BookId::new(id)
            .map(Some)
            .map_err(|_| FormError::InvalidField { field: "id" }),
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
/// Form data for creating or updating a book. Missing fields deserialize as
/// empty and are rejected by validation instead of by the extractor.
pub struct SaveBookForm {
    /// Empty for a new book.
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub author: String,
    pub pages: String,
    /// `YYYY-MM-DD`.
    pub publication_date: String,
    pub genre: String,
    pub on_sale: String,
    pub price: String,
}

/// Validated contents of a [`SaveBookForm`].
#[derive(Debug, PartialEq)]
pub struct SaveBookPayload {
    pub id: Option<BookId>,
    pub book: NewBook,
}

impl TryFrom<SaveBookForm> for SaveBookPayload {
    type Error = FormError;

    fn try_from(form: SaveBookForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = parse_book_id(Some(&form.id))?;
        let pages = parse_field::<i32>(Some(&form.pages), "pages")?.unwrap_or_default();
        let pages = PageCount::new(pages).map_err(|_| FormError::InvalidField { field: "pages" })?;
        let price = parse_field::<f64>(Some(&form.price), "price")?.unwrap_or_default();
        let price = Price::new(price).map_err(|_| FormError::InvalidField { field: "price" })?;
        let publication_date = non_blank(Some(&form.publication_date))
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok())
            .ok_or(FormError::InvalidField {
                field: "publicationDate",
            })?;
        let name = BookName::new(form.name).map_err(|_| FormError::InvalidField { field: "name" })?;
        let author =
            AuthorName::new(form.author).map_err(|_| FormError::InvalidField { field: "author" })?;

        Ok(Self {
            id,
            book: NewBook::new(
                name,
                author,
                pages,
                publication_date,
                form.genre,
                form.on_sale,
                price,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SaveBookForm {
        SaveBookForm {
            id: String::new(),
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            pages: "412".to_string(),
            publication_date: "1965-08-01".to_string(),
            genre: "Sci-Fi".to_string(),
            on_sale: "yes".to_string(),
            price: "9.99".to_string(),
        }
    }

    #[test]
    fn complete_form_without_id_is_a_new_book() {
        let payload = SaveBookPayload::try_from(form()).unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.book.name.as_str(), "Dune");
        assert_eq!(payload.book.pages.get(), 412);
        assert_eq!(
            payload.book.publication_date,
            NaiveDate::from_ymd_opt(1965, 8, 1).unwrap()
        );
        assert_eq!(payload.book.price.get(), 9.99);
    }

    #[test]
    fn zero_id_is_a_new_book() {
        let payload = SaveBookPayload::try_from(SaveBookForm {
            id: "0".to_string(),
            ..form()
        })
        .unwrap();
        assert_eq!(payload.id, None);
    }

    #[test]
    fn existing_id_is_kept() {
        let payload = SaveBookPayload::try_from(SaveBookForm {
            id: "17".to_string(),
            ..form()
        })
        .unwrap();
        assert_eq!(payload.id, Some(BookId::new(17).unwrap()));
    }

    #[test]
    fn blank_pages_and_price_default_to_zero() {
        let payload = SaveBookPayload::try_from(SaveBookForm {
            pages: String::new(),
            price: " ".to_string(),
            ..form()
        })
        .unwrap();
        assert_eq!(payload.book.pages.get(), 0);
        assert_eq!(payload.book.price.get(), 0.0);
    }

    #[test]
    fn malformed_fields_are_reported_by_name() {
        let cases = [
            (SaveBookForm { id: "abc".to_string(), ..form() }, "id"),
            (SaveBookForm { id: "-2".to_string(), ..form() }, "id"),
            (SaveBookForm { pages: "many".to_string(), ..form() }, "pages"),
            (SaveBookForm { pages: "-1".to_string(), ..form() }, "pages"),
            (SaveBookForm { price: "cheap".to_string(), ..form() }, "price"),
            (
                SaveBookForm { publication_date: "01/08/1965".to_string(), ..form() },
                "publicationDate",
            ),
            (
                SaveBookForm { publication_date: String::new(), ..form() },
                "publicationDate",
            ),
            (SaveBookForm { name: "   ".to_string(), ..form() }, "name"),
        ];

        for (form, field) in cases {
            let err = SaveBookPayload::try_from(form).unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn empty_name_fails_validation() {
        let err = SaveBookPayload::try_from(SaveBookForm {
            name: String::new(),
            ..form()
        })
        .unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
    }

    #[test]
    fn id_query_parses_optional_id() {
        assert_eq!(BookIdQuery::default().book_id().unwrap(), None);
        let query = BookIdQuery {
            id: Some("5".to_string()),
        };
        assert_eq!(query.book_id().unwrap(), Some(BookId::new(5).unwrap()));
        let bad = BookIdQuery {
            id: Some("five".to_string()),
        };
        assert_eq!(bad.book_id().unwrap_err().field(), Some("id"));
    }
}
