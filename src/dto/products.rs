use serde::Serialize;

use crate::domain::book::Book;
use crate::domain::filter::SortKey;
use crate::pagination::Paginated;

/// Data required to render the product listing.
#[derive(Debug, Serialize)]
pub struct ProductsPageData {
    pub books: Paginated<Book>,
    pub sort: SortKey,
    /// Filter parameters to carry over into page links.
    pub filter_query: String,
}
