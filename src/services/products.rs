//! Filtered, sorted and paginated product listing.

use std::collections::HashMap;

use crate::domain::filter::FilterSpec;
use crate::dto::products::ProductsPageData;
use crate::forms::products::ProductsQuery;
use crate::pagination::Paginated;
use crate::repository::BookReader;
use crate::services::ServiceResult;

/// Validates the request parameters, then runs the page query and the
/// matching-count query. Invalid parameters never reach the repository.
pub fn list_products<R>(repo: &R, params: &HashMap<String, String>) -> ServiceResult<ProductsPageData>
where
    R: BookReader + ?Sized,
{
    let query = ProductsQuery::from_params(params);
    let plan = FilterSpec::try_from(&query)?.into_plan();
    log::debug!("Listing products: {plan}");

    let books = repo.find_books(&plan).map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;
    let total = repo.count_books(plan.predicates()).map_err(|err| {
        log::error!("Failed to count products: {err}");
        err
    })?;

    Ok(ProductsPageData {
        books: Paginated::new(books, total, plan.window()),
        sort: plan.sort(),
        filter_query: query.filter_query(),
    })
}
