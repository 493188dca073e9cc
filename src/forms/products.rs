//! Query builder for the product listing.
//!
//! Raw `/products` query parameters are validated into a [`FilterSpec`] and
//! turned into a [`QueryPlan`]. Nothing here performs I/O.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::filter::{FilterSpec, PageWindow, QueryPlan, SortKey};
use crate::forms::{FormError, non_blank, parse_field};

/// Recognized listing parameters. Anything else in the query string is ignored.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl ProductsQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).cloned();
        Self {
            genre: get("genre"),
            on_sale: get("onSale"),
            price_from: get("priceFrom"),
            price_to: get("priceTo"),
            sort_by: get("sortBy"),
            limit: get("limit"),
            offset: get("offset"),
            page: get("page"),
        }
    }

    /// Query string carrying the filters and page size but no position, so
    /// page links can append their own `offset`.
    pub fn filter_query(&self) -> String {
        let filters = Self {
            offset: None,
            page: None,
            ..self.clone()
        };
        serde_html_form::to_string(&filters).unwrap_or_default()
    }
}

fn parse_price(value: Option<&str>, field: &'static str) -> Result<Option<f64>, FormError> {
    match parse_field::<f64>(value, field)? {
        Some(price) if !price.is_finite() => Err(FormError::InvalidField { field }),
        other => Ok(other),
    }
}

impl TryFrom<&ProductsQuery> for FilterSpec {
    type Error = FormError;

    fn try_from(query: &ProductsQuery) -> Result<Self, Self::Error> {
        let price_from = parse_price(query.price_from.as_deref(), "priceFrom")?;
        let price_to = parse_price(query.price_to.as_deref(), "priceTo")?;
        let limit = parse_field::<i64>(query.limit.as_deref(), "limit")?;
        let offset = parse_field::<i64>(query.offset.as_deref(), "offset")?;
        let page = parse_field::<i64>(query.page.as_deref(), "page")?;

        let mut spec = FilterSpec::new()
            .sort(
                non_blank(query.sort_by.as_deref())
                    .map(SortKey::from_param)
                    .unwrap_or_default(),
            )
            .paginate(PageWindow::resolve(limit, offset, page));

        if let Some(genre) = non_blank(query.genre.as_deref()) {
            spec = spec.genre(genre);
        }
        if let Some(on_sale) = non_blank(query.on_sale.as_deref()) {
            spec = spec.on_sale(on_sale);
        }
        // A lone bound is dropped on purpose.
        if let (Some(low), Some(high)) = (price_from, price_to) {
            spec = spec.price_between(low, high);
        }

        Ok(spec)
    }
}

/// Builds the listing plan from raw request parameters.
pub fn build_plan(params: &HashMap<String, String>) -> Result<QueryPlan, FormError> {
    let spec = FilterSpec::try_from(&ProductsQuery::from_params(params))?;
    Ok(spec.into_plan())
}
