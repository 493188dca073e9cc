//! Structured catalog query descriptors.
//!
//! A [`QueryPlan`] is a conjunction of typed [`Predicate`]s plus a sort key and
//! a page window. Filter values only ever travel as data inside the predicates;
//! the persistence layer binds them as query parameters.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Number of books shown per page when the caller does not ask otherwise.
pub const DEFAULT_PAGE_SIZE: i64 = 8;

/// Text columns that support equality filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Genre,
    OnSale,
}

impl TextField {
    pub const fn column(self) -> &'static str {
        match self {
            TextField::Genre => "genre",
            TextField::OnSale => "on_sale",
        }
    }
}

/// Numeric columns that support range filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericField {
    Price,
}

impl NumericField {
    pub const fn column(self) -> &'static str {
        match self {
            NumericField::Price => "price",
        }
    }
}

/// Single filter condition applied to stored books.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Equals { field: TextField, value: String },
    /// Inclusive on both ends.
    Between {
        field: NumericField,
        low: f64,
        high: f64,
    },
}

impl Display for Predicate {
    /// Renders the predicate with `?` placeholders in place of values.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Equals { field, .. } => write!(f, "{} = ?", field.column()),
            Predicate::Between { field, .. } => write!(f, "{} BETWEEN ? AND ?", field.column()),
        }
    }
}

/// Ordering applied to the listing. `None` keeps the store's natural order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SortKey {
    #[default]
    None,
    PriceAscending,
    PriceDescending,
    NameAscending,
    NameDescending,
}

impl SortKey {
    /// Maps the `sortBy` request value. Unknown values fall back to [`SortKey::None`].
    pub fn from_param(value: &str) -> Self {
        match value {
            "priceASC" => SortKey::PriceAscending,
            "priceDESC" => SortKey::PriceDescending,
            "alphaASC" => SortKey::NameAscending,
            "alphaDESC" => SortKey::NameDescending,
            _ => SortKey::None,
        }
    }

    /// Inverse of [`SortKey::from_param`].
    pub const fn as_param(self) -> Option<&'static str> {
        match self {
            SortKey::None => None,
            SortKey::PriceAscending => Some("priceASC"),
            SortKey::PriceDescending => Some("priceDESC"),
            SortKey::NameAscending => Some("alphaASC"),
            SortKey::NameDescending => Some("alphaDESC"),
        }
    }
}

/// Inclusive price bounds. Only built when both ends are known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// `LIMIT`/`OFFSET` pair of a listing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl PageWindow {
    /// Resolves the window from the optional page size, raw offset and
    /// 1-based page index.
    ///
    /// Non-positive page sizes fall back to [`DEFAULT_PAGE_SIZE`] and negative
    /// offsets clamp to zero. A page index above one replaces the raw offset
    /// with `(page - 1) * limit`; `page=1` leaves an explicit offset alone.
    ///
    /// The offset is capped so that `offset + limit` stays representable.
    pub fn resolve(page_size: Option<i64>, offset: Option<i64>, page: Option<i64>) -> Self {
        let limit = page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = match page.filter(|page| *page > 1) {
            Some(page) => (page - 1).saturating_mul(limit),
            None => offset.unwrap_or(0).max(0),
        };
        Self {
            limit,
            offset: offset.min(i64::MAX - limit),
        }
    }

    /// 1-based index of the page this window starts on.
    pub const fn page_number(self) -> i64 {
        (self.offset / self.limit).saturating_add(1)
    }
}

/// Validated filter, sort and pagination intent of a listing request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    pub genre: Option<String>,
    pub on_sale: Option<String>,
    pub price_range: Option<PriceRange>,
    pub sort: SortKey,
    pub window: PageWindow,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn on_sale(mut self, on_sale: impl Into<String>) -> Self {
        self.on_sale = Some(on_sale.into());
        self
    }

    pub fn price_between(mut self, low: f64, high: f64) -> Self {
        self.price_range = Some(PriceRange { low, high });
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, window: PageWindow) -> Self {
        self.window = window;
        self
    }

    /// Turns every active filter into exactly one predicate.
    pub fn into_plan(self) -> QueryPlan {
        let mut predicates = Vec::with_capacity(3);

        if let Some(value) = self.genre.filter(|v| !v.is_empty()) {
            predicates.push(Predicate::Equals {
                field: TextField::Genre,
                value,
            });
        }
        if let Some(value) = self.on_sale.filter(|v| !v.is_empty()) {
            predicates.push(Predicate::Equals {
                field: TextField::OnSale,
                value,
            });
        }
        if let Some(PriceRange { low, high }) = self.price_range {
            predicates.push(Predicate::Between {
                field: NumericField::Price,
                low,
                high,
            });
        }

        QueryPlan {
            predicates,
            sort: self.sort,
            window: self.window,
        }
    }
}

/// Executable, parameter-bound description of a catalog listing.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryPlan {
    predicates: Vec<Predicate>,
    sort: SortKey,
    window: PageWindow,
}

impl QueryPlan {
    /// Predicates combined with `AND`. Also the input of the matching-count query.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }
}

impl Display for QueryPlan {
    /// Placeholder-only rendering used in log lines.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "books")?;
        for (index, predicate) in self.predicates.iter().enumerate() {
            let connective = if index == 0 { "WHERE" } else { "AND" };
            write!(f, " {connective} {predicate}")?;
        }
        match self.sort {
            SortKey::None => {}
            SortKey::PriceAscending => write!(f, " ORDER BY price")?,
            SortKey::PriceDescending => write!(f, " ORDER BY price DESC")?,
            SortKey::NameAscending => write!(f, " ORDER BY name")?,
            SortKey::NameDescending => write!(f, " ORDER BY name DESC")?,
        }
        write!(
            f,
            " LIMIT {} OFFSET {}",
            self.window.limit, self.window.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_index_drives_offset() {
        assert_eq!(PageWindow::resolve(Some(8), None, Some(1)).offset, 0);
        assert_eq!(PageWindow::resolve(Some(8), None, Some(3)).offset, 16);
    }

    #[test]
    fn page_index_overrides_raw_offset() {
        let window = PageWindow::resolve(Some(8), Some(40), Some(2));
        assert_eq!(window, PageWindow { limit: 8, offset: 8 });
    }

    #[test]
    fn first_page_index_keeps_raw_offset() {
        assert_eq!(PageWindow::resolve(Some(8), Some(16), Some(1)).offset, 16);
        assert_eq!(PageWindow::resolve(Some(8), Some(16), Some(0)).offset, 16);
    }

    #[test]
    fn huge_offset_is_capped_below_overflow() {
        let window = PageWindow::resolve(None, Some(i64::MAX), None);
        assert_eq!(window.offset, i64::MAX - DEFAULT_PAGE_SIZE);
        assert!(window.offset.checked_add(window.limit).is_some());

        let window = PageWindow::resolve(Some(1), None, Some(i64::MAX));
        assert_eq!(window.offset, i64::MAX - 1);
        assert_eq!(window.page_number(), i64::MAX);
    }

    #[test]
    fn raw_offset_used_without_page_index() {
        let window = PageWindow::resolve(None, Some(24), None);
        assert_eq!(window, PageWindow { limit: 8, offset: 24 });
        assert_eq!(window.page_number(), 4);
    }

    #[test]
    fn non_positive_page_size_falls_back_to_default() {
        assert_eq!(PageWindow::resolve(Some(0), None, None).limit, DEFAULT_PAGE_SIZE);
        assert_eq!(PageWindow::resolve(Some(-3), None, None).limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn negative_offset_and_page_are_ignored() {
        assert_eq!(PageWindow::resolve(None, Some(-8), Some(0)).offset, 0);
    }

    #[test]
    fn unknown_sort_value_means_natural_order() {
        assert_eq!(SortKey::from_param("bogus"), SortKey::None);
        assert_eq!(SortKey::from_param(""), SortKey::None);
        assert_eq!(SortKey::from_param("priceDESC"), SortKey::PriceDescending);
    }

    #[test]
    fn sort_params_round_trip() {
        for key in [
            SortKey::PriceAscending,
            SortKey::PriceDescending,
            SortKey::NameAscending,
            SortKey::NameDescending,
        ] {
            assert_eq!(SortKey::from_param(key.as_param().unwrap()), key);
        }
        assert_eq!(SortKey::None.as_param(), None);
    }

    #[test]
    fn one_predicate_per_active_filter() {
        let plan = FilterSpec::new()
            .genre("Fantasy")
            .on_sale("yes")
            .price_between(5.0, 10.0)
            .into_plan();

        assert_eq!(
            plan.predicates(),
            &[
                Predicate::Equals {
                    field: TextField::Genre,
                    value: "Fantasy".to_string(),
                },
                Predicate::Equals {
                    field: TextField::OnSale,
                    value: "yes".to_string(),
                },
                Predicate::Between {
                    field: NumericField::Price,
                    low: 5.0,
                    high: 10.0,
                },
            ]
        );
    }

    #[test]
    fn empty_text_filters_produce_no_predicate() {
        let plan = FilterSpec::new().genre("").on_sale("").into_plan();
        assert!(plan.predicates().is_empty());
    }

    #[test]
    fn rendered_plan_never_has_dangling_connectives() {
        let specs = [
            FilterSpec::new(),
            FilterSpec::new().genre("Poetry"),
            FilterSpec::new().on_sale("true"),
            FilterSpec::new().price_between(1.0, 2.0),
            FilterSpec::new().genre("Poetry").on_sale("true"),
            FilterSpec::new().genre("Poetry").price_between(1.0, 2.0),
            FilterSpec::new().on_sale("true").price_between(1.0, 2.0),
            FilterSpec::new()
                .genre("Poetry")
                .on_sale("true")
                .price_between(1.0, 2.0)
                .sort(SortKey::NameDescending),
        ];

        for spec in specs {
            let rendered = spec.into_plan().to_string();
            let where_clause = rendered
                .split(" ORDER BY")
                .next()
                .and_then(|head| head.split(" LIMIT").next())
                .unwrap();
            assert!(!where_clause.ends_with("AND"), "{rendered}");
            assert!(!where_clause.ends_with("WHERE"), "{rendered}");
            assert!(!where_clause.contains("AND AND"), "{rendered}");
            assert!(!where_clause.contains("WHERE AND"), "{rendered}");
        }
    }

    #[test]
    fn rendered_plan_never_contains_filter_values() {
        let hostile = "x' OR '1'='1'; DROP TABLE books; --";
        let plan = FilterSpec::new().genre(hostile).on_sale(hostile).into_plan();

        let rendered = plan.to_string();

        assert_eq!(rendered, "books WHERE genre = ? AND on_sale = ? LIMIT 8 OFFSET 0");
        assert!(
            plan.predicates()
                .iter()
                .all(|p| matches!(p, Predicate::Equals { value, .. } if value == hostile))
        );
    }
}
