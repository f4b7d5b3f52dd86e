use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{catalog::ShopFilter, response::Meta};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page number, default 1
    pub page: Option<usize>,
    /// Items per page, default 20
    pub per_page: Option<usize>,
}

impl Pagination {
    pub fn normalize(&self) -> (usize, usize, usize) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }

    /// Cuts one page out of an already ordered list.
    pub fn apply<T>(&self, items: Vec<T>) -> (Vec<T>, Meta) {
        let (page, per_page, offset) = self.normalize();
        let total = items.len();
        let page_items = items.into_iter().skip(offset).take(per_page).collect();
        (page_items, Meta::new(page, per_page, total))
    }
}

// Query strings are flat, so pagination fields are repeated here rather than
// flattened in.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Page number, default 1
    pub page: Option<usize>,
    /// Items per page, default 20
    pub per_page: Option<usize>,
    /// Case-insensitive match on the product name
    pub q: Option<String>,
    /// Shop quick filter
    pub filter: Option<ShopFilter>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminProductQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub q: Option<String>,
}

impl AdminProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_pages_and_reports_total() {
        let p = Pagination {
            page: Some(2),
            per_page: Some(3),
        };
        let (items, meta) = p.apply((1..=8).collect::<Vec<_>>());
        assert_eq!(items, vec![4, 5, 6]);
        assert_eq!(meta, Meta::new(2, 3, 8));

        let (items, _) = Pagination::default().apply(vec![1, 2]);
        assert_eq!(items, vec![1, 2]);

        let far = Pagination {
            page: Some(usize::MAX),
            per_page: Some(2),
        };
        let (items, meta) = far.apply(vec![1, 2, 3]);
        assert!(items.is_empty());
        assert_eq!(meta, Meta::new(usize::MAX, 2, 3));
    }
}
