//! Pagination wrapper.
//!
//! The domain contract is 1-based; the engines are 0-based. Conversion
//! happens here and nowhere else. Paged queries always sort by creation
//! time, newest first; the sort is not caller-configurable in this layer.

use crate::domain::{Page, Pageable};
use crate::store::{DocumentPage, PageQuery, Sort, SortKey};

/// Converts a domain page request into the engine-native form.
pub fn page_query(pageable: &Pageable) -> PageQuery {
    PageQuery {
        page: pageable.page_number.saturating_sub(1),
        size: pageable.page_size,
        sort: Sort::descending(SortKey::CreatedAt),
    }
}

/// Converts an engine-native page back into a domain page, mapping each
/// document through `map`.
pub fn to_page<D, T>(native: DocumentPage<D>, map: impl FnMut(D) -> T) -> Page<T> {
    let content: Vec<T> = native.content.into_iter().map(map).collect();
    Page::new(content, native.page + 1, native.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SortOrder;

    #[test]
    fn page_query_is_zero_based_with_fixed_sort() {
        let query = page_query(&Pageable::new(3, 20));
        assert_eq!(query.page, 2);
        assert_eq!(query.size, 20);
        assert_eq!(query.sort.key, SortKey::CreatedAt);
        assert_eq!(query.sort.order, SortOrder::Descending);
    }

    #[test]
    fn to_page_restores_the_one_based_number() {
        let native = DocumentPage {
            content: vec![1, 2, 3],
            page: 2,
            total: 23,
        };
        let page = to_page(native, |n| n * 10);
        assert_eq!(page.page_number, 3);
        assert_eq!(page.page_elements, 3);
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.content, vec![10, 20, 30]);
    }
}
