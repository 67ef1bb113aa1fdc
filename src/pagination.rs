use axum::http::header::HeaderMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{QueryError, QueryResult};

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Validated zero-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns `InvalidPageParameters` if `page < 0` or `size < 1`. Values are
    /// never clamped.
    pub fn new(page: i64, size: i64) -> QueryResult<Self> {
        match (u64::try_from(page), u64::try_from(size)) {
            (Ok(page), Ok(size)) if size > 0 => Ok(Self { page, size }),
            _ => Err(QueryError::InvalidPageParameters { page, size }),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Index of the first record in the window.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// `ceil(total / size)`; zero when there is nothing to page.
    #[must_use]
    pub const fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}

/// One page of records plus the metadata needed to walk the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageResult<T> {
    #[serde(rename = "persons")]
    pub records: Vec<T>,
    #[serde(rename = "pageNumber")]
    pub page_number: u64,
    #[serde(rename = "elementToPage")]
    pub page_size: u64,
    #[serde(rename = "countPage")]
    pub total_pages: u64,
    #[serde(rename = "countPersons")]
    pub total_matches: u64,
}

impl<T> PageResult<T> {
    /// Copies `records` into the output shape, keeping their order.
    pub fn assemble<R>(records: Vec<R>, total_matches: u64, page: &PageRequest) -> Self
    where
        R: Into<T>,
    {
        Self {
            records: records.into_iter().map(Into::into).collect(),
            page_number: page.page(),
            page_size: page.size(),
            total_pages: page.total_pages(total_matches),
            total_matches,
        }
    }
}

/// Drops anything that cannot appear in a header value.
fn sanitize_resource_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()).collect()
}

/// Builds the `Content-Range` header for a page window.
///
/// `persons 10-19/42` for a non-empty window, `persons */42` when the window
/// holds nothing (empty store or page past the end).
#[must_use]
pub fn calculate_content_range(
    page: &PageRequest,
    returned: usize,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);
    let offset = page.offset();

    let content_range = match u64::try_from(returned) {
        Ok(returned) if returned > 0 => {
            let last = offset.saturating_add(returned - 1);
            format!("{safe_name} {offset}-{last}/{total_count}")
        }
        _ => format!("{safe_name} */{total_count}"),
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = content_range.parse() {
        headers.insert("Content-Range", value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_rejects_bad_values() {
        assert!(matches!(
            PageRequest::new(0, 0),
            Err(QueryError::InvalidPageParameters { page: 0, size: 0 })
        ));
        assert!(PageRequest::new(0, -5).is_err());
        assert!(PageRequest::new(-1, 10).is_err());
    }

    #[test]
    fn test_page_request_accepts_minimums() {
        let page = PageRequest::new(0, 1).unwrap();
        assert_eq!(page.page(), 0);
        assert_eq!(page.size(), 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_default_is_first_page_of_ten() {
        assert_eq!(
            PageRequest::default(),
            PageRequest::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE).unwrap()
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 25).unwrap().offset(), 75);
        assert_eq!(PageRequest::new(i64::MAX, i64::MAX).unwrap().offset(), u64::MAX);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let cases = [
            (0, 10, 0),
            (1, 10, 1),
            (10, 10, 1),
            (11, 10, 2),
            (99, 10, 10),
            (100, 10, 10),
            (101, 10, 11),
            (7, 1, 7),
            (3, 1000, 1),
        ];
        for (total, size, expected) in cases {
            let page = PageRequest::new(0, size).unwrap();
            assert_eq!(page.total_pages(total), expected, "total={total} size={size}");
        }
    }

    #[test]
    fn test_assemble_echoes_request_and_keeps_order() {
        let page = PageRequest::new(2, 3).unwrap();
        let result: PageResult<String> = PageResult::assemble(vec!["c", "a", "b"], 8, &page);
        assert_eq!(result.records, vec!["c", "a", "b"]);
        assert_eq!(result.page_number, 2);
        assert_eq!(result.page_size, 3);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total_matches, 8);
    }

    #[test]
    fn test_assemble_empty() {
        let page = PageRequest::default();
        let result: PageResult<String> = PageResult::assemble(Vec::<String>::new(), 0, &page);
        assert!(result.records.is_empty());
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_page_result_wire_names() {
        let page = PageRequest::default();
        let result: PageResult<u8> = PageResult::assemble(vec![1u8], 1, &page);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["persons"], serde_json::json!([1]));
        assert_eq!(json["pageNumber"], 0);
        assert_eq!(json["elementToPage"], 10);
        assert_eq!(json["countPage"], 1);
        assert_eq!(json["countPersons"], 1);
    }

    #[test]
    fn test_content_range_normal() {
        let page = PageRequest::new(1, 10).unwrap();
        let headers = calculate_content_range(&page, 10, 100, "persons");
        let value = headers.get("Content-Range").unwrap().to_str().unwrap();
        assert_eq!(value, "persons 10-19/100");
    }

    #[test]
    fn test_content_range_short_last_page() {
        let page = PageRequest::new(4, 10).unwrap();
        let headers = calculate_content_range(&page, 2, 42, "persons");
        let value = headers.get("Content-Range").unwrap().to_str().unwrap();
        assert_eq!(value, "persons 40-41/42");
    }

    #[test]
    fn test_content_range_empty_window() {
        let page = PageRequest::new(9, 10).unwrap();
        let headers = calculate_content_range(&page, 0, 42, "persons");
        let value = headers.get("Content-Range").unwrap().to_str().unwrap();
        assert_eq!(value, "persons */42");
    }

    #[test]
    fn test_content_range_strips_control_characters() {
        let page = PageRequest::default();
        let headers = calculate_content_range(&page, 1, 1, "persons\r\nInjected: evil");
        let value = headers.get("Content-Range").unwrap().to_str().unwrap();
        assert!(!value.contains('\r'));
        assert!(!value.contains('\n'));
    }
}
