//! Pagination utilities
//!
//! Pages are 1-indexed. A requested page past the end clamps to the last
//! page, and a page below 1 (or an unparsable one) becomes page 1.

/// Pagination metadata calculated from total results and requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed, within bounds)
    pub page: i64,
    /// Rows per page
    pub page_size: i64,
    /// Total number of pages (at least 1, even for an empty result)
    pub total_pages: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Calculate pagination metadata from total results and requested page
///
/// # Examples
/// ```
/// use tvs_search::pagination::calculate_pagination;
///
/// // 100 total results at 42 per page = 3 pages (42 + 42 + 16)
/// let p = calculate_pagination(100, 2, 42);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 42);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(100, 99, 42);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 84);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64, page_size: i64) -> Pagination {
    let page_size = page_size.max(1);
    let total_results = total_results.max(0);
    let total_pages = if total_results == 0 {
        1
    } else {
        (total_results - 1) / page_size + 1
    };
    let page = requested_page.clamp(1, total_pages);
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        page_size,
        total_pages,
        offset,
    }
}

/// Coerce a raw `page` parameter
///
/// Leading digits are read and the rest ignored, so `"2.5"` and `"3abc"`
/// mean pages 2 and 3. Missing, non-numeric, out-of-range or ≤ 0 means page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| {
        let value = value.trim_start();
        let unsigned = value.strip_prefix('+').unwrap_or(value);
        let digits = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .map_or(unsigned, |end| &unsigned[..end]);
        digits.parse::<i64>().ok()
    })
    .filter(|page| *page >= 1)
    .unwrap_or(1)
}

/// 1-based inclusive index range shown as "Showing start–end of total"
///
/// Returns `(0, 0)` for an empty result.
pub fn display_range(total_results: i64, pagination: &Pagination) -> (i64, i64) {
    if total_results <= 0 {
        return (0, 0);
    }
    let start = pagination.offset + 1;
    let end = pagination
        .offset
        .saturating_add(pagination.page_size)
        .min(total_results);
    (start, end)
}
