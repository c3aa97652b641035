//! Page slicing for list endpoints.
//!
//! Lists are loaded in full, ordered by the store, and then cut into
//! fixed-size pages addressed by a 1-based page number.

use crate::types::PageNumber;

/// Number of items per page.
pub const PAGE_SIZE: usize = 10;

/// Page used when the request does not name one.
pub const DEFAULT_PAGE: PageNumber = 1;

/// Return the slice of `items` that falls on `page`.
///
/// Page `p` covers `items[(p - 1) * PAGE_SIZE .. p * PAGE_SIZE]`, with the upper
/// bound clamped to `items.len()`. Pages below 1 and pages past the end yield
/// an empty slice.
///
/// ```
/// use casting_core::pagination::paginate;
/// let items: Vec<u32> = (1..=25).collect();
/// assert_eq!(paginate(&items, 3), &[21, 22, 23, 24, 25]);
/// assert!(paginate(&items, 4).is_empty());
/// ```
pub fn paginate<T>(items: &[T], page: PageNumber) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(PAGE_SIZE))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Parse a raw `page` query value, falling back to [`DEFAULT_PAGE`] when it is
/// absent or not an integer.
pub fn parse_page(raw: Option<&str>) -> PageNumber {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_PAGE)
}
