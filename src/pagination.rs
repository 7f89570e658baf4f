//! Fixed-size page windows over the full question sequence.

pub const QUESTIONS_PER_PAGE: usize = 10;

/// Page number from the raw `page` query value. Absent or non-numeric means page 1.
pub fn page_from_query(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(1)
}

/// Slice `[(page-1)*10, page*10)` of `items`, clamped to the data.
/// Pages below 1 and pages past the end are empty.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
