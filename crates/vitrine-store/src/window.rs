pub const DEFAULT_PAGE_SIZE: usize = 48;

#[derive(Debug, PartialEq, Eq)]
pub struct Window<'a, T> {
    pub items: &'a [T],
    pub has_more: bool,
    // length of the full filtered sequence, before pagination
    pub total: usize,
}

/// First `page * page_size` items of `filtered`, capped at its length.
///
/// The window does not detect a stale page: callers reset `page` to 1
/// whenever `filtered` changes.
pub fn visible<T>(filtered: &[T], page: usize, page_size: usize) -> Window<'_, T> {
    let end = page.saturating_mul(page_size).min(filtered.len());
    Window {
        items: &filtered[..end],
        has_more: end < filtered.len(),
        total: filtered.len(),
    }
}
