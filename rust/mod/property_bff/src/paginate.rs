//! Pagination over the filtered list.

/// Page sizes offered to the user.
pub const PAGE_SIZES: [usize; 4] = [3, 6, 9, 12];

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One page of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page.
    pub items: &'a [T],
    /// Total number of pages; zero for an empty list.
    pub total_pages: usize,
    /// 1-based position of the first item shown, zero when nothing is shown.
    pub first: usize,
    /// 1-based position of the last item shown, zero when nothing is shown.
    pub last: usize,
}

/// Slice `items` into page `page` (1-based) of `page_size` items.
///
/// A page past the end yields no items. A zero page or page size is
/// treated as one.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let page = page.max(1);
    let total_pages = items.len().div_ceil(size);
    let start = ((page - 1) * size).min(items.len());
    let end = (start + size).min(items.len());
    let slice = &items[start..end];

    let (first, last) = if slice.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };
    Page {
        items: slice,
        total_pages,
        first,
        last,
    }
}

/// An entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Page-number strip: first, last, and current ±1, with an ellipsis
/// standing for each gap. Empty when there is at most one page.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let mut links = Vec::new();
    for n in 1..=total_pages {
        if n == 1 || n == total_pages || n.abs_diff(current) <= 1 {
            links.push(PageLink::Page(n));
        } else if n.abs_diff(current) == 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links
}
