use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based, after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    /// One-based display range; both zero when empty.
    pub start: usize,
    pub end: usize,
}

/// `page_size == 0` puts everything on one page. Out-of-range pages clamp to the last one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let size = if page_size == 0 { total.max(1) } else { page_size };
    let total_pages = total.div_ceil(size).max(1);
    let page = page.min(total_pages - 1);

    let from = (page * size).min(total);
    let to = (from + size).min(total);
    let (start, end) = if total == 0 { (0, 0) } else { (from + 1, to) };

    Page {
        items: items[from..to].to_vec(),
        page,
        page_size,
        total,
        total_pages,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_middle_page() {
        let items: Vec<u32> = (1..=7).collect();
        let p = paginate(&items, 1, 3);
        assert_eq!(p.items, vec![4, 5, 6]);
        assert_eq!(p.total_pages, 3);
        assert_eq!((p.start, p.end), (4, 6));
    }

    #[test]
    fn paginate_clamps_past_end() {
        let items: Vec<u32> = (1..=7).collect();
        let p = paginate(&items, 99, 3);
        assert_eq!(p.page, 2);
        assert_eq!(p.items, vec![7]);
        assert_eq!((p.start, p.end), (7, 7));
    }

    #[test]
    fn paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let p = paginate(&items, 0, 25);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 1);
        assert_eq!((p.start, p.end), (0, 0));
    }

    #[test]
    fn zero_page_size_is_single_page() {
        let items: Vec<u32> = (1..=40).collect();
        let p = paginate(&items, 3, 0);
        assert_eq!(p.page, 0);
        assert_eq!(p.items.len(), 40);
    }
}
