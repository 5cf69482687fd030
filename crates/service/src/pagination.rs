//! Offset pagination shared by the directory and meme listings.

const MAX_PER_PAGE: u32 = 100;
const DEFAULT_PER_PAGE: u32 = 20;

/// 1-based page selector as it arrives from the query string.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Zero-based page index and clamped page size, ready for a paginator.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        (u64::from(page - 1), u64::from(per_page))
    }

    /// Row offset and limit for queries that take them directly.
    pub fn offset_limit(self) -> (u64, u64) {
        let (page_idx, per_page) = self.normalize();
        (page_idx * per_page, per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PER_PAGE }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn page_zero_acts_like_page_one() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn per_page_is_capped() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, u64::from(super::MAX_PER_PAGE));
    }

    #[test]
    fn offset_is_rows_not_pages() {
        let (offset, limit) = Pagination { page: 3, per_page: 20 }.offset_limit();
        assert_eq!(offset, 40);
        assert_eq!(limit, 20);
    }

    #[test]
    fn defaults_give_twenty_per_page() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }
}
