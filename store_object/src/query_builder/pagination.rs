//! Page selection

use std::ops::Range;

/// Pagination configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    /// Zero-based page index; `None` when the requested index was negative or not a number
    pub page_idx: Option<usize>,
    pub page_size: usize,
}

impl Pagination {
    /// Fractional indices are floored. Negative or NaN indices select no page.
    pub fn new(page_idx: f64, page_size: usize) -> Self {
        let page_idx = if page_idx.is_nan() || page_idx < 0.0 {
            None
        } else {
            // Saturating float-to-int conversion keeps huge indices out of range
            Some(page_idx.floor() as usize)
        };
        Self {
            page_idx,
            page_size,
        }
    }

    /// Index range of the selected page within `total` records, clamped to bounds
    pub fn range(&self, total: usize) -> Range<usize> {
        match self.page_idx {
            Some(idx) => {
                let start = idx.saturating_mul(self.page_size).min(total);
                let end = start.saturating_add(self.page_size).min(total);
                start..end
            }
            None => total..total,
        }
    }

    /// Number of pages needed for `total` records
    pub fn page_count(&self, total: usize) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        total.div_ceil(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_within_bounds() {
        assert_eq!(Pagination::new(0.0, 10).range(25), 0..10);
        assert_eq!(Pagination::new(2.0, 10).range(25), 20..25);
        assert_eq!(Pagination::new(3.0, 10).range(25), 25..25);
    }

    #[test]
    fn test_range_invalid_index_is_empty() {
        assert!(Pagination::new(-1.0, 10).range(25).is_empty());
        assert!(Pagination::new(f64::NAN, 10).range(25).is_empty());
        assert!(Pagination::new(f64::INFINITY, 10).range(25).is_empty());
    }

    #[test]
    fn test_fractional_index_is_floored() {
        assert_eq!(Pagination::new(1.7, 10).range(25), 10..20);
    }

    #[test]
    fn test_page_count() {
        let pagination = Pagination::new(0.0, 10);
        assert_eq!(pagination.page_count(0), 0);
        assert_eq!(pagination.page_count(10), 1);
        assert_eq!(pagination.page_count(25), 3);
    }
}
