pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the 1-based `page` of `items`. Pages past the end, and page 0, are
/// empty.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
    else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = items.len().min(start + QUESTIONS_PER_PAGE);
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_consecutive_windows() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 1), &items[0..10]);
        assert_eq!(paginate(&items, 2), &items[10..20]);
        assert_eq!(paginate(&items, 3), &items[20..25]);
    }

    #[test]
    fn partial_final_page() {
        let items: Vec<usize> = (1..=19).collect();
        assert_eq!(paginate(&items, 2), (11..=19).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<usize> = (0..20).collect();
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate(&items, 3).is_empty());
        assert!(paginate(&items, 1000).is_empty());
        assert!(paginate(&items, usize::MAX).is_empty());
        assert!(paginate::<usize>(&[], 1).is_empty());
    }
}
