//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                          | Return Type   |
// |---------------|------------------------------------------------------|---------------|
// | page_number   | Reads a 1-based page number from a raw query value   | i64           |
// | paginate      | Slices an ordered list down to one page              | Vec<T>        |
//--------------------------------------------------------------------------------------------------

/// Number of records in one page of questions.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Parses the `page` query value. Missing or non-integer input means page 1.
pub fn page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(1)
}

/// Returns the records of the 1-based `page`, `per_page` records at a time.
///
/// The slice runs from `(page - 1) * per_page` up to, but not including,
/// `page * per_page`. A page past the end, or a page below 1, is empty; callers
/// decide whether an empty page is an error.
pub fn paginate<T>(items: Vec<T>, page: i64, per_page: usize) -> Vec<T> {
    if page < 1 || per_page == 0 {
        return Vec::new();
    }

    let start = match usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(per_page))
    {
        Some(start) => start,
        None => return Vec::new(),
    };

    items.into_iter().skip(start).take(per_page).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page_is_default() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some("abc")), 1);
        assert_eq!(page_number(Some("3")), 3);
        assert_eq!(page_number(Some("-2")), -2);
    }

    #[test]
    fn test_full_first_page() {
        let page = paginate(records(25), 1, QUESTIONS_PER_PAGE);
        assert_eq!(page, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_partial_last_page() {
        let page = paginate(records(25), 3, QUESTIONS_PER_PAGE);
        assert_eq!(page, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_page_beyond_data_is_empty() {
        assert!(paginate(records(25), 4, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(records(25), 100, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(records(25), i64::MAX, QUESTIONS_PER_PAGE).is_empty());
    }

    #[test]
    fn test_page_below_one_is_empty() {
        assert!(paginate(records(25), 0, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(records(25), -1, QUESTIONS_PER_PAGE).is_empty());
    }
}
