//! Selection engine
//!
//! Picks a uniformly random quote from the collection, optionally restricted
//! to one category.

use rand::Rng;

use crate::models::Quote;

/// Sentinel category meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// Category restriction for a pick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every quote is eligible
    #[default]
    All,
    /// Only quotes whose category matches (case-insensitive)
    Only(String),
}

impl CategoryFilter {
    /// Build a filter from an optional user-supplied category
    ///
    /// `None`, an empty string and `"all"` (any case) mean no filter.
    pub fn parse(category: Option<&str>) -> Self {
        match category.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => CategoryFilter::All,
            Some(c) => CategoryFilter::Only(c.to_string()),
        }
    }

    /// Check whether a quote passes this filter
    pub fn accepts(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => quote.in_category(category),
        }
    }
}

/// Quotes eligible under `filter`, in collection order
pub fn eligible<'a>(quotes: &'a [Quote], filter: &CategoryFilter) -> Vec<&'a Quote> {
    quotes.iter().filter(|q| filter.accepts(q)).collect()
}

/// Pick a random eligible quote
///
/// Returns `None` when nothing matches; that is a normal "no quotes"
/// display state rather than an error.
pub fn pick<'a, R: Rng + ?Sized>(
    quotes: &'a [Quote],
    filter: &CategoryFilter,
    rng: &mut R,
) -> Option<&'a Quote> {
    let pool = eligible(quotes, filter);
    if pool.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..pool.len());
    Some(pool[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Vec<Quote> {
        vec![
            Quote::new("Success is not final.", "Motivation"),
            Quote::new("Stay hungry.", "Inspiration"),
            Quote::new("Keep going.", "motivation"),
        ]
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("ALL")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(Some(" Server ")),
            CategoryFilter::Only("Server".to_string())
        );
    }

    #[test]
    fn test_pick_empty_collection() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick(&[], &CategoryFilter::All, &mut rng).is_none());
        assert!(pick(&[], &CategoryFilter::parse(Some("Motivation")), &mut rng).is_none());
    }

    #[test]
    fn test_pick_unknown_category() {
        let quotes = sample();
        let mut rng = StdRng::seed_from_u64(7);
        let filter = CategoryFilter::parse(Some("Farewell"));
        assert!(pick(&quotes, &filter, &mut rng).is_none());
    }

    #[test]
    fn test_pick_respects_category_case_insensitively() {
        let quotes = sample();
        let mut rng = StdRng::seed_from_u64(42);
        let filter = CategoryFilter::parse(Some("MOTIVATION"));

        for _ in 0..200 {
            let quote = pick(&quotes, &filter, &mut rng).unwrap();
            assert!(quote.category.eq_ignore_ascii_case("motivation"));
        }
    }

    #[test]
    fn test_pick_all_draws_from_whole_collection() {
        let quotes = vec![Quote::new("one", "A"), Quote::new("two", "B")];
        let mut rng = StdRng::seed_from_u64(1);

        let mut seen_one = false;
        let mut seen_two = false;
        for _ in 0..1000 {
            let quote = pick(&quotes, &CategoryFilter::All, &mut rng).unwrap();
            assert!(quotes.contains(quote));
            match quote.text.as_str() {
                "one" => seen_one = true,
                "two" => seen_two = true,
                _ => unreachable!(),
            }
        }
        assert!(seen_one && seen_two);
    }

    #[test]
    fn test_eligible_keeps_collection_order() {
        let quotes = sample();
        let pool = eligible(&quotes, &CategoryFilter::parse(Some("motivation")));
        let texts: Vec<_> = pool.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["Success is not final.", "Keep going."]);
    }
}
