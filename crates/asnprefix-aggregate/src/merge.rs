use asnprefix_core::{Prefix, PrefixSet, SourceResult};

/// Union the prefixes of several source results, deduplicated by exact
/// string equality and sorted ascending.
///
/// Failed and empty results contribute nothing. The output does not depend
/// on the order of `results`.
pub fn merge<'a, I>(results: I) -> Vec<Prefix>
where
    I: IntoIterator<Item = &'a SourceResult>,
{
    results
        .into_iter()
        .flat_map(|result| result.prefixes().iter().cloned())
        .collect::<PrefixSet>()
        .into_sorted_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(prefixes: &[&str]) -> SourceResult {
        SourceResult::from_prefixes(prefixes.iter().copied().map(Prefix::from).collect())
    }

    fn strings(prefixes: &[Prefix]) -> Vec<&str> {
        prefixes.iter().map(Prefix::as_str).collect()
    }

    #[test]
    fn test_dedup_across_sources() {
        let a = found(&["10.0.0.0/24"]);
        let b = found(&["10.0.0.0/24", "10.0.1.0/24"]);
        let c = found(&[]);
        assert_eq!(strings(&merge([&a, &b, &c])), ["10.0.0.0/24", "10.0.1.0/24"]);
    }

    #[test]
    fn test_order_independent() {
        let a = found(&["203.0.113.0/24"]);
        let b = found(&["203.0.113.0/24", "198.51.100.0/24"]);
        let c = found(&["2001:db8::/32", "192.0.2.0/24"]);
        let expected = merge([&a, &b, &c]);

        for order in [
            [&a, &c, &b],
            [&b, &a, &c],
            [&b, &c, &a],
            [&c, &a, &b],
            [&c, &b, &a],
        ] {
            assert_eq!(merge(order), expected);
        }
    }

    #[test]
    fn test_idempotent() {
        let a = found(&["10.0.1.0/24", "10.0.0.0/24"]);
        let once = merge([&a]);
        let again = merge([&a, &a]);
        assert_eq!(once, again);

        let remerged = merge([&SourceResult::from_prefixes(once.clone())]);
        assert_eq!(remerged, once);
    }

    #[test]
    fn test_failures_contribute_nothing() {
        let failed = SourceResult::failed("timeout");
        let b = found(&["198.51.100.0/24"]);
        assert_eq!(strings(&merge([&failed, &SourceResult::Empty, &b])), ["198.51.100.0/24"]);
        assert!(merge([&failed, &SourceResult::Empty]).is_empty());
    }

    #[test]
    fn test_no_normalization() {
        let a = found(&["2001:db8::/32"]);
        let b = found(&["2001:DB8::/32"]);
        assert_eq!(merge([&a, &b]).len(), 2);
    }
}
