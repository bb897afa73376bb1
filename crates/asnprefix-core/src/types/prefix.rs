use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A CIDR block as reported by an upstream source.
///
/// The string is kept verbatim: equality and ordering are plain string
/// equality and lexicographic order, so `10.0.0.0/24` and `010.0.0.0/24` are
/// different prefixes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefix(String);

impl Prefix {
    /// Wrap a source-provided CIDR string
    #[must_use]
    pub fn new(cidr: impl Into<String>) -> Self {
        Self(cidr.into())
    }

    /// The CIDR string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the prefix text contains a `:` (IPv6 notation)
    #[must_use]
    pub fn is_ipv6(&self) -> bool {
        self.0.contains(':')
    }
}

impl From<String> for Prefix {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated union of prefixes, iterated in ascending lexicographic order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixSet(BTreeSet<Prefix>);

impl PrefixSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Insert a prefix, returning true if it was not present yet
    pub fn insert(&mut self, prefix: impl Into<Prefix>) -> bool {
        self.0.insert(prefix.into())
    }

    /// Number of distinct prefixes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no prefix has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the exact prefix string is present
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.0.contains(&Prefix::from(prefix))
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.0.iter()
    }

    /// Consume the set into a sorted vector
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<Prefix> {
        self.0.into_iter().collect()
    }
}

impl<P: Into<Prefix>> Extend<P> for PrefixSet {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<P: Into<Prefix>> FromIterator<P> for PrefixSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for PrefixSet {
    type Item = Prefix;
    type IntoIter = std::collections::btree_set::IntoIter<Prefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_dedups_and_sorts() {
        let set: PrefixSet = ["203.0.113.0/24", "198.51.100.0/24", "203.0.113.0/24"]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        let sorted: Vec<_> = set.iter().map(Prefix::as_str).collect();
        assert_eq!(sorted, ["198.51.100.0/24", "203.0.113.0/24"]);
    }

    #[test]
    fn test_no_canonicalization() {
        let mut set = PrefixSet::new();
        assert!(set.insert("2001:db8::/32"));
        assert!(set.insert("2001:DB8::/32"));
        assert!(set.insert("2001:0db8::/32"));
        assert!(!set.insert("2001:db8::/32"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_lexicographic_not_numeric() {
        let set: PrefixSet = ["9.0.0.0/8", "10.0.0.0/8", "100.64.0.0/10"]
            .into_iter()
            .collect();
        let sorted: Vec<_> = set.into_sorted_vec().into_iter().map(|p| p.to_string()).collect();
        assert_eq!(sorted, ["10.0.0.0/8", "100.64.0.0/10", "9.0.0.0/8"]);
    }

    #[test]
    fn test_is_ipv6() {
        assert!(Prefix::new("2001:db8::/32").is_ipv6());
        assert!(!Prefix::new("192.0.2.0/24").is_ipv6());
    }
}
