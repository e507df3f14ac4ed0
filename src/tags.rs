//! Tags
//!
//! Category labels attached to line items, kept sorted and deduplicated so
//! membership and overlap checks stay cheap during filtering.

use std::cmp::Ordering;

use smallvec::SmallVec;

/// A sorted, deduplicated set of string tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: SmallVec<[String; 5]>,
}

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: SmallVec::new(),
        }
    }

    /// Create a tag set from owned strings, sorting and deduplicating.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut set = Self { tags };

        set.tags.sort();
        set.tags.dedup();

        set
    }

    /// Create a tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(tags.iter().map(ToString::to_string).collect())
    }

    /// Whether the set contains the given tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }

    /// Whether any tag is shared with `other`.
    pub fn intersects(&self, other: &Self) -> bool {
        // Two pointers over sorted vectors, O(n + m).
        let mut left = self.tags.iter();
        let mut right = other.tags.iter();
        let mut left_tag = left.next();
        let mut right_tag = right.next();

        while let (Some(left_ref), Some(right_ref)) = (left_tag, right_tag) {
            match left_ref.cmp(right_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_tag = left.next(),
                Ordering::Greater => right_tag = right.next(),
            }
        }

        false
    }

    /// Whether any tag appears in the given slice.
    pub fn intersects_slice(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.contains(tag))
    }

    /// Add a tag, keeping the set sorted. Duplicates are ignored.
    pub fn add(&mut self, tag: &str) {
        if let Err(pos) = self.tags.binary_search_by(|t| t.as_str().cmp(tag)) {
            self.tags.insert(pos, tag.to_string());
        }
    }

    /// Remove a tag if present.
    pub fn remove(&mut self, tag: &str) {
        if let Ok(pos) = self.tags.binary_search_by(|t| t.as_str().cmp(tag)) {
            self.tags.remove(pos);
        }
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set has no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|s| s.as_ref().to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_strs_sorts_and_deduplicates() {
        let tags = TagSet::from_strs(&["steel", "fastener", "steel", "bulk"]);

        assert_eq!(tags.len(), 3);

        let collected: Vec<&str> = tags.iter().collect();
        assert_eq!(collected, ["bulk", "fastener", "steel"]);
    }

    #[test]
    fn contains_works() {
        let tags = TagSet::from_strs(&["steel", "fastener"]);

        assert!(tags.contains("steel"));
        assert!(!tags.contains("plastic"));
    }

    #[test]
    fn intersects_detects_shared_tags() {
        let a = TagSet::from_strs(&["bulk", "steel"]);
        let b = TagSet::from_strs(&["plastic", "steel"]);
        let c = TagSet::from_strs(&["electronics"]);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!b.intersects(&c));
    }

    #[test]
    fn intersects_slice_matches_any() {
        let tags = TagSet::from_strs(&["fastener", "steel"]);

        assert!(tags.intersects_slice(&["steel".to_string()]));
        assert!(!tags.intersects_slice(&["plastic".to_string()]));
        assert!(!tags.intersects_slice(&[]));
    }

    #[test]
    fn add_remove_keep_sorted_order() {
        let mut tags = TagSet::from_strs(&["fastener", "steel"]);

        tags.add("bulk");
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["bulk", "fastener", "steel"]);

        tags.add("bulk");
        assert_eq!(tags.len(), 3);

        tags.remove("fastener");
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["bulk", "steel"]);

        tags.remove("missing");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn empty_set_is_empty() {
        assert!(TagSet::empty().is_empty());
        assert!(!TagSet::from_strs(&["steel"]).is_empty());
    }

    #[test]
    fn from_iterator_collects() {
        let tags: TagSet = ["b", "a", "b"].into_iter().collect();

        assert_eq!(tags.iter().collect::<Vec<_>>(), ["a", "b"]);
    }
}
