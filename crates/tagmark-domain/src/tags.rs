//! Tag sets and the tag merge engine
//!
//! Bookmarks carry a deduplicated set of tags. At the storage and JSON
//! boundaries the set is encoded as a single string joined by `", "`.
//! Encoding is always in lexicographic order so that the same set produces
//! the same string on every call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Separator used when encoding a tag set as a string
pub const TAG_SEPARATOR: &str = ", ";

/// A deduplicated set of tag labels
///
/// Equality is case-sensitive: `"Rust"` and `"rust"` are distinct tags.
///
/// # Examples
///
/// ```
/// use tagmark_domain::TagSet;
///
/// let tags = TagSet::parse("news, tech, news");
/// assert_eq!(tags.len(), 2);
/// assert_eq!(tags.to_string(), "news, tech");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Decode a tag string
    ///
    /// The string is split on [`TAG_SEPARATOR`] and every token is trimmed.
    /// Empty tokens are dropped. A bare comma is part of the tag, so
    /// `"1,000 tips"` is a single tag.
    pub fn parse(encoded: &str) -> Self {
        encoded
            .split(TAG_SEPARATOR)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Add a single tag. Returns false if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag: String = tag.into();
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.0.insert(tag.to_string())
    }

    /// Whether the set contains `tag`
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate tags in encoding order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Union of two tag sets
    ///
    /// Commutative and idempotent: `a ∪ b == b ∪ a` and `(a ∪ b) ∪ b == a ∪ b`.
    pub fn union(&self, other: &TagSet) -> TagSet {
        TagSet(self.0.union(&other.0).cloned().collect())
    }

    /// Encode as a `", "`-joined string
    pub fn encode(&self) -> String {
        self.iter().collect::<Vec<_>>().join(TAG_SEPARATOR)
    }
}

/// Merge an existing tag string with an incoming one
///
/// Both sides are decoded with [`TagSet::parse`], unioned, and re-encoded.
///
/// ```
/// use tagmark_domain::tags::merge;
///
/// assert_eq!(merge("x, y", "y, z"), "x, y, z");
/// assert_eq!(merge("", ""), "");
/// ```
pub fn merge(existing: &str, incoming: &str) -> String {
    TagSet::parse(existing)
        .union(&TagSet::parse(incoming))
        .encode()
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<String> for TagSet {
    fn from(encoded: String) -> Self {
        Self::parse(&encoded)
    }
}

impl From<&str> for TagSet {
    fn from(encoded: &str) -> Self {
        Self::parse(encoded)
    }
}

impl From<TagSet> for String {
    fn from(tags: TagSet) -> Self {
        tags.encode()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> TagSet {
        tags.iter().copied().collect()
    }

    #[test]
    fn test_parse_standard_separator() {
        let tags = TagSet::parse("a, b, c");
        assert_eq!(tags, set(&["a", "b", "c"]));
    }

    #[test]
    fn test_parse_empty_and_blank() {
        assert!(TagSet::parse("").is_empty());
        assert!(TagSet::parse("   ").is_empty());
        assert!(TagSet::parse(" , , ").is_empty());
    }

    #[test]
    fn test_parse_trims_and_dedups() {
        let tags = TagSet::parse(" news , news,  tech ");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("news"));
        assert!(tags.contains("tech"));
    }

    #[test]
    fn test_bare_comma_stays_in_tag() {
        let tags = TagSet::parse("1,000 tips");
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("1,000 tips"));

        assert_eq!(merge("1,000 tips", "news"), "1,000 tips, news");
    }

    #[test]
    fn test_case_sensitive() {
        let tags = TagSet::parse("Rust, rust");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_encode_is_sorted() {
        let tags = TagSet::parse("zeta, alpha, mid");
        assert_eq!(tags.encode(), "alpha, mid, zeta");
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(merge("", ""), "");
        assert_eq!(merge("", "a"), "a");
        assert_eq!(merge("a", ""), "a");
    }

    #[test]
    fn test_merge_overlap() {
        let merged = TagSet::parse(&merge("x, y", "y, z"));
        assert_eq!(merged, set(&["x", "y", "z"]));
    }

    #[test]
    fn test_insert_rejects_blank() {
        let mut tags = TagSet::new();
        assert!(!tags.insert("  "));
        assert!(tags.insert(" a "));
        assert!(!tags.insert("a"));
        assert_eq!(tags.encode(), "a");
    }

    #[test]
    fn test_serde_as_string() {
        let tags = TagSet::parse("b, a");
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, "\"a, b\"");

        let back: TagSet = serde_json::from_str("\"b, a, b\"").unwrap();
        assert_eq!(back, tags);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn tag_string() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,6}", 0..6).prop_map(|tags| tags.join(TAG_SEPARATOR))
    }

    proptest! {
        /// Property: merged set equals the union of both decoded sets
        #[test]
        fn test_merge_is_union(a in tag_string(), b in tag_string()) {
            let merged = TagSet::parse(&merge(&a, &b));
            let mut expected = TagSet::parse(&a);
            for tag in TagSet::parse(&b).iter() {
                expected.insert(tag);
            }
            prop_assert_eq!(merged, expected);
        }

        /// Property: merge is commutative, including the encoded string
        #[test]
        fn test_merge_commutative(a in tag_string(), b in tag_string()) {
            prop_assert_eq!(merge(&a, &b), merge(&b, &a));
        }

        /// Property: merging the same incoming tags twice changes nothing
        #[test]
        fn test_merge_idempotent(a in tag_string(), b in tag_string()) {
            let once = merge(&a, &b);
            prop_assert_eq!(merge(&once, &b), once);
        }

        /// Property: encode/parse preserves the set
        #[test]
        fn test_encode_parse_stable(a in tag_string()) {
            let tags = TagSet::parse(&a);
            prop_assert_eq!(TagSet::parse(&tags.encode()), tags);
        }
    }
}
