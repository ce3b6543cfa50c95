use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Root,
    Publisher,
    Topic,
    Chapter,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Publisher => "publisher",
            Self::Topic => "topic",
            Self::Chapter => "chapter",
        }
    }

    #[must_use]
    pub const fn depth(self) -> usize {
        match self {
            Self::Root => 0,
            Self::Publisher => 1,
            Self::Topic => 2,
            Self::Chapter => 3,
        }
    }

    /// Tier of the entries listed while this tier is current.
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Root => Some(Self::Publisher),
            Self::Publisher => Some(Self::Topic),
            Self::Topic => Some(Self::Chapter),
            Self::Chapter => None,
        }
    }

    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Root => "Roots",
            Self::Publisher => "Publishers",
            Self::Topic => "Topics",
            Self::Chapter => "Chapters",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub path: PathBuf,
    pub tier: Tier,
}

impl Node {
    #[must_use]
    pub fn root(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tier: Tier::Root,
        }
    }

    /// Descends into the named child directory. Chapters have no navigable children.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<Self> {
        let tier = self.tier.child()?;
        Some(Self {
            path: self.path.join(name),
            tier,
        })
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// A (publisher, topic) pair produced by tag filtering and topic search.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TopicRef {
    pub publisher: String,
    pub topic: String,
}

impl TopicRef {
    #[must_use]
    pub fn new(publisher: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            publisher: publisher.into(),
            topic: topic.into(),
        }
    }

    #[must_use]
    pub fn path_under(&self, root: &Path) -> PathBuf {
        root.join(&self.publisher).join(&self.topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterEntry {
    pub name: String,
    pub file_count: usize,
}

/// Trimmed, non-empty, de-duplicated labels of one directory.
///
/// First-seen order is kept so a saved file reads the way it was typed,
/// but equality ignores order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one sidecar line: split on `,`, trim each piece, drop empties.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        Self::from_tags(line.split(','))
    }

    #[must_use]
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::new();
        for tag in tags {
            out.insert(tag.as_ref());
        }
        out
    }

    /// Returns `false` when the trimmed tag is empty or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    #[must_use]
    pub fn to_line(&self) -> String {
        self.tags.join(", ")
    }

    #[must_use]
    pub fn sorted(&self) -> BTreeSet<&str> {
        self.iter().collect()
    }
}

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for TagSet {}

impl Display for TagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_line_parsing_trims_and_drops_empty_pieces() {
        let tags = TagSet::parse("  fiction , ,classic,, fiction ");
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["fiction", "classic"]);
        assert_eq!(tags.to_line(), "fiction, classic");
    }

    #[test]
    fn tag_sets_compare_without_order_and_keep_case() {
        let left = TagSet::from_tags(["b", "a"]);
        let right = TagSet::parse("a, b");
        assert_eq!(left, right);
        assert_ne!(TagSet::parse("A"), TagSet::parse("a"));
    }

    #[test]
    fn node_descends_one_tier_until_chapter() {
        let root = Node::root("/shelf");
        let publisher = root.child("__Acme").expect("publisher");
        assert_eq!(publisher.tier, Tier::Publisher);
        let topic = publisher.child("Rust").expect("topic");
        let chapter = topic.child("01-intro").expect("chapter");
        assert_eq!(chapter.tier, Tier::Chapter);
        assert_eq!(chapter.path, PathBuf::from("/shelf/__Acme/Rust/01-intro"));
        assert_eq!(chapter.name(), "01-intro");
        assert!(chapter.child("deeper").is_none());
    }
}
