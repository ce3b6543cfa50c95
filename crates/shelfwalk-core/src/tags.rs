use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::{TagSet, TopicRef};
use crate::repository::Repository;

/// Outcome of preparing a directory for tag editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEditStart {
    pub created: bool,
    pub current: TagSet,
}

/// Tag lookups over sidecar files, read fresh from the repository on every call.
pub struct TagIndex<'r, R: Repository + ?Sized> {
    repo: &'r R,
    publisher_prefixes: &'r [String],
}

impl<'r, R: Repository + ?Sized> TagIndex<'r, R> {
    pub fn new(repo: &'r R, publisher_prefixes: &'r [String]) -> Self {
        Self {
            repo,
            publisher_prefixes,
        }
    }

    /// Union of every `tag.txt` anywhere under `root`.
    pub fn all_tags(&self, root: &Path) -> Result<BTreeSet<String>> {
        let mut all = BTreeSet::new();
        for dir in self.repo.tag_dirs_under(root)? {
            all.extend(self.repo.read_tag_file(&dir)?.iter().map(ToString::to_string));
        }
        debug!(root = %root.display(), tags = all.len(), "collected tags");
        Ok(all)
    }

    pub fn filter_by_tag(&self, root: &Path, tag: &str) -> Result<Vec<TopicRef>> {
        self.filter_by_any_tag(root, &[tag])
    }

    /// Topics whose own subtree carries at least one of `tags`, ordered by
    /// publisher then topic.
    pub fn filter_by_any_tag(&self, root: &Path, tags: &[&str]) -> Result<Vec<TopicRef>> {
        let mut out = Vec::new();
        for publisher in self
            .repo
            .list_child_dirs(root, Some(self.publisher_prefixes))?
        {
            let publisher_path = root.join(&publisher);
            for topic in self.repo.list_child_dirs(&publisher_path, None)? {
                if self.subtree_has_any(&publisher_path.join(&topic), tags)? {
                    out.push(TopicRef::new(publisher.clone(), topic));
                }
            }
        }
        Ok(out)
    }

    pub fn tags_of(&self, path: &Path) -> Result<TagSet> {
        self.repo.read_tag_file(path)
    }

    /// Creates an empty sidecar when absent and returns the tags currently stored.
    pub fn begin_edit(&self, path: &Path) -> Result<TagEditStart> {
        let created = self.repo.ensure_tag_file(path)?;
        let current = self.repo.read_tag_file(path)?;
        Ok(TagEditStart { created, current })
    }

    /// Parses a comma-separated line and overwrites the sidecar with it.
    pub fn save_edit(&self, path: &Path, raw: &str) -> Result<TagSet> {
        let tags = TagSet::parse(raw);
        self.repo.write_tag_file(path, &tags)?;
        Ok(tags)
    }

    fn subtree_has_any(&self, path: &Path, tags: &[&str]) -> Result<bool> {
        for dir in self.repo.tag_dirs_under(path)? {
            let found = self.repo.read_tag_file(&dir)?;
            if tags.iter().any(|tag| found.contains(tag)) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::repository::{LocalRepository, MemoryRepository, TAG_FILE_NAME};

    fn prefixes() -> Vec<String> {
        vec!["__".to_string(), "$_".to_string()]
    }

    #[test]
    fn filter_by_tag_returns_only_tagged_topics() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("__A").join("Mystery")).expect("mkdir");
        fs::create_dir_all(root.join("__A").join("Fiction")).expect("mkdir");
        fs::create_dir_all(root.join("__B").join("Poetry")).expect("mkdir");
        fs::write(
            root.join("__A").join("Fiction").join(TAG_FILE_NAME),
            "fiction, classic",
        )
        .expect("write tags");

        let repo = LocalRepository::new();
        let prefixes = prefixes();
        let index = TagIndex::new(&repo, &prefixes);
        let found = index.filter_by_tag(root, "fiction").expect("filter");
        assert_eq!(found, vec![TopicRef::new("__A", "Fiction")]);
    }

    #[test]
    fn non_utf8_tag_file_does_not_hide_other_topics() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("__A").join("Fiction")).expect("mkdir");
        fs::create_dir_all(root.join("__A").join("Poetry")).expect("mkdir");
        fs::write(root.join("__A").join("Fiction").join(TAG_FILE_NAME), "fiction").expect("write");
        fs::write(root.join("__A").join("Poetry").join(TAG_FILE_NAME), b"caf\xe9, verse")
            .expect("write cp1252");

        let repo = LocalRepository::new();
        let prefixes = prefixes();
        let index = TagIndex::new(&repo, &prefixes);
        let all = index.all_tags(root).expect("all tags");
        assert!(all.contains("fiction"));
        assert!(all.contains("verse"));
        assert!(all.contains("caf\u{FFFD}"));
        let found = index.filter_by_tag(root, "fiction").expect("filter");
        assert_eq!(found, vec![TopicRef::new("__A", "Fiction")]);
    }

    #[test]
    fn chapter_level_tag_marks_its_topic() {
        let repo = MemoryRepository::new()
            .with_file("/shelf/__B/Rust/ch2/tag.txt", "systems")
            .with_dir("/shelf/__A/Go/ch1")
            .with_file("/shelf/__A/Rust/tag.txt", "systems, lang");
        let prefixes = prefixes();
        let index = TagIndex::new(&repo, &prefixes);

        let found = index
            .filter_by_tag(Path::new("/shelf"), "systems")
            .expect("filter");
        assert_eq!(
            found,
            vec![TopicRef::new("__A", "Rust"), TopicRef::new("__B", "Rust")]
        );
    }

    #[test]
    fn tags_outside_publishers_are_collected_but_do_not_match_topics() {
        let repo = MemoryRepository::new()
            .with_file("/shelf/archive/Old/tag.txt", "legacy")
            .with_file("/shelf/__A/New/tag.txt", "Fresh, legacy ");
        let prefixes = prefixes();
        let index = TagIndex::new(&repo, &prefixes);

        let all = index.all_tags(Path::new("/shelf")).expect("all");
        assert_eq!(
            all.into_iter().collect::<Vec<_>>(),
            vec!["Fresh".to_string(), "legacy".to_string()]
        );
        let legacy = index
            .filter_by_tag(Path::new("/shelf"), "legacy")
            .expect("filter");
        assert_eq!(legacy, vec![TopicRef::new("__A", "New")]);
        assert!(
            index
                .filter_by_tag(Path::new("/shelf"), "fresh")
                .expect("filter")
                .is_empty()
        );
    }

    #[test]
    fn editing_an_untagged_node_creates_the_sidecar() {
        let repo = MemoryRepository::new().with_dir("/shelf/__A/Fiction");
        let prefixes = prefixes();
        let index = TagIndex::new(&repo, &prefixes);
        let topic = Path::new("/shelf/__A/Fiction");

        let start = index.begin_edit(topic).expect("begin");
        assert!(start.created);
        assert!(start.current.is_empty());
        assert_eq!(
            repo.file_content("/shelf/__A/Fiction/tag.txt").as_deref(),
            Some("")
        );

        index.save_edit(topic, " noir ,, crime").expect("save");
        assert_eq!(
            repo.file_content("/shelf/__A/Fiction/tag.txt").as_deref(),
            Some("noir, crime")
        );
        let again = index.begin_edit(topic).expect("begin again");
        assert!(!again.created);
        assert_eq!(again.current, TagSet::from_tags(["crime", "noir"]));
    }
}
