use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Repository, TAG_FILE_NAME, has_any_prefix};
use crate::error::{Result, ShelfError};
use crate::models::TagSet;

#[derive(Debug, Clone, PartialEq, Eq)]
enum MemoryEntry {
    Dir,
    File(String),
}

/// In-memory tree for driving the tag index and navigator without touching disk.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: RefCell<BTreeMap<PathBuf, MemoryEntry>>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory and every missing ancestor.
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    /// Adds a file; missing ancestors become directories.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.entries
            .borrow_mut()
            .insert(path.to_path_buf(), MemoryEntry::File(content.to_string()));
        self
    }

    #[must_use]
    pub fn file_content(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.entries.borrow().get(path.as_ref()) {
            Some(MemoryEntry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.entries
            .borrow_mut()
            .retain(|candidate, _| !candidate.starts_with(path));
    }

    fn add_dir(&self, path: &Path) {
        let mut entries = self.entries.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryEntry::Dir);
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        match self.entries.borrow().get(path) {
            Some(MemoryEntry::Dir) => Ok(()),
            Some(MemoryEntry::File(_)) => Err(ShelfError::NotADirectory(path.to_path_buf())),
            None => Err(ShelfError::NotFound(path.display().to_string())),
        }
    }

    fn children(&self, path: &Path) -> Vec<(String, MemoryEntry)> {
        self.entries
            .borrow()
            .iter()
            .filter(|(candidate, _)| candidate.parent() == Some(path))
            .filter_map(|(candidate, entry)| {
                let name = candidate.file_name()?.to_string_lossy().to_string();
                Some((name, entry.clone()))
            })
            .collect()
    }
}

impl Repository for MemoryRepository {
    fn list_child_dirs(&self, path: &Path, prefixes: Option<&[String]>) -> Result<Vec<String>> {
        self.ensure_dir(path)?;
        let mut names: Vec<String> = self
            .children(path)
            .into_iter()
            .filter(|(name, entry)| *entry == MemoryEntry::Dir && has_any_prefix(name, prefixes))
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn count_plain_files(&self, path: &Path) -> Result<usize> {
        self.ensure_dir(path)?;
        Ok(self
            .children(path)
            .iter()
            .filter(|(_, entry)| matches!(entry, MemoryEntry::File(_)))
            .count())
    }

    fn read_tag_file(&self, path: &Path) -> Result<TagSet> {
        Ok(self
            .file_content(path.join(TAG_FILE_NAME))
            .map(|raw| TagSet::parse(&raw))
            .unwrap_or_default())
    }

    fn write_tag_file(&self, path: &Path, tags: &TagSet) -> Result<()> {
        self.ensure_dir(path)?;
        self.entries
            .borrow_mut()
            .insert(path.join(TAG_FILE_NAME), MemoryEntry::File(tags.to_line()));
        Ok(())
    }

    fn ensure_tag_file(&self, path: &Path) -> Result<bool> {
        self.ensure_dir(path)?;
        let tag_path = path.join(TAG_FILE_NAME);
        if self.file_content(&tag_path).is_some() {
            return Ok(false);
        }
        self.entries
            .borrow_mut()
            .insert(tag_path, MemoryEntry::File(String::new()));
        Ok(true)
    }

    fn tag_dirs_under(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.ensure_dir(path)?;
        let mut dirs: Vec<PathBuf> = self
            .entries
            .borrow()
            .iter()
            .filter(|(candidate, entry)| {
                matches!(entry, MemoryEntry::File(_))
                    && candidate.starts_with(path)
                    && candidate.file_name().is_some_and(|name| name == TAG_FILE_NAME)
            })
            .filter_map(|(candidate, _)| candidate.parent().map(Path::to_path_buf))
            .collect();
        dirs.sort();
        Ok(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_ancestors_are_listed_as_directories() {
        let repo = MemoryRepository::new()
            .with_dir("/shelf/__B/Poetry")
            .with_file("/shelf/__A/Fiction/ch1/page.pdf", "x");

        assert_eq!(
            repo.list_child_dirs(Path::new("/shelf"), None).expect("list"),
            vec!["__A", "__B"]
        );
        assert_eq!(
            repo.count_plain_files(Path::new("/shelf/__A/Fiction/ch1"))
                .expect("count"),
            1
        );
    }

    #[test]
    fn written_tags_are_visible_to_reads_and_walks() {
        let repo = MemoryRepository::new().with_dir("/shelf/__A/Fiction");
        let topic = Path::new("/shelf/__A/Fiction");
        repo.write_tag_file(topic, &TagSet::parse("fiction, classic"))
            .expect("write");

        assert_eq!(
            repo.read_tag_file(topic).expect("read"),
            TagSet::from_tags(["classic", "fiction"])
        );
        assert_eq!(
            repo.tag_dirs_under(Path::new("/shelf")).expect("walk"),
            vec![topic.to_path_buf()]
        );
    }

    #[test]
    fn removed_directories_disappear_from_listings() {
        let repo = MemoryRepository::new().with_dir("/shelf/__A/Fiction");
        repo.remove("/shelf/__A");
        let err = repo
            .list_child_dirs(Path::new("/shelf/__A"), None)
            .expect_err("gone");
        assert!(matches!(err, ShelfError::NotFound(_)));
    }
}
