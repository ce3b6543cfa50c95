use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::TagSet;

mod local;
mod memory;

pub use local::LocalRepository;
pub use memory::MemoryRepository;

pub const TAG_FILE_NAME: &str = "tag.txt";

/// Filesystem access used by the tag index and the navigator.
///
/// Every call re-reads the underlying tree; nothing is cached between calls.
pub trait Repository {
    /// Immediate subdirectory names, sorted ascending without duplicates.
    /// With `prefixes`, only names starting with one of them are kept.
    fn list_child_dirs(&self, path: &Path, prefixes: Option<&[String]>) -> Result<Vec<String>>;

    /// Number of immediate non-directory entries.
    fn count_plain_files(&self, path: &Path) -> Result<usize>;

    /// Tags stored in `path/tag.txt`; a missing file is an empty set.
    fn read_tag_file(&self, path: &Path) -> Result<TagSet>;

    /// Replaces the whole content of `path/tag.txt`, creating it if needed.
    fn write_tag_file(&self, path: &Path, tags: &TagSet) -> Result<()>;

    /// Creates an empty `path/tag.txt` when absent. Returns whether it was created.
    fn ensure_tag_file(&self, path: &Path) -> Result<bool>;

    /// Every directory at or below `path` that holds a `tag.txt`, sorted.
    fn tag_dirs_under(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

#[must_use]
pub fn has_any_prefix(name: &str, prefixes: Option<&[String]>) -> bool {
    match prefixes {
        None => true,
        Some(prefixes) => prefixes.iter().any(|prefix| name.starts_with(prefix.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_filter_accepts_any_listed_prefix() {
        let prefixes = vec!["__".to_string(), "#_".to_string()];
        assert!(has_any_prefix("__Acme", Some(&prefixes)));
        assert!(has_any_prefix("#_Notes", Some(&prefixes)));
        assert!(!has_any_prefix("_Acme", Some(&prefixes)));
        assert!(has_any_prefix("anything", None));
    }
}
