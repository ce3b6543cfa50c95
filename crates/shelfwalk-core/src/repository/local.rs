use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{Repository, TAG_FILE_NAME, has_any_prefix};
use crate::error::{Result, ShelfError};
use crate::models::TagSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRepository;

impl LocalRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ensure_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ShelfError::NotFound(path.display().to_string()));
        }
        if !path.is_dir() {
            return Err(ShelfError::NotADirectory(path.to_path_buf()));
        }
        Ok(())
    }
}

impl Repository for LocalRepository {
    fn list_child_dirs(&self, path: &Path, prefixes: Option<&[String]>) -> Result<Vec<String>> {
        Self::ensure_dir(path)?;
        let mut names = Vec::new();
        for item in fs::read_dir(path)? {
            let item = item?;
            if !item.path().is_dir() {
                continue;
            }
            let name = item.file_name().to_string_lossy().to_string();
            if has_any_prefix(&name, prefixes) {
                names.push(name);
            }
        }
        names.sort();
        names.dedup();
        debug!(path = %path.display(), count = names.len(), "listed child directories");
        Ok(names)
    }

    fn count_plain_files(&self, path: &Path) -> Result<usize> {
        Self::ensure_dir(path)?;
        let mut count = 0;
        for item in fs::read_dir(path)? {
            if !item?.path().is_dir() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn read_tag_file(&self, path: &Path) -> Result<TagSet> {
        let tag_path = path.join(TAG_FILE_NAME);
        if !tag_path.is_file() {
            return Ok(TagSet::new());
        }
        let bytes = fs::read(&tag_path)?;
        let raw = String::from_utf8_lossy(&bytes);
        if matches!(raw, Cow::Owned(_)) {
            warn!(path = %tag_path.display(), "tag file is not valid UTF-8; undecodable bytes replaced");
        }
        Ok(TagSet::parse(&raw))
    }

    fn write_tag_file(&self, path: &Path, tags: &TagSet) -> Result<()> {
        Self::ensure_dir(path)?;
        fs::write(path.join(TAG_FILE_NAME), tags.to_line())?;
        info!(path = %path.display(), tags = tags.len(), "saved tag file");
        Ok(())
    }

    fn ensure_tag_file(&self, path: &Path) -> Result<bool> {
        Self::ensure_dir(path)?;
        let tag_path = path.join(TAG_FILE_NAME);
        if tag_path.is_file() {
            return Ok(false);
        }
        fs::write(&tag_path, "")?;
        Ok(true)
    }

    fn tag_dirs_under(&self, path: &Path) -> Result<Vec<PathBuf>> {
        Self::ensure_dir(path)?;
        let mut dirs = Vec::new();
        for item in WalkDir::new(path).follow_links(false) {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry during tag walk");
                    continue;
                }
            };
            if item.file_type().is_file() && item.file_name() == TAG_FILE_NAME {
                if let Some(parent) = item.path().parent() {
                    dirs.push(parent.to_path_buf());
                }
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}
