use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ShelfError};

/// Contents of the root-location file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RootFile {
    pub root: String,
    #[serde(default)]
    pub publisher_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub min_search_len: Option<usize>,
    #[serde(default)]
    pub fuzzy_cutoff: Option<f32>,
    #[serde(default)]
    pub fuzzy_limit: Option<usize>,
}

impl RootFile {
    /// `*.toml` files are parsed as TOML; anything else uses the first field
    /// of the first non-blank line.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            ShelfError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml {
            toml::from_str::<Self>(&raw)?
        } else {
            Self {
                root: first_field(&raw).unwrap_or_default(),
                ..Self::default()
            }
        };
        if parsed.root.trim().is_empty() {
            return Err(ShelfError::Config(format!(
                "{} is empty or names no root directory",
                path.display()
            )));
        }
        Ok(Self {
            root: parsed.root.trim().to_string(),
            ..parsed
        })
    }
}

fn first_field(raw: &str) -> Option<String> {
    let line = raw.lines().find(|line| !line.trim().is_empty())?;
    let field = line.split(',').next()?.trim();
    let field = field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(field)
        .trim();
    (!field.is_empty()).then(|| field.to_string())
}

/// Walks from `start` towards the filesystem root looking for a child directory named `name`.
pub fn find_root_directory(start: &Path, name: &str) -> Result<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()?.join(start)
    };
    for dir in start.ancestors() {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            debug!(root = %candidate.display(), "located root directory");
            return Ok(candidate);
        }
    }
    Err(ShelfError::RootNotFound {
        name: name.to_string(),
        start,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn csv_file_uses_first_field_of_first_row() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("address.csv");
        fs::write(&path, "\n\"Library\" , ignored\nsecond,row\n").expect("write");
        let loaded = RootFile::load(&path).expect("load");
        assert_eq!(loaded.root, "Library");
        assert_eq!(loaded.publisher_prefixes, None);
    }

    #[test]
    fn toml_file_carries_optional_overrides() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("shelfwalk.toml");
        fs::write(
            &path,
            "root = \"Library\"\npublisher_prefixes = [\"__\"]\nmin_search_len = 4\n",
        )
        .expect("write");
        let loaded = RootFile::load(&path).expect("load");
        assert_eq!(loaded.root, "Library");
        assert_eq!(loaded.publisher_prefixes, Some(vec!["__".to_string()]));
        assert_eq!(loaded.min_search_len, Some(4));
    }

    #[test]
    fn empty_or_missing_file_is_a_config_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("address.csv");
        fs::write(&path, " \n ,x\n").expect("write");
        let err = RootFile::load(&path).expect_err("empty");
        assert!(matches!(err, ShelfError::Config(_)));

        let err = RootFile::load(&temp.path().join("missing.csv")).expect_err("missing");
        assert!(matches!(err, ShelfError::Config(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn root_is_found_by_walking_upwards() {
        let temp = tempdir().expect("tempdir");
        let library = temp.path().join("Library");
        let deep = temp.path().join("work").join("nested");
        fs::create_dir_all(&library).expect("mkdir");
        fs::create_dir_all(&deep).expect("mkdir");

        let found = find_root_directory(&deep, "Library").expect("found");
        assert_eq!(found, library);
    }

    #[test]
    fn unknown_root_name_is_reported() {
        let temp = tempdir().expect("tempdir");
        let err = find_root_directory(temp.path(), "no-such-shelf-dir-7f3a").expect_err("missing");
        assert!(matches!(err, ShelfError::RootNotFound { .. }));
    }
}
