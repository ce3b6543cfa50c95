use std::path::{Path, PathBuf};

use crate::error::{Result, ShelfError};
use crate::resolver::{DEFAULT_FUZZY_CUTOFF, DEFAULT_FUZZY_LIMIT};
use crate::search::DEFAULT_MIN_SEARCH_LEN;

mod env;
mod root;

pub use root::{RootFile, find_root_directory};

pub const DEFAULT_CONFIG_FILE: &str = "address.csv";
pub const DEFAULT_PUBLISHER_PREFIXES: [&str; 5] = ["__", "$_", "$__", "#_", "#__"];

pub const ENV_PUBLISHER_PREFIXES: &str = "SHELFWALK_PUBLISHER_PREFIXES";
pub const ENV_MIN_SEARCH_LEN: &str = "SHELFWALK_MIN_SEARCH_LEN";
pub const ENV_FUZZY_CUTOFF: &str = "SHELFWALK_FUZZY_CUTOFF";

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub publisher_prefixes: Vec<String>,
    pub min_search_len: usize,
    pub fuzzy_cutoff: f32,
    pub fuzzy_limit: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            publisher_prefixes: DEFAULT_PUBLISHER_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            min_search_len: DEFAULT_MIN_SEARCH_LEN,
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            fuzzy_limit: DEFAULT_FUZZY_LIMIT,
        }
    }
}

impl BrowserConfig {
    #[must_use]
    pub fn with_file(self, file: &RootFile) -> Self {
        let defaults = self;
        Self {
            publisher_prefixes: file
                .publisher_prefixes
                .clone()
                .filter(|prefixes| !prefixes.is_empty())
                .unwrap_or(defaults.publisher_prefixes),
            min_search_len: file
                .min_search_len
                .filter(|value| *value >= 1)
                .unwrap_or(defaults.min_search_len),
            fuzzy_cutoff: file
                .fuzzy_cutoff
                .filter(|value| value.is_finite() && (0.0..=1.0).contains(value))
                .unwrap_or(defaults.fuzzy_cutoff),
            fuzzy_limit: file
                .fuzzy_limit
                .filter(|value| *value >= 1)
                .unwrap_or(defaults.fuzzy_limit),
        }
    }

    /// Applies environment overrides through `lookup` (normally `std::env::var`).
    #[must_use]
    pub fn with_env_lookup(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let prefixes = env::non_empty(lookup(ENV_PUBLISHER_PREFIXES));
        let min_search_len = env::non_empty(lookup(ENV_MIN_SEARCH_LEN));
        let fuzzy_cutoff = env::non_empty(lookup(ENV_FUZZY_CUTOFF));
        Self {
            publisher_prefixes: env::parse_list(prefixes.as_deref())
                .unwrap_or(self.publisher_prefixes),
            min_search_len: env::parse_usize_at_least(
                min_search_len.as_deref(),
                self.min_search_len,
                1,
            ),
            fuzzy_cutoff: env::parse_unit_interval(fuzzy_cutoff.as_deref(), self.fuzzy_cutoff),
            fuzzy_limit: self.fuzzy_limit,
        }
    }

    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }
}

/// Where the shelf lives and how to browse it.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub root: PathBuf,
    pub browser: BrowserConfig,
}

impl Settings {
    /// An explicit root skips the root-location file; otherwise the file names
    /// a directory that is searched for upwards from `start_dir`.
    pub fn load(config_file: &Path, explicit_root: Option<&Path>, start_dir: &Path) -> Result<Self> {
        if let Some(root) = explicit_root {
            if !root.is_dir() {
                return Err(ShelfError::Config(format!(
                    "root is not a directory: {}",
                    root.display()
                )));
            }
            return Ok(Self {
                root: root.to_path_buf(),
                browser: BrowserConfig::default().with_env(),
            });
        }

        let file = RootFile::load(config_file)?;
        let root = find_root_directory(start_dir, &file.root)?;
        Ok(Self {
            root,
            browser: BrowserConfig::default().with_file(&file).with_env(),
        })
    }
}
