use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShelfError>;

#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("directory '{name}' not found above {}", start.display())]
    RootNotFound { name: String, start: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ShelfError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotADirectory(_) => "NOT_A_DIRECTORY",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::RootNotFound { .. } => "ROOT_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Toml(_) => "TOML_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Setup failures that should end the process rather than a single screen.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::RootNotFound { .. } | Self::Toml(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_lookup_errors_are_fatal_and_listing_errors_are_not() {
        let missing = ShelfError::RootNotFound {
            name: "Library".to_string(),
            start: PathBuf::from("/tmp/a"),
        };
        assert!(missing.is_fatal());
        assert_eq!(missing.code(), "ROOT_NOT_FOUND");
        assert!(missing.to_string().contains("'Library'"));

        let listing = ShelfError::NotADirectory(PathBuf::from("/tmp/a/file.txt"));
        assert!(!listing.is_fatal());
        assert_eq!(listing.code(), "NOT_A_DIRECTORY");
    }
}
