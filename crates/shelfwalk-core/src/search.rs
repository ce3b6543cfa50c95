use std::path::Path;

use crate::error::{Result, ShelfError};
use crate::models::TopicRef;
use crate::repository::Repository;

pub const DEFAULT_MIN_SEARCH_LEN: usize = 3;

pub fn validate_query(query: &str, min_len: usize) -> Result<String> {
    let trimmed = query.trim();
    if trimmed.chars().count() < min_len {
        return Err(ShelfError::Validation(format!(
            "search query must be at least {min_len} characters long"
        )));
    }
    Ok(trimmed.to_string())
}

/// Topics of every publisher whose name contains `query` (case-insensitive),
/// ordered by topic then publisher.
pub fn search_topics<R: Repository + ?Sized>(
    repo: &R,
    root: &Path,
    publisher_prefixes: &[String],
    query: &str,
    min_len: usize,
) -> Result<Vec<TopicRef>> {
    let needle = validate_query(query, min_len)?.to_lowercase();
    let mut hits = Vec::new();
    for publisher in repo.list_child_dirs(root, Some(publisher_prefixes))? {
        for topic in repo.list_child_dirs(&root.join(&publisher), None)? {
            if topic.to_lowercase().contains(&needle) {
                hits.push(TopicRef::new(publisher.clone(), topic));
            }
        }
    }
    hits.sort_by(|a, b| a.topic.cmp(&b.topic).then_with(|| a.publisher.cmp(&b.publisher)));
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;

    struct RefusingRepository;

    impl Repository for RefusingRepository {
        fn list_child_dirs(&self, _: &Path, _: Option<&[String]>) -> Result<Vec<String>> {
            panic!("short queries must not reach the repository")
        }
        fn count_plain_files(&self, _: &Path) -> Result<usize> {
            unreachable!()
        }
        fn read_tag_file(&self, _: &Path) -> Result<crate::models::TagSet> {
            unreachable!()
        }
        fn write_tag_file(&self, _: &Path, _: &crate::models::TagSet) -> Result<()> {
            unreachable!()
        }
        fn ensure_tag_file(&self, _: &Path) -> Result<bool> {
            unreachable!()
        }
        fn tag_dirs_under(&self, _: &Path) -> Result<Vec<std::path::PathBuf>> {
            unreachable!()
        }
    }

    #[test]
    fn short_query_is_rejected_before_any_listing() {
        let err = search_topics(&RefusingRepository, Path::new("/shelf"), &[], " ab ", 3)
            .expect_err("too short");
        assert!(matches!(err, ShelfError::Validation(_)));
    }

    #[test]
    fn matches_are_ordered_by_topic_then_publisher() {
        let repo = MemoryRepository::new()
            .with_dir("/shelf/__B/Rust in Action")
            .with_dir("/shelf/__A/Rust in Action")
            .with_dir("/shelf/__A/Async Rust")
            .with_dir("/shelf/__A/Go")
            .with_dir("/shelf/other/Rusty");
        let prefixes = vec!["__".to_string()];
        let hits =
            search_topics(&repo, Path::new("/shelf"), &prefixes, "rust", 3).expect("search");
        assert_eq!(
            hits,
            vec![
                TopicRef::new("__A", "Async Rust"),
                TopicRef::new("__A", "Rust in Action"),
                TopicRef::new("__B", "Rust in Action"),
            ]
        );
    }
}
