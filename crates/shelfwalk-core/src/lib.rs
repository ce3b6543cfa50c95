// Public fallible APIs in this crate share one concrete error contract (`ShelfError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod config;
pub mod error;
pub mod launcher;
pub mod models;
pub mod navigator;
pub mod repository;
pub mod resolver;
pub mod search;
pub mod tags;

pub use config::{BrowserConfig, Settings};
pub use error::{Result, ShelfError};
pub use launcher::{LaunchOutcome, Launcher, SystemLauncher};
pub use models::{ChapterEntry, Node, TagSet, Tier, TopicRef};
pub use navigator::{Console, NavState, Navigator};
pub use repository::{LocalRepository, MemoryRepository, Repository};
pub use resolver::{CharDiffRatio, MatchResult, MatchStrategy, NameResolver};
pub use search::search_topics;
pub use tags::TagIndex;
