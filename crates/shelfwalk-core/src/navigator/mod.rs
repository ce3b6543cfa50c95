//! Tiered console navigation: publishers, topics and chapters, plus the
//! tag-browsing and topic-search sub-modes hanging off the top level.
//!
//! The navigator keeps an explicit stack of views. Every `step` re-reads the
//! current view's listing from the repository, renders it, reads exactly one
//! line and applies one transition. `back` pops one view, `exit` ends the
//! session from anywhere.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::BrowserConfig;
use crate::error::{Result, ShelfError};
use crate::launcher::{LaunchOutcome, Launcher};
use crate::models::{ChapterEntry, Tier, TopicRef};
use crate::repository::{Repository, TAG_FILE_NAME};
use crate::resolver::{CharDiffRatio, MatchResult, MatchStrategy, NameResolver};
use crate::search::search_topics;
use crate::tags::TagIndex;

mod console;
mod input;


pub use console::{Console, PAUSE_PROMPT};
pub use input::{Input, Keyword, parse_index, zero_based};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Root,
    PublisherSelected,
    TopicSelected,
    TagBrowsing,
    Searching,
    Exited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    Root,
    Publisher(String),
    Topic(TopicRef),
    TagList,
    Tagged(String),
    SearchPrompt,
    SearchResults(String),
}

impl View {
    fn prompt(&self, config: &BrowserConfig) -> String {
        match self {
            Self::Root => {
                "\nEnter a number or name, 'tags', 'search', 'open' or 'exit': ".to_string()
            }
            Self::Publisher(_) | Self::Topic(_) => {
                "\nEnter a number or name, 'edit', 'open', 'back' or 'exit': ".to_string()
            }
            Self::TagList => "\nEnter a number, 'back' or 'exit': ".to_string(),
            Self::Tagged(_) => "\nEnter a number, 'edit', 'open', 'back' or 'exit': ".to_string(),
            Self::SearchPrompt => format!(
                "\nEnter a topic search query (at least {} characters), 'back' or 'exit': ",
                config.min_search_len
            ),
            Self::SearchResults(_) => {
                "\nEnter a number, 'search', 'open', 'back' or 'exit': ".to_string()
            }
        }
    }
}

enum Listing {
    Names(Vec<String>),
    Chapters(Vec<ChapterEntry>),
    Topics(Vec<TopicRef>),
    Prompt,
}

impl Listing {
    fn names(&self) -> Vec<String> {
        match self {
            Self::Names(names) => names.clone(),
            Self::Chapters(chapters) => chapters.iter().map(|c| c.name.clone()).collect(),
            Self::Topics(topics) => topics.iter().map(|t| t.topic.clone()).collect(),
            Self::Prompt => Vec::new(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Names(names) => names.len(),
            Self::Chapters(chapters) => chapters.len(),
            Self::Topics(topics) => topics.len(),
            Self::Prompt => 0,
        }
    }
}

pub struct Navigator<'a, R, L, S = CharDiffRatio>
where
    R: Repository + ?Sized,
    L: Launcher + ?Sized,
{
    repo: &'a R,
    launcher: &'a L,
    resolver: NameResolver<S>,
    config: BrowserConfig,
    root: PathBuf,
    stack: Vec<View>,
    exited: bool,
}

impl<'a, R, L> Navigator<'a, R, L>
where
    R: Repository + ?Sized,
    L: Launcher + ?Sized,
{
    pub fn new(repo: &'a R, launcher: &'a L, root: impl Into<PathBuf>, config: BrowserConfig) -> Self {
        let resolver = NameResolver::new(CharDiffRatio::new())
            .with_cutoff(config.fuzzy_cutoff)
            .with_limit(config.fuzzy_limit);
        Self::with_resolver(repo, launcher, root, config, resolver)
    }
}

impl<'a, R, L, S> Navigator<'a, R, L, S>
where
    R: Repository + ?Sized,
    L: Launcher + ?Sized,
    S: MatchStrategy,
{
    pub fn with_resolver(
        repo: &'a R,
        launcher: &'a L,
        root: impl Into<PathBuf>,
        config: BrowserConfig,
        resolver: NameResolver<S>,
    ) -> Self {
        Self {
            repo,
            launcher,
            resolver,
            config,
            root: root.into(),
            stack: vec![View::Root],
            exited: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        if self.exited {
            return NavState::Exited;
        }
        match self.current() {
            View::Root => NavState::Root,
            View::Publisher(_) => NavState::PublisherSelected,
            View::Topic(_) => NavState::TopicSelected,
            View::TagList | View::Tagged(_) => NavState::TagBrowsing,
            View::SearchPrompt | View::SearchResults(_) => NavState::Searching,
        }
    }

    /// Number of `back` steps needed to return to the top level.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        match self.current() {
            View::Publisher(_) => Tier::Publisher,
            View::Topic(_) => Tier::Topic,
            _ => Tier::Root,
        }
    }

    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        match self.current() {
            View::Publisher(publisher) => self.root.join(publisher),
            View::Topic(topic) => topic.path_under(&self.root),
            _ => self.root.clone(),
        }
    }

    #[must_use]
    pub const fn is_exited(&self) -> bool {
        self.exited
    }

    /// Drives the session until `exit` or end of input. Fails only when the
    /// root itself cannot be listed or the console breaks.
    pub fn run<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<()> {
        self.repo
            .list_child_dirs(&self.root, Some(&self.config.publisher_prefixes))?;
        while !self.exited {
            self.step(console)?;
        }
        debug!("navigator exited");
        Ok(())
    }

    /// Renders the current view, reads one line and applies it.
    pub fn step<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<()> {
        if self.exited {
            return Ok(());
        }
        let view = self.current();
        let listing = match self.load(&view) {
            Ok(listing) => listing,
            Err(err) => return self.recover(err, console),
        };
        console.clear()?;
        self.show(&view, &listing, console)?;
        let Some(raw) = console.read_line(&view.prompt(&self.config))? else {
            self.exited = true;
            return Ok(());
        };
        self.dispatch(&view, &listing, Input::parse(&raw), console)
    }

    fn current(&self) -> View {
        self.stack.last().cloned().unwrap_or(View::Root)
    }

    fn tag_index(&self) -> TagIndex<'_, R> {
        TagIndex::new(self.repo, &self.config.publisher_prefixes)
    }

    fn load(&self, view: &View) -> Result<Listing> {
        let prefixes = &self.config.publisher_prefixes;
        match view {
            View::Root => Ok(Listing::Names(
                self.repo.list_child_dirs(&self.root, Some(prefixes))?,
            )),
            View::Publisher(publisher) => Ok(Listing::Names(
                self.repo.list_child_dirs(&self.root.join(publisher), None)?,
            )),
            View::Topic(topic) => {
                let topic_path = topic.path_under(&self.root);
                let mut chapters = Vec::new();
                for name in self.repo.list_child_dirs(&topic_path, None)? {
                    let file_count = self.repo.count_plain_files(&topic_path.join(&name))?;
                    chapters.push(ChapterEntry { name, file_count });
                }
                Ok(Listing::Chapters(chapters))
            }
            View::TagList => Ok(Listing::Names(
                self.tag_index().all_tags(&self.root)?.into_iter().collect(),
            )),
            View::Tagged(tag) => Ok(Listing::Topics(
                self.tag_index().filter_by_tag(&self.root, tag)?,
            )),
            View::SearchPrompt => Ok(Listing::Prompt),
            View::SearchResults(query) => Ok(Listing::Topics(search_topics(
                self.repo,
                &self.root,
                prefixes,
                query,
                self.config.min_search_len,
            )?)),
        }
    }

    fn show<C: Console + ?Sized>(&self, view: &View, listing: &Listing, console: &mut C) -> Result<()> {
        let header = match view {
            View::Root => "Available Publishers:".to_string(),
            View::Publisher(_) => "Available Topics:".to_string(),
            View::Topic(_) => "Available Chapters:".to_string(),
            View::TagList => "Available Tags:".to_string(),
            View::Tagged(tag) => format!("Topics with the tag '{tag}':"),
            View::SearchPrompt => "Search topics across all publishers.".to_string(),
            View::SearchResults(_) => "Matching Topics:".to_string(),
        };
        console.print(&format!("\n{header}"))?;
        match listing {
            Listing::Names(names) => {
                for (i, name) in names.iter().enumerate() {
                    console.print(&format!("{}. {name}", i + 1))?;
                }
            }
            Listing::Chapters(chapters) => {
                for (i, chapter) in chapters.iter().enumerate() {
                    console.print(&format!(
                        "{}. [{} Files] - {}",
                        i + 1,
                        chapter.file_count,
                        chapter.name
                    ))?;
                }
            }
            Listing::Topics(topics) => {
                for (i, topic) in topics.iter().enumerate() {
                    console.print(&format!("{}. [{}] -> {}", i + 1, topic.publisher, topic.topic))?;
                }
            }
            Listing::Prompt => {}
        }
        Ok(())
    }

    fn dispatch<C: Console + ?Sized>(
        &mut self,
        view: &View,
        listing: &Listing,
        input: Input,
        console: &mut C,
    ) -> Result<()> {
        match input {
            Input::Empty if *view == View::SearchPrompt => self.run_search("", console),
            Input::Empty => Ok(()),
            Input::Keyword(Keyword::Exit) => {
                self.exited = true;
                Ok(())
            }
            Input::Keyword(Keyword::Back) => self.go_back(console),
            Input::Keyword(Keyword::Open) => self.open(view, listing, console),
            Input::Keyword(Keyword::Edit) => self.edit(view, listing, console),
            Input::Keyword(Keyword::Tags) if *view == View::Root => self.enter_tags(console),
            Input::Keyword(Keyword::Search) if *view == View::Root => {
                self.stack.push(View::SearchPrompt);
                Ok(())
            }
            Input::Keyword(Keyword::Search) if matches!(view, View::SearchResults(_)) => {
                self.stack.pop();
                Ok(())
            }
            other => self.select(view, listing, other, console),
        }
    }

    fn go_back<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<()> {
        if self.stack.len() > 1 {
            self.stack.pop();
            return Ok(());
        }
        notice(console, "Already at the top level.")
    }

    fn select<C: Console + ?Sized>(
        &mut self,
        view: &View,
        listing: &Listing,
        input: Input,
        console: &mut C,
    ) -> Result<()> {
        match view {
            View::SearchPrompt => self.run_search(&input.as_text(), console),
            View::Root | View::Publisher(_) | View::Topic(_) => {
                let names = listing.names();
                let chosen = match input {
                    Input::Index(index) => match zero_based(index, names.len()) {
                        Some(i) => Some(names[i].clone()),
                        None => return notice(console, "Invalid number."),
                    },
                    other => match self.resolver.resolve(&other.as_text(), &names) {
                        MatchResult::Empty => return notice(console, "No matching item found."),
                        MatchResult::One(name) => Some(name),
                        MatchResult::Many(matches) => self.disambiguate(&matches, console)?,
                    },
                };
                match chosen {
                    Some(name) => self.descend(view, &name, console),
                    None => Ok(()),
                }
            }
            View::TagList | View::Tagged(_) | View::SearchResults(_) => {
                let Input::Index(index) = input else {
                    return notice(console, "Invalid input. Please enter a number.");
                };
                let Some(i) = zero_based(index, listing.len()) else {
                    return notice(console, "Invalid number.");
                };
                match listing {
                    Listing::Names(tags) => self.choose_tag(&tags[i], console),
                    Listing::Topics(topics) => {
                        self.stack.push(View::Topic(topics[i].clone()));
                        Ok(())
                    }
                    Listing::Chapters(_) | Listing::Prompt => Ok(()),
                }
            }
        }
    }

    fn disambiguate<C: Console + ?Sized>(
        &mut self,
        matches: &[String],
        console: &mut C,
    ) -> Result<Option<String>> {
        console.print("Multiple matches found:")?;
        for (i, name) in matches.iter().enumerate() {
            console.print(&format!("{}. {name}", i + 1))?;
        }
        loop {
            let Some(raw) =
                console.read_line("Enter the number of your choice, or 'back' to go back: ")?
            else {
                self.exited = true;
                return Ok(None);
            };
            match Input::parse(&raw) {
                Input::Keyword(Keyword::Back) => return Ok(None),
                Input::Keyword(Keyword::Exit) => {
                    self.exited = true;
                    return Ok(None);
                }
                Input::Index(index) => {
                    if let Some(i) = zero_based(index, matches.len()) {
                        return Ok(Some(matches[i].clone()));
                    }
                }
                _ => {}
            }
            console.print("Invalid choice. Please try again.")?;
        }
    }

    fn descend<C: Console + ?Sized>(&mut self, view: &View, name: &str, console: &mut C) -> Result<()> {
        match view {
            View::Root => self.stack.push(View::Publisher(name.to_string())),
            View::Publisher(publisher) => self
                .stack
                .push(View::Topic(TopicRef::new(publisher.clone(), name))),
            View::Topic(topic) => {
                // chapters are leaves: selecting one opens it in place
                let chapter = topic.path_under(&self.root).join(name);
                return self.open_path(&chapter, console);
            }
            _ => {}
        }
        Ok(())
    }

    fn enter_tags<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<()> {
        let tags = self.tag_index().all_tags(&self.root);
        match tags {
            Ok(tags) if tags.is_empty() => notice(console, "No tags available to filter by."),
            Ok(_) => {
                self.stack.push(View::TagList);
                Ok(())
            }
            Err(err) => report(console, "Cannot read tags", &err),
        }
    }

    fn choose_tag<C: Console + ?Sized>(&mut self, tag: &str, console: &mut C) -> Result<()> {
        let topics = self.tag_index().filter_by_tag(&self.root, tag);
        match topics {
            Ok(topics) if topics.is_empty() => {
                notice(console, &format!("No topics found with the tag '{tag}'."))
            }
            Ok(_) => {
                self.stack.push(View::Tagged(tag.to_string()));
                Ok(())
            }
            Err(err) => report(console, "Cannot filter by tag", &err),
        }
    }

    fn run_search<C: Console + ?Sized>(&mut self, query: &str, console: &mut C) -> Result<()> {
        let found = search_topics(
            self.repo,
            &self.root,
            &self.config.publisher_prefixes,
            query,
            self.config.min_search_len,
        );
        match found {
            Ok(hits) if hits.is_empty() => notice(console, "No topics found."),
            Ok(_) => {
                self.stack.push(View::SearchResults(query.trim().to_string()));
                Ok(())
            }
            Err(ShelfError::Validation(_)) => notice(
                console,
                &format!(
                    "Search query must be at least {} characters long.",
                    self.config.min_search_len
                ),
            ),
            Err(err) => report(console, "Cannot search topics", &err),
        }
    }

    /// Topic listings open one entry; every other view opens its own directory.
    fn open<C: Console + ?Sized>(&mut self, view: &View, listing: &Listing, console: &mut C) -> Result<()> {
        if let (View::Tagged(_) | View::SearchResults(_), Listing::Topics(topics)) = (view, listing) {
            return match self.pick_topic(topics, "Enter the number to open: ", console)? {
                Some(path) => self.open_path(&path, console),
                None => Ok(()),
            };
        }
        let path = self.current_path();
        self.open_path(&path, console)
    }

    /// Reads a 1-based pick from a topic listing. Bad answers are reported and yield `None`.
    fn pick_topic<C: Console + ?Sized>(
        &mut self,
        topics: &[TopicRef],
        prompt: &str,
        console: &mut C,
    ) -> Result<Option<PathBuf>> {
        let Some(raw) = console.read_line(prompt)? else {
            self.exited = true;
            return Ok(None);
        };
        let Some(index) = parse_index(&raw) else {
            notice(console, "Invalid input. Please enter a number.")?;
            return Ok(None);
        };
        let Some(i) = zero_based(index, topics.len()) else {
            notice(console, "Invalid number.")?;
            return Ok(None);
        };
        Ok(Some(topics[i].path_under(&self.root)))
    }

    fn edit<C: Console + ?Sized>(&mut self, view: &View, listing: &Listing, console: &mut C) -> Result<()> {
        match (view, listing) {
            (View::Publisher(_) | View::Topic(_), _) => {
                let path = self.current_path();
                self.edit_tags(&path, console)
            }
            (View::Tagged(_), Listing::Topics(topics)) => {
                match self.pick_topic(topics, "Enter the number to edit tags for: ", console)? {
                    Some(path) => self.edit_tags(&path, console),
                    None => Ok(()),
                }
            }
            _ => notice(console, "Nothing to edit here; select a publisher or topic first."),
        }
    }

    fn edit_tags<C: Console + ?Sized>(&mut self, path: &Path, console: &mut C) -> Result<()> {
        let start = match self.tag_index().begin_edit(path) {
            Ok(start) => start,
            Err(err) => return report(console, "Cannot edit tags", &err),
        };
        if start.created {
            console.print(&format!(
                "'{TAG_FILE_NAME}' not found in {}. Creating new file.",
                path.display()
            ))?;
        }
        console.print(&format!(
            "Editing tags in '{}'.",
            path.join(TAG_FILE_NAME).display()
        ))?;
        if start.current.is_empty() {
            console.print("No tags found.")?;
        } else {
            console.print(&format!("Current tags: {}", start.current))?;
        }

        let Some(raw) = console.read_line("Enter new tags separated by commas: ")? else {
            self.exited = true;
            return Ok(());
        };
        let saved = self.tag_index().save_edit(path, &raw);
        match saved {
            Ok(saved) => {
                debug!(path = %path.display(), tags = %saved, "tags edited");
                notice(console, "Tags updated successfully.")
            }
            Err(err) => report(console, "Cannot save tags", &err),
        }
    }

    fn open_path<C: Console + ?Sized>(&self, path: &Path, console: &mut C) -> Result<()> {
        let message = match self.launcher.open(path) {
            LaunchOutcome::Spawned => format!("Opened directory: {}", path.display()),
            LaunchOutcome::Blocked { reason } => format!("Opening is disabled: {reason}"),
            LaunchOutcome::SpawnError { error } => {
                format!("Could not open {}: {error}", path.display())
            }
        };
        notice(console, &message)
    }

    /// A listing that cannot be read sends the user back one view; only the
    /// top level has nowhere to go.
    fn recover<C: Console + ?Sized>(&mut self, err: ShelfError, console: &mut C) -> Result<()> {
        if self.stack.len() <= 1 {
            return Err(err);
        }
        let path = self.current_path();
        warn!(path = %path.display(), error = %err, "listing failed, returning to parent");
        self.stack.pop();
        notice(console, &format!("Cannot read {}: {err}", path.display()))
    }
}

fn notice<C: Console + ?Sized>(console: &mut C, message: &str) -> Result<()> {
    console.print(message)?;
    console.pause()?;
    Ok(())
}

fn report<C: Console + ?Sized>(console: &mut C, context: &str, err: &ShelfError) -> Result<()> {
    warn!(code = err.code(), error = %err, "{context}");
    notice(console, &format!("{context}: {err}"))
}
