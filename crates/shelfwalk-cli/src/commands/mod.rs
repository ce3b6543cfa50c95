use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use shelfwalk_core::{
    LocalRepository, MatchResult, NameResolver, Navigator, Repository, Settings, SystemLauncher,
    TagIndex, Tier, search_topics,
};
use tracing::{debug, info};

use crate::cli::{Cli, Commands, ResolveArgs, ResolveLevel};

mod console;
mod support;


use self::console::StdConsole;
use self::support::print_json;

pub(crate) fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    let settings = Settings::load(&cli.config, cli.root.as_deref(), &cwd)
        .context("failed to locate shelf root")?;
    info!(root = %settings.root.display(), "using shelf root");

    let repo = LocalRepository::new();
    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => browse(&repo, &settings),
        Commands::Tags => {
            let tags = TagIndex::new(&repo, &settings.browser.publisher_prefixes)
                .all_tags(&settings.root)?;
            print_json(&tags)
        }
        Commands::Tagged(args) => {
            let topics = TagIndex::new(&repo, &settings.browser.publisher_prefixes)
                .filter_by_tag(&settings.root, &args.tag)?;
            print_json(&topics)
        }
        Commands::Search(args) => {
            let hits = search_topics(
                &repo,
                &settings.root,
                &settings.browser.publisher_prefixes,
                &args.query,
                settings.browser.min_search_len,
            )?;
            print_json(&hits)
        }
        Commands::Resolve(args) => {
            let report = resolve(&repo, &settings, &args)?;
            print_json(&report)
        }
    }
}

fn browse(repo: &LocalRepository, settings: &Settings) -> Result<()> {
    let launcher = SystemLauncher::detect();
    debug!(
        program = launcher.program(),
        host_tools = launcher.mode().as_str(),
        "launcher ready"
    );
    let mut console = StdConsole::new();
    let mut navigator = Navigator::new(
        repo,
        &launcher,
        settings.root.clone(),
        settings.browser.clone(),
    );
    navigator.run(&mut console).context("navigation failed")
}

#[derive(Debug, Serialize)]
struct ResolveReport {
    tier: Tier,
    query: String,
    outcome: &'static str,
    matches: Vec<String>,
}

const fn level_tier(level: ResolveLevel) -> Tier {
    match level {
        ResolveLevel::Publisher => Tier::Publisher,
        ResolveLevel::Topic => Tier::Topic,
        ResolveLevel::Chapter => Tier::Chapter,
    }
}

fn resolve<R: Repository + ?Sized>(
    repo: &R,
    settings: &Settings,
    args: &ResolveArgs,
) -> Result<ResolveReport> {
    let (dir, prefixes): (PathBuf, Option<&[String]>) = match args.level {
        ResolveLevel::Publisher => (
            settings.root.clone(),
            Some(settings.browser.publisher_prefixes.as_slice()),
        ),
        ResolveLevel::Topic => {
            let publisher = args
                .publisher
                .as_deref()
                .context("--publisher is required to resolve a topic")?;
            (settings.root.join(publisher), None)
        }
        ResolveLevel::Chapter => {
            let publisher = args
                .publisher
                .as_deref()
                .context("--publisher is required to resolve a chapter")?;
            let topic = args
                .topic
                .as_deref()
                .context("--topic is required to resolve a chapter")?;
            (settings.root.join(publisher).join(topic), None)
        }
    };

    let candidates = repo
        .list_child_dirs(&dir, prefixes)
        .with_context(|| format!("failed to list {}", dir.display()))?;
    let resolver = NameResolver::default()
        .with_cutoff(settings.browser.fuzzy_cutoff)
        .with_limit(settings.browser.fuzzy_limit);
    let (outcome, matches) = match resolver.resolve(&args.query, &candidates) {
        MatchResult::Empty => ("empty", Vec::new()),
        MatchResult::One(name) => ("one", vec![name]),
        MatchResult::Many(names) => ("many", names),
    };
    Ok(ResolveReport {
        tier: level_tier(args.level),
        query: args.query.clone(),
        outcome,
        matches,
    })
}
