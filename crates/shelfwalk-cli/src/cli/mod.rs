use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;


pub use args::{ResolveArgs, ResolveLevel, SearchArgs, TaggedArgs};

#[derive(Debug, Parser)]
#[command(name = "shelfwalk")]
#[command(about = "Browse a publisher/topic/chapter course shelf from the terminal", version)]
pub struct Cli {
    /// Root-location file: a one-line CSV naming the shelf directory, or a `.toml` file.
    #[arg(long, default_value = "address.csv")]
    pub config: PathBuf,

    /// Use this directory as the shelf root and skip the root-location file.
    #[arg(long)]
    pub root: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive navigation (default).
    Browse,
    /// Every tag found under the root.
    Tags,
    /// Topics carrying a tag.
    Tagged(TaggedArgs),
    /// Topics whose names contain a query.
    Search(SearchArgs),
    /// Resolve a typed name against one tier's listing.
    Resolve(ResolveArgs),
}
