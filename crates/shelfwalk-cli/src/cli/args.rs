use clap::{Args, ValueEnum};

#[derive(Debug, Args)]
pub struct TaggedArgs {
    pub tag: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolveLevel {
    #[value(alias = "publishers")]
    Publisher,
    #[value(alias = "topics")]
    Topic,
    #[value(alias = "chapters")]
    Chapter,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[arg(value_enum)]
    pub level: ResolveLevel,

    pub query: String,

    /// Publisher directory; required for topic and chapter lookups.
    #[arg(long)]
    pub publisher: Option<String>,

    /// Topic directory; required for chapter lookups.
    #[arg(long)]
    pub topic: Option<String>,
}
