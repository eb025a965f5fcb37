use std::path::PathBuf;

use catalog_core::{CatalogFilter, Feedback, ProblemType, SortOrder, Source, SubmissionDetails};
use clap::{Args, Parser, Subcommand, ValueEnum};

use super::config::DEFAULT_CONFIG_FILENAME;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shared catalog of Codeforces and Kattis problems")]
pub(crate) struct Cli {
    /// Configuration file (RON).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Log at debug level regardless of the configured level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Browse the catalog.
    List(ListArgs),
    /// Show one problem in full.
    Show { identifier: String },
    /// Add problems by URL or shorthand code (CF1794E, GYM104114C, hello).
    Add(AddArgs),
    /// Report which references would be recognized, without adding anything.
    Check {
        #[arg(long, short)]
        site: Source,
        #[arg(required = true)]
        references: Vec<String>,
    },
    /// Like a problem; liking it again takes the like back.
    Like { identifier: String },
    /// Dislike a problem; disliking it again takes the dislike back.
    Dislike { identifier: String },
    /// Load the built-in starter problems into the database.
    Seed,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    #[arg(long, short)]
    pub site: Option<Source>,
    /// geometry, string, tree, math, graph, queries, array or misc.
    #[arg(long = "type")]
    pub kind: Option<ProblemType>,
    #[arg(long, short)]
    pub tag: Option<String>,
    #[arg(long)]
    pub min: Option<u32>,
    #[arg(long)]
    pub max: Option<u32>,
    /// Matches against name and identifier.
    #[arg(long, short = 'q')]
    pub search: Option<String>,
    #[arg(long, value_enum, default_value_t = SortArg::Newest)]
    pub sort: SortArg,
}

impl ListArgs {
    pub fn to_filter(&self) -> CatalogFilter {
        CatalogFilter {
            source: self.site,
            kind: self.kind,
            tag: self.tag.clone(),
            min_difficulty: self.min,
            max_difficulty: self.max,
            search: self.search.clone(),
            sort: self.sort.into(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct AddArgs {
    #[arg(long, short)]
    pub site: Source,
    /// Handle to credit; defaults to the configured submitter.
    #[arg(long)]
    pub by: Option<String>,
    /// Estimated difficulty on the 1 to 10 scale.
    #[arg(long, short)]
    pub difficulty: Option<f64>,
    #[arg(long = "tag", short)]
    pub tags: Vec<String>,
    #[arg(long = "type")]
    pub kind: Option<ProblemType>,
    #[arg(required = true)]
    pub references: Vec<String>,
}

impl AddArgs {
    pub fn details(&self, default_submitter: &str) -> SubmissionDetails {
        SubmissionDetails {
            submitter: self
                .by
                .clone()
                .unwrap_or_else(|| default_submitter.to_string()),
            estimated_difficulty: self.difficulty,
            tags: self.tags.clone(),
            kind: self.kind,
        }
    }

    /// One reference per line, the way they would be pasted.
    pub fn input(&self) -> String {
        self.references.join("\n")
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum SortArg {
    #[default]
    Newest,
    Liked,
    Easiest,
    Hardest,
    Name,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortOrder::Newest,
            SortArg::Liked => SortOrder::MostLiked,
            SortArg::Easiest => SortOrder::Easiest,
            SortArg::Hardest => SortOrder::Hardest,
            SortArg::Name => SortOrder::Name,
        }
    }
}

impl Command {
    pub fn feedback(&self) -> Option<(&str, Feedback)> {
        match self {
            Command::Like { identifier } => Some((identifier, Feedback::Like)),
            Command::Dislike { identifier } => Some((identifier, Feedback::Dislike)),
            _ => None,
        }
    }
}
