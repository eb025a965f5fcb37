use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::Counts;

/// Lowest rating on the normalized difficulty scale.
pub const MIN_DIFFICULTY: u32 = 800;
/// Highest rating on the normalized difficulty scale.
pub const MAX_DIFFICULTY: u32 = 3500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    Codeforces,
    Kattis,
}

impl Source {
    /// Derives the hosting site from a problem URL.
    ///
    /// Anything that is not hosted on kattis.com counts as Codeforces, which
    /// matches how rows written before the source column existed were read.
    pub fn from_url(url: &str) -> Self {
        let host = url::Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase));
        match host {
            Some(host) if host == "kattis.com" || host.ends_with(".kattis.com") => Source::Kattis,
            Some(_) => Source::Codeforces,
            None if url.contains("kattis.com") => Source::Kattis,
            None => Source::Codeforces,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Source::Codeforces => "codeforces",
            Source::Kattis => "kattis",
        }
    }

    fn site_root(self) -> &'static str {
        match self {
            Source::Codeforces => "https://codeforces.com",
            Source::Kattis => "https://open.kattis.com",
        }
    }

    fn profile_path(self) -> &'static str {
        match self {
            Source::Codeforces => "profile",
            Source::Kattis => "users",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSource(pub String);

impl fmt::Display for UnknownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown problem source {:?} (expected codeforces or kattis)", self.0)
    }
}

impl std::error::Error for UnknownSource {}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codeforces" | "cf" => Ok(Source::Codeforces),
            "kattis" => Ok(Source::Kattis),
            _ => Err(UnknownSource(s.to_string())),
        }
    }
}

/// Broad category a problem is filed under. Problems are left
/// unclassified until someone picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProblemType {
    Geometry,
    Strings,
    Tree,
    Math,
    Graph,
    Queries,
    Array,
    Misc,
}

impl ProblemType {
    pub const ALL: [ProblemType; 8] = [
        ProblemType::Geometry,
        ProblemType::Strings,
        ProblemType::Tree,
        ProblemType::Math,
        ProblemType::Graph,
        ProblemType::Queries,
        ProblemType::Array,
        ProblemType::Misc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProblemType::Geometry => "geometry",
            ProblemType::Strings => "string",
            ProblemType::Tree => "tree",
            ProblemType::Math => "math",
            ProblemType::Graph => "graph",
            ProblemType::Queries => "queries",
            ProblemType::Array => "array",
            ProblemType::Misc => "misc",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProblemType(pub String);

impl fmt::Display for UnknownProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown problem type {:?}", self.0)
    }
}

impl std::error::Error for UnknownProblemType {}

impl FromStr for ProblemType {
    type Err = UnknownProblemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = match wanted.as_str() {
            "strings" => "string",
            "trees" => "tree",
            "graphs" => "graph",
            other => other,
        };
        ProblemType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| UnknownProblemType(s.to_string()))
    }
}

/// Display name and profile link of whoever added a problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub name: String,
    pub profile_url: String,
}

impl Submitter {
    /// Builds a submitter linking to the handle's profile on `source`.
    /// A blank handle becomes `anonymous` pointing at the site root.
    pub fn for_handle(source: Source, handle: &str) -> Self {
        let handle = handle.trim();
        if handle.is_empty() {
            return Self {
                name: "anonymous".to_string(),
                profile_url: source.site_root().to_string(),
            };
        }
        Self {
            name: handle.to_string(),
            profile_url: format!(
                "{}/{}/{}",
                source.site_root(),
                source.profile_path(),
                handle
            ),
        }
    }
}

/// A catalog entry. This is the only problem type in the workspace; storage
/// rows are converted to and from it in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub identifier: String,
    pub name: String,
    pub tags: Vec<String>,
    pub difficulty: Option<u32>,
    pub source_url: String,
    pub solved_count: u32,
    pub added_on: DateTime<Utc>,
    pub submitter: Submitter,
    pub likes: u32,
    pub dislikes: u32,
    pub kind: Option<ProblemType>,
}

impl Problem {
    pub fn source(&self) -> Source {
        Source::from_url(&self.source_url)
    }

    pub fn counts(&self) -> Counts {
        Counts {
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Trims, lower-cases, sorts and de-duplicates tags, dropping blanks.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = tags
        .into_iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Maps a Kattis rating (1.0 to 10.0) onto the 800..=3500 scale.
pub fn map_kattis_difficulty(rating: f64) -> u32 {
    let rating = if rating.is_nan() {
        1.0
    } else {
        rating.clamp(1.0, 10.0)
    };
    let span = f64::from(MAX_DIFFICULTY - MIN_DIFFICULTY);
    (f64::from(MIN_DIFFICULTY) + (rating - 1.0) * span / 9.0).round() as u32
}

/// Turns a slug such as `hello-world` into `Hello World`.
pub fn title_from_slug(slug: &str) -> String {
    slug.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
