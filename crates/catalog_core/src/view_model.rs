use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::state::Notice;
use crate::{Feedback, Problem, ProblemType, Source, Submitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    MostLiked,
    Easiest,
    Hardest,
    Name,
}

impl SortOrder {
    pub(crate) fn apply(self, rows: &mut [ProblemRow]) {
        rows.sort_by(|a, b| self.compare(a, b).then_with(|| a.identifier.cmp(&b.identifier)));
    }

    fn compare(self, a: &ProblemRow, b: &ProblemRow) -> Ordering {
        match self {
            SortOrder::Newest => b.added_on.cmp(&a.added_on),
            SortOrder::MostLiked => b
                .likes
                .cmp(&a.likes)
                .then_with(|| a.dislikes.cmp(&b.dislikes)),
            SortOrder::Easiest => by_difficulty(a.difficulty, b.difficulty, false),
            SortOrder::Hardest => by_difficulty(a.difficulty, b.difficulty, true),
            SortOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

/// Unrated problems sort last in either direction.
fn by_difficulty(a: Option<u32>, b: Option<u32>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Browse filter. Empty fields match everything; a difficulty bound excludes
/// unrated problems.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub source: Option<Source>,
    pub kind: Option<ProblemType>,
    pub tag: Option<String>,
    pub min_difficulty: Option<u32>,
    pub max_difficulty: Option<u32>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl CatalogFilter {
    pub(crate) fn matches(&self, problem: &Problem) -> bool {
        if self.source.is_some_and(|source| problem.source() != source) {
            return false;
        }
        if self.kind.is_some_and(|kind| problem.kind != Some(kind)) {
            return false;
        }
        if self.tag.as_deref().is_some_and(|tag| !problem.has_tag(tag)) {
            return false;
        }
        if self.min_difficulty.is_some() || self.max_difficulty.is_some() {
            let Some(difficulty) = problem.difficulty else {
                return false;
            };
            if self.min_difficulty.is_some_and(|min| difficulty < min)
                || self.max_difficulty.is_some_and(|max| difficulty > max)
            {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            if !problem.name.to_lowercase().contains(&needle)
                && !problem.identifier.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRow {
    pub identifier: String,
    pub name: String,
    pub source: Source,
    pub kind: Option<ProblemType>,
    pub difficulty: Option<u32>,
    pub tags: Vec<String>,
    pub url: String,
    pub solved_count: u32,
    pub added_on: DateTime<Utc>,
    pub submitter: Submitter,
    pub likes: u32,
    pub dislikes: u32,
    pub my_feedback: Option<Feedback>,
}

impl ProblemRow {
    pub(crate) fn new(problem: &Problem, my_feedback: Option<Feedback>) -> Self {
        Self {
            identifier: problem.identifier.clone(),
            name: problem.name.clone(),
            source: problem.source(),
            kind: problem.kind,
            difficulty: problem.difficulty,
            tags: problem.tags.clone(),
            url: problem.source_url.clone(),
            solved_count: problem.solved_count,
            added_on: problem.added_on,
            submitter: problem.submitter.clone(),
            likes: problem.likes,
            dislikes: problem.dislikes,
            my_feedback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogView {
    pub rows: Vec<ProblemRow>,
    /// Problems loaded, before filtering.
    pub total: usize,
    pub input: String,
    /// Submissions and feedback updates still waiting on the store.
    pub pending: usize,
    pub notices: Vec<Notice>,
    pub dirty: bool,
}
