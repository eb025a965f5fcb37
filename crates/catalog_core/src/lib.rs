//! Catalog core: problem entity, reference parsing, feedback reconciliation
//! and the pure state machine driving the front end.
mod effect;
mod feedback;
mod msg;
mod problem;
mod reference;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, SubmissionDetails};
pub use feedback::{reconcile, Counts, Feedback, FeedbackChange, FeedbackRecord};
pub use msg::Msg;
pub use problem::{
    map_kattis_difficulty, normalize_tags, title_from_slug, Problem, ProblemType, Source,
    Submitter, UnknownProblemType, UnknownSource, MAX_DIFFICULTY, MIN_DIFFICULTY,
};
pub use reference::{
    parse_codeforces, parse_kattis, parse_reference, scan_references, ProblemRef, ReferenceScan,
};
pub use state::{AppState, Notice};
pub use update::update;
pub use view_model::{CatalogFilter, CatalogView, ProblemRow, SortOrder};
