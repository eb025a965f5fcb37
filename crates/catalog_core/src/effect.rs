use crate::{FeedbackChange, ProblemRef, ProblemType};

/// What the submitter typed next to the references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionDetails {
    pub submitter: String,
    /// Kattis-style 1.0..=10.0 estimate, used when the page has no rating.
    pub estimated_difficulty: Option<f64>,
    pub tags: Vec<String>,
    pub kind: Option<ProblemType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubmitProblem {
        reference: ProblemRef,
        details: SubmissionDetails,
    },
    PersistFeedback {
        change: FeedbackChange,
    },
    SaveFeedbackRecord,
}
