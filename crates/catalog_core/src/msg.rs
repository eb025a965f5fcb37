use crate::{Feedback, FeedbackChange, FeedbackRecord, Problem, Source, SubmissionDetails};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The store returned the current catalog.
    CatalogLoaded(Vec<Problem>),
    /// Restore the viewer's likes and dislikes from local storage.
    FeedbackRecordRestored(FeedbackRecord),
    /// User edited the reference input box.
    InputChanged(String),
    /// User submitted the current input as references on `source`.
    SubmitClicked {
        source: Source,
        details: SubmissionDetails,
    },
    /// A submission finished; `Err` carries a message for the user.
    SubmissionFinished {
        identifier: String,
        result: Result<Problem, String>,
    },
    /// User clicked like or dislike on a problem.
    FeedbackClicked {
        identifier: String,
        feedback: Feedback,
    },
    /// The store accepted new counters.
    FeedbackPersisted {
        problem: Problem,
        change: FeedbackChange,
    },
    FeedbackFailed {
        identifier: String,
        message: String,
    },
    /// Writing the local feedback record failed; the store already holds the
    /// new counters.
    FeedbackRecordNotSaved(String),
    NoOp,
}
