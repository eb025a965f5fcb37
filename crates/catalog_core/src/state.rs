use std::collections::BTreeSet;

use crate::view_model::{CatalogFilter, CatalogView, ProblemRow};
use crate::{FeedbackChange, FeedbackRecord, Problem, ProblemRef};

/// User-facing outcome of the last actions, newest last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NotRecognized(String),
    AlreadyInCatalog(String),
    Added(String),
    SubmissionFailed { identifier: String, message: String },
    FeedbackFailed { identifier: String, message: String },
    FeedbackRecordNotSaved(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    problems: Vec<Problem>,
    feedback: FeedbackRecord,
    input: String,
    pending_submissions: BTreeSet<String>,
    pending_feedback: BTreeSet<String>,
    notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, filter: &CatalogFilter) -> CatalogView {
        let mut rows: Vec<ProblemRow> = self
            .problems
            .iter()
            .filter(|problem| filter.matches(problem))
            .map(|problem| ProblemRow::new(problem, self.feedback.get(&problem.identifier)))
            .collect();
        filter.sort.apply(&mut rows);

        CatalogView {
            rows,
            total: self.problems.len(),
            input: self.input.clone(),
            pending: self.pending_submissions.len() + self.pending_feedback.len(),
            notices: self.notices.clone(),
            dirty: self.dirty,
        }
    }

    pub fn problem(&self, identifier: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.identifier == identifier)
    }

    pub fn feedback_record(&self) -> &FeedbackRecord {
        &self.feedback
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_problems(&mut self, problems: Vec<Problem>) {
        self.problems = problems;
        self.mark_dirty();
    }

    pub(crate) fn restore_feedback(&mut self, record: FeedbackRecord) {
        self.feedback = record;
        self.mark_dirty();
    }

    /// True when the catalog already holds the problem under its identifier
    /// or its canonical URL.
    pub(crate) fn contains(&self, reference: &ProblemRef) -> bool {
        self.problems.iter().any(|p| {
            p.identifier == reference.identifier || p.source_url == reference.canonical_url
        })
    }

    pub(crate) fn begin_submission(&mut self, identifier: &str) -> bool {
        self.pending_submissions.insert(identifier.to_string())
    }

    pub(crate) fn finish_submission(&mut self, identifier: &str) {
        self.pending_submissions.remove(identifier);
    }

    pub(crate) fn begin_feedback(&mut self, identifier: &str) -> bool {
        self.pending_feedback.insert(identifier.to_string())
    }

    pub(crate) fn finish_feedback(&mut self, identifier: &str) {
        self.pending_feedback.remove(identifier);
    }

    pub(crate) fn upsert_problem(&mut self, problem: Problem) {
        match self
            .problems
            .iter_mut()
            .find(|p| p.identifier == problem.identifier)
        {
            Some(existing) => *existing = problem,
            None => self.problems.push(problem),
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_feedback(&mut self, change: &FeedbackChange) {
        self.feedback.apply(change);
        self.mark_dirty();
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        self.mark_dirty();
    }

    pub(crate) fn clear_notices(&mut self) {
        if !self.notices.is_empty() {
            self.notices.clear();
            self.mark_dirty();
        }
    }
}
