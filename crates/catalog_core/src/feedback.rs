use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Like,
    Dislike,
}

impl Feedback {
    pub fn as_str(self) -> &'static str {
        match self {
            Feedback::Like => "like",
            Feedback::Dislike => "dislike",
        }
    }
}

/// Like and dislike counters of one problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub likes: u32,
    pub dislikes: u32,
}

impl Counts {
    pub fn new(likes: u32, dislikes: u32) -> Self {
        Self { likes, dislikes }
    }
}

/// Computes the counters after one feedback action.
///
/// Undo takes one away from the requested counter. Switching sides moves one
/// from the old counter to the new one. Anything else adds one to the
/// requested counter. Decrements stop at zero.
pub fn reconcile(
    current: Counts,
    requested: Feedback,
    is_undo: bool,
    previous: Option<Feedback>,
) -> Counts {
    let Counts { likes, dislikes } = current;
    match (is_undo, previous, requested) {
        (true, _, Feedback::Like) => Counts::new(likes.saturating_sub(1), dislikes),
        (true, _, Feedback::Dislike) => Counts::new(likes, dislikes.saturating_sub(1)),
        (false, Some(Feedback::Like), Feedback::Dislike) => {
            Counts::new(likes.saturating_sub(1), dislikes.saturating_add(1))
        }
        (false, Some(Feedback::Dislike), Feedback::Like) => {
            Counts::new(likes.saturating_add(1), dislikes.saturating_sub(1))
        }
        (false, _, Feedback::Like) => Counts::new(likes.saturating_add(1), dislikes),
        (false, _, Feedback::Dislike) => Counts::new(likes, dislikes.saturating_add(1)),
    }
}

/// One viewer action on one problem, with everything needed to reconcile the
/// stored counters and then update the local record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackChange {
    pub identifier: String,
    pub requested: Feedback,
    pub is_undo: bool,
    pub previous: Option<Feedback>,
    /// What the local record holds once the change is persisted.
    pub next: Option<Feedback>,
}

impl FeedbackChange {
    pub fn apply_to(&self, current: Counts) -> Counts {
        reconcile(current, self.requested, self.is_undo, self.previous)
    }
}

/// The viewer's own likes and dislikes, keyed by problem identifier.
///
/// Only used to derive deltas; the stored counters stay authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackRecord {
    entries: BTreeMap<String, Feedback>,
}

impl FeedbackRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &str) -> Option<Feedback> {
        self.entries.get(identifier).copied()
    }

    /// Describes what a click on `requested` means given the recorded state.
    /// Clicking the choice already on record undoes it.
    pub fn click(&self, identifier: &str, requested: Feedback) -> FeedbackChange {
        let previous = self.get(identifier);
        let is_undo = previous == Some(requested);
        FeedbackChange {
            identifier: identifier.to_string(),
            requested,
            is_undo,
            previous,
            next: if is_undo { None } else { Some(requested) },
        }
    }

    pub fn apply(&mut self, change: &FeedbackChange) {
        match change.next {
            Some(feedback) => {
                self.entries.insert(change.identifier.clone(), feedback);
            }
            None => {
                self.entries.remove(&change.identifier);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Feedback)> {
        self.entries.iter().map(|(id, feedback)| (id.as_str(), *feedback))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Feedback)> for FeedbackRecord {
    fn from_iter<T: IntoIterator<Item = (String, Feedback)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
