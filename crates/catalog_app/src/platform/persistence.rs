use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use catalog_core::{Feedback, FeedbackRecord};
use catalog_engine::write_atomic;
use catalog_logging::{catalog_info, catalog_warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PersistedVote {
    Like,
    Dislike,
}

impl From<Feedback> for PersistedVote {
    fn from(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Like => PersistedVote::Like,
            Feedback::Dislike => PersistedVote::Dislike,
        }
    }
}

impl From<PersistedVote> for Feedback {
    fn from(vote: PersistedVote) -> Self {
        match vote {
            PersistedVote::Like => Feedback::Like,
            PersistedVote::Dislike => Feedback::Dislike,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedFeedback {
    votes: BTreeMap<String, PersistedVote>,
}

/// Reads this viewer's likes and dislikes. Anything unreadable starts fresh.
pub(crate) fn load_feedback_record(path: &Path) -> FeedbackRecord {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return FeedbackRecord::new();
        }
        Err(err) => {
            catalog_warn!("Failed to read feedback record from {:?}: {}", path, err);
            return FeedbackRecord::new();
        }
    };

    let persisted: PersistedFeedback = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            catalog_warn!("Failed to parse feedback record from {:?}: {}", path, err);
            return FeedbackRecord::new();
        }
    };

    let record: FeedbackRecord = persisted
        .votes
        .into_iter()
        .map(|(identifier, vote)| (identifier, Feedback::from(vote)))
        .collect();
    catalog_info!("Loaded {} feedback entries from {:?}", record.len(), path);
    record
}

pub(crate) fn save_feedback_record(path: &Path, record: &FeedbackRecord) -> anyhow::Result<()> {
    let persisted = PersistedFeedback {
        votes: record
            .iter()
            .map(|(identifier, feedback)| (identifier.to_string(), PersistedVote::from(feedback)))
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&persisted, pretty)?;
    write_atomic(path, &content)?;
    Ok(())
}
