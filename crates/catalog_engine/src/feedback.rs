use catalog_core::{FeedbackChange, Problem};
use catalog_logging::catalog_info;

use crate::{ProblemStore, StoreError};

/// Reads the stored counters, reconciles them with `change` and writes the
/// result back. Two viewers racing on one problem can still lose an update.
pub async fn persist_feedback(
    store: &dyn ProblemStore,
    change: &FeedbackChange,
) -> Result<Problem, StoreError> {
    let current = store
        .get(&change.identifier)
        .await?
        .ok_or_else(|| StoreError::NotFound(change.identifier.clone()))?;
    let counts = change.apply_to(current.counts());
    catalog_info!(
        "{} {}{}: likes {} -> {}, dislikes {} -> {}",
        change.identifier,
        if change.is_undo { "undo " } else { "" },
        change.requested.as_str(),
        current.likes,
        counts.likes,
        current.dislikes,
        counts.dislikes
    );
    store.update_counts(&change.identifier, counts).await
}
