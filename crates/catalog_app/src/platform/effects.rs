use std::path::PathBuf;
use std::sync::Arc;

use catalog_core::{AppState, Effect, Msg};
use catalog_engine::{persist_feedback, ProblemStore, SubmissionService, SubmitError};
use catalog_logging::{catalog_error, catalog_info, catalog_warn};
use futures_util::future::join_all;

use super::persistence::save_feedback_record;

/// Carries out effects against the store and the network and reports back
/// with the message each one produced.
pub(crate) struct EffectRunner {
    store: Arc<dyn ProblemStore>,
    submissions: SubmissionService,
    feedback_file: PathBuf,
}

impl EffectRunner {
    pub fn new(
        store: Arc<dyn ProblemStore>,
        submissions: SubmissionService,
        feedback_file: PathBuf,
    ) -> Self {
        Self {
            store,
            submissions,
            feedback_file,
        }
    }

    /// Runs one batch concurrently; messages come back in effect order.
    pub async fn run_all(&self, effects: Vec<Effect>, state: &AppState) -> Vec<Msg> {
        join_all(effects.into_iter().map(|effect| self.run(effect, state))).await
    }

    async fn run(&self, effect: Effect, state: &AppState) -> Msg {
        match effect {
            Effect::SubmitProblem { reference, details } => {
                catalog_info!(
                    "SubmitProblem {} url={}",
                    reference.identifier,
                    reference.canonical_url
                );
                let result = match self.submissions.submit(&reference, &details).await {
                    Ok(problem) => Ok(problem),
                    Err(err) => {
                        match &err {
                            SubmitError::AlreadyExists { .. } => {
                                catalog_info!("{} already in catalog", reference.identifier)
                            }
                            _ => catalog_warn!("Submission of {} failed: {}", reference.identifier, err),
                        }
                        Err(err.to_string())
                    }
                };
                Msg::SubmissionFinished {
                    identifier: reference.identifier,
                    result,
                }
            }
            Effect::PersistFeedback { change } => {
                match persist_feedback(self.store.as_ref(), &change).await {
                    Ok(problem) => Msg::FeedbackPersisted { problem, change },
                    Err(err) => {
                        catalog_warn!("Feedback on {} failed: {}", change.identifier, err);
                        Msg::FeedbackFailed {
                            identifier: change.identifier,
                            message: err.to_string(),
                        }
                    }
                }
            }
            Effect::SaveFeedbackRecord => {
                match save_feedback_record(&self.feedback_file, state.feedback_record()) {
                    Ok(()) => Msg::NoOp,
                    Err(err) => {
                        catalog_error!(
                            "Failed to write feedback record to {:?}: {:#}",
                            self.feedback_file,
                            err
                        );
                        Msg::FeedbackRecordNotSaved(format!(
                            "{}: {:#}",
                            self.feedback_file.display(),
                            err
                        ))
                    }
                }
            }
        }
    }
}
