use crate::{scan_references, AppState, Effect, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CatalogLoaded(problems) => {
            state.replace_problems(problems);
            Vec::new()
        }
        Msg::FeedbackRecordRestored(record) => {
            state.restore_feedback(record);
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked { source, details } => {
            let scan = scan_references(source, state.input());
            if scan.recognized.is_empty() && scan.rejected.is_empty() {
                return (state, Vec::new());
            }

            state.clear_notices();
            for rejected in scan.rejected {
                state.push_notice(Notice::NotRecognized(rejected));
            }

            let mut effects = Vec::with_capacity(scan.recognized.len());
            for reference in scan.recognized {
                if state.contains(&reference) {
                    state.push_notice(Notice::AlreadyInCatalog(reference.identifier));
                    continue;
                }
                // Already in flight from an earlier click.
                if !state.begin_submission(&reference.identifier) {
                    continue;
                }
                effects.push(Effect::SubmitProblem {
                    reference,
                    details: details.clone(),
                });
            }
            state.set_input(String::new());
            effects
        }
        Msg::SubmissionFinished { identifier, result } => {
            state.finish_submission(&identifier);
            match result {
                Ok(problem) => {
                    state.push_notice(Notice::Added(problem.identifier.clone()));
                    state.upsert_problem(problem);
                }
                Err(message) => {
                    state.push_notice(Notice::SubmissionFailed {
                        identifier,
                        message,
                    });
                }
            }
            Vec::new()
        }
        Msg::FeedbackClicked {
            identifier,
            feedback,
        } => {
            if state.problem(&identifier).is_none() || !state.begin_feedback(&identifier) {
                return (state, Vec::new());
            }
            let change = state.feedback_record().click(&identifier, feedback);
            state.mark_dirty();
            vec![Effect::PersistFeedback { change }]
        }
        Msg::FeedbackPersisted { problem, change } => {
            state.finish_feedback(&change.identifier);
            state.upsert_problem(problem);
            state.apply_feedback(&change);
            vec![Effect::SaveFeedbackRecord]
        }
        Msg::FeedbackFailed {
            identifier,
            message,
        } => {
            state.finish_feedback(&identifier);
            state.push_notice(Notice::FeedbackFailed {
                identifier,
                message,
            });
            Vec::new()
        }
        Msg::FeedbackRecordNotSaved(message) => {
            state.push_notice(Notice::FeedbackRecordNotSaved(message));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
