use catalog_core::{reconcile, Counts, Feedback, FeedbackRecord};

const LIKE: Feedback = Feedback::Like;
const DISLIKE: Feedback = Feedback::Dislike;

#[test]
fn new_like_adds_one() {
    let next = reconcile(Counts::new(5, 2), LIKE, false, None);
    assert_eq!(next, Counts::new(6, 2));
}

#[test]
fn new_dislike_adds_one() {
    let next = reconcile(Counts::new(5, 2), DISLIKE, false, None);
    assert_eq!(next, Counts::new(5, 3));
}

#[test]
fn switching_moves_one_between_counters() {
    assert_eq!(
        reconcile(Counts::new(5, 2), DISLIKE, false, Some(LIKE)),
        Counts::new(4, 3)
    );
    assert_eq!(
        reconcile(Counts::new(5, 2), LIKE, false, Some(DISLIKE)),
        Counts::new(6, 1)
    );
}

#[test]
fn chained_like_then_switch_composes() {
    let liked = reconcile(Counts::new(5, 2), LIKE, false, None);
    assert_eq!(liked, Counts::new(6, 2));
    let switched = reconcile(liked, DISLIKE, false, Some(LIKE));
    assert_eq!(switched, Counts::new(5, 3));
}

#[test]
fn undo_floors_at_zero() {
    assert_eq!(reconcile(Counts::new(0, 4), LIKE, true, Some(LIKE)), Counts::new(0, 4));
    assert_eq!(reconcile(Counts::new(3, 0), DISLIKE, true, None), Counts::new(3, 0));
    assert_eq!(reconcile(Counts::new(3, 1), DISLIKE, true, Some(DISLIKE)), Counts::new(3, 0));
}

#[test]
fn undo_ignores_previous_choice() {
    assert_eq!(
        reconcile(Counts::new(2, 2), LIKE, true, Some(DISLIKE)),
        Counts::new(1, 2)
    );
}

#[test]
fn switch_from_zero_does_not_underflow() {
    assert_eq!(
        reconcile(Counts::new(0, 0), DISLIKE, false, Some(LIKE)),
        Counts::new(0, 1)
    );
    assert_eq!(
        reconcile(Counts::new(0, 0), LIKE, false, Some(DISLIKE)),
        Counts::new(1, 0)
    );
}

#[test]
fn every_call_sequence_stays_non_negative_and_moves_by_one() {
    // Walk every 4-step sequence of (requested, undo, previous) from small
    // starting counts; u32 rules out negatives, so check the step sizes.
    let previous_choices = [None, Some(LIKE), Some(DISLIKE)];
    let mut actions = Vec::new();
    for requested in [LIKE, DISLIKE] {
        for is_undo in [false, true] {
            for previous in previous_choices {
                actions.push((requested, is_undo, previous));
            }
        }
    }

    fn walk(counts: Counts, depth: usize, actions: &[(Feedback, bool, Option<Feedback>)]) {
        if depth == 0 {
            return;
        }
        for &(requested, is_undo, previous) in actions {
            let next = reconcile(counts, requested, is_undo, previous);
            let likes_delta = i64::from(next.likes) - i64::from(counts.likes);
            let dislikes_delta = i64::from(next.dislikes) - i64::from(counts.dislikes);
            assert!(likes_delta.abs() <= 1 && dislikes_delta.abs() <= 1);
            walk(next, depth - 1, actions);
        }
    }

    for likes in 0..2 {
        for dislikes in 0..2 {
            walk(Counts::new(likes, dislikes), 4, &actions);
        }
    }
}

#[test]
fn clicking_the_recorded_choice_undoes_it() {
    let mut record = FeedbackRecord::new();

    let first = record.click("1794E", LIKE);
    assert!(!first.is_undo);
    assert_eq!(first.previous, None);
    assert_eq!(first.next, Some(LIKE));
    record.apply(&first);
    assert_eq!(record.get("1794E"), Some(LIKE));

    let again = record.click("1794E", LIKE);
    assert!(again.is_undo);
    assert_eq!(again.next, None);
    record.apply(&again);
    assert_eq!(record.get("1794E"), None);
    assert!(record.is_empty());
}

#[test]
fn switching_sides_is_not_an_undo() {
    let mut record = FeedbackRecord::new();
    let disliked = record.click("hello", DISLIKE);
    record.apply(&disliked);

    let change = record.click("hello", LIKE);
    assert!(!change.is_undo);
    assert_eq!(change.previous, Some(DISLIKE));
    assert_eq!(change.apply_to(Counts::new(1, 1)), Counts::new(2, 0));
    record.apply(&change);
    assert_eq!(record.get("hello"), Some(LIKE));
    assert_eq!(record.len(), 1);
}
