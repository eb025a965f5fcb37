use std::fmt::Write;

use catalog_core::{CatalogView, Feedback, Notice, Problem, ProblemRef, ProblemRow, ReferenceScan};

pub(crate) fn catalog_table(view: &CatalogView) -> String {
    let mut out = String::new();
    if view.rows.is_empty() {
        let _ = writeln!(out, "No problems match ({} in catalog).", view.total);
        return out;
    }
    let _ = writeln!(
        out,
        "{:<12} {:<40} {:<8} {:>5} {:>9} {:>3}  {}",
        "ID", "NAME", "TYPE", "DIFF", "+/-", "", "TAGS"
    );
    for row in &view.rows {
        let _ = writeln!(out, "{}", table_line(row));
    }
    let _ = writeln!(out, "{} of {} problems", view.rows.len(), view.total);
    out
}

fn table_line(row: &ProblemRow) -> String {
    format!(
        "{:<12} {:<40} {:<8} {:>5} {:>9} {:>3}  {}",
        row.identifier,
        truncate(&row.name, 40),
        row.kind.map_or("-", |kind| kind.as_str()),
        difficulty_label(row.difficulty),
        format!("+{}/-{}", row.likes, row.dislikes),
        feedback_marker(row.my_feedback),
        row.tags.join(", ")
    )
}

pub(crate) fn problem_details(problem: &Problem, mine: Option<Feedback>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", problem.identifier, problem.name);
    let _ = writeln!(out, "  source:     {} ({})", problem.source(), problem.source_url);
    let _ = writeln!(out, "  difficulty: {}", difficulty_label(problem.difficulty));
    if let Some(kind) = problem.kind {
        let _ = writeln!(out, "  type:       {kind}");
    }
    if !problem.tags.is_empty() {
        let _ = writeln!(out, "  tags:       {}", problem.tags.join(", "));
    }
    let _ = writeln!(out, "  solved by:  {}", problem.solved_count);
    let _ = writeln!(
        out,
        "  added:      {} by {} ({})",
        problem.added_on.format("%Y-%m-%d"),
        problem.submitter.name,
        problem.submitter.profile_url
    );
    let _ = write!(out, "  feedback:   +{} / -{}", problem.likes, problem.dislikes);
    if let Some(feedback) = mine {
        let _ = write!(out, " (you: {})", feedback.as_str());
    }
    out.push('\n');
    out
}

pub(crate) fn notice_line(notice: &Notice) -> String {
    match notice {
        Notice::NotRecognized(text) => format!("not recognized: {text}"),
        Notice::AlreadyInCatalog(identifier) => format!("already in catalog: {identifier}"),
        Notice::Added(identifier) => format!("added: {identifier}"),
        Notice::SubmissionFailed {
            identifier,
            message,
        } => format!("could not add {identifier}: {message}"),
        Notice::FeedbackFailed {
            identifier,
            message,
        } => format!("could not record feedback on {identifier}: {message}"),
        Notice::FeedbackRecordNotSaved(message) => {
            format!("feedback counted but not saved locally: {message}")
        }
    }
}

pub(crate) fn scan_report(scan: &ReferenceScan) -> String {
    let mut out = String::new();
    for reference in &scan.recognized {
        let _ = writeln!(out, "{}", reference_line(reference));
    }
    for rejected in &scan.rejected {
        let _ = writeln!(out, "not recognized: {rejected}");
    }
    out
}

fn reference_line(reference: &ProblemRef) -> String {
    format!("{:<12} {}", reference.identifier, reference.canonical_url)
}

fn difficulty_label(difficulty: Option<u32>) -> String {
    difficulty.map_or_else(|| "-".to_string(), |d| d.to_string())
}

fn feedback_marker(feedback: Option<Feedback>) -> &'static str {
    match feedback {
        Some(Feedback::Like) => "+",
        Some(Feedback::Dislike) => "-",
        None => "",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
