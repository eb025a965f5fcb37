//! Recognition of free-form problem references.
//!
//! A reference is whatever a user pastes to name a problem: a shorthand
//! code such as `CF 1794E`, a full URL on one of the known hosts, or a bare
//! Kattis slug. Recognized references are rebuilt into one canonical URL per
//! problem, so two spellings of the same problem always compare equal.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::Source;

static CF_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^CF\s*([0-9]+)([A-Z0-9]+)$").expect("valid regex"));
static GYM_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^GYM\s*([0-9]+)([A-Z0-9]+)$").expect("valid regex"));
static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://)?(?:www\.)?").expect("valid regex"));
static CF_CONTEST_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:mirror\.)?codeforces\.com/contest/([0-9]+)/problem/([A-Z0-9]+)")
        .expect("valid regex")
});
static CF_PROBLEMSET_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:mirror\.)?codeforces\.com/problemset/problem/([0-9]+)/([A-Z0-9]+)")
        .expect("valid regex")
});
static CF_GYM_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:mirror\.)?codeforces\.com/gym/([0-9]+)/problem/([A-Z0-9]+)")
        .expect("valid regex")
});
static KATTIS_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").expect("valid regex"));
static KATTIS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:open\.)?kattis\.com/problems/([a-z0-9]+)").expect("valid regex")
});

/// A recognized problem reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemRef {
    pub source: Source,
    /// Contest number on Codeforces; Kattis has none.
    pub contest_id: Option<String>,
    /// Problem index within the contest, or the Kattis slug.
    pub index: String,
    pub identifier: String,
    pub canonical_url: String,
    /// Codeforces gym (training) problem rather than a regular contest one.
    pub gym: bool,
}

impl ProblemRef {
    fn codeforces(contest_id: &str, index: &str, gym: bool) -> Self {
        let (prefix, section) = if gym { ("G", "gym") } else { ("", "contest") };
        Self {
            source: Source::Codeforces,
            contest_id: Some(contest_id.to_string()),
            index: index.to_string(),
            identifier: format!("{prefix}{contest_id}{index}"),
            canonical_url: format!("https://codeforces.com/{section}/{contest_id}/problem/{index}"),
            gym,
        }
    }

    fn kattis(slug: &str) -> Self {
        Self {
            source: Source::Kattis,
            contest_id: None,
            index: slug.to_string(),
            identifier: slug.to_string(),
            canonical_url: format!("https://open.kattis.com/problems/{slug}"),
            gym: false,
        }
    }
}

/// Recognizes a Codeforces reference.
///
/// Shorthand codes win over URLs. Shorthand indices are upper-cased so that
/// `cf 1794e` and `CF 1794E` land on the same problem.
pub fn parse_codeforces(input: &str) -> Option<ProblemRef> {
    let text = input.trim();

    if let Some(caps) = CF_SHORTHAND.captures(text) {
        return Some(ProblemRef::codeforces(
            &caps[1],
            &caps[2].to_ascii_uppercase(),
            false,
        ));
    }
    if let Some(caps) = GYM_SHORTHAND.captures(text) {
        return Some(ProblemRef::codeforces(
            &caps[1],
            &caps[2].to_ascii_uppercase(),
            true,
        ));
    }

    let stripped = SCHEME_PREFIX.replace(text, "");
    let shapes: [(&Regex, bool); 3] = [
        (&*CF_CONTEST_PATH, false),
        (&*CF_PROBLEMSET_PATH, false),
        (&*CF_GYM_PATH, true),
    ];
    shapes.iter().find_map(|(pattern, gym)| {
        pattern
            .captures(&stripped)
            .map(|caps| ProblemRef::codeforces(&caps[1], &caps[2], *gym))
    })
}

/// Recognizes a Kattis reference: a bare lowercase slug or a problems URL.
pub fn parse_kattis(input: &str) -> Option<ProblemRef> {
    let text = input.trim();
    if KATTIS_SLUG.is_match(text) {
        return Some(ProblemRef::kattis(text));
    }
    let stripped = SCHEME_PREFIX.replace(text, "");
    KATTIS_PATH
        .captures(&stripped)
        .map(|caps| ProblemRef::kattis(&caps[1]))
}

pub fn parse_reference(source: Source, input: &str) -> Option<ProblemRef> {
    match source {
        Source::Codeforces => parse_codeforces(input),
        Source::Kattis => parse_kattis(input),
    }
}

/// Outcome of scanning pasted text for references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceScan {
    /// Recognized references in input order, first occurrence of each problem.
    pub recognized: Vec<ProblemRef>,
    /// Pieces of input that named no problem.
    pub rejected: Vec<String>,
}

/// Scans pasted text token by token. Two adjacent tokens that name nothing
/// on their own are retried together, which is how `CF 1794E` survives the
/// split.
pub fn scan_references(source: Source, text: &str) -> ReferenceScan {
    let mut scan = ReferenceScan::default();
    let mut seen = HashSet::new();
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let (found, consumed) = match parse_reference(source, token) {
            Some(reference) => (Some(reference), 1),
            None => match tokens.get(i + 1) {
                Some(next) if parse_reference(source, next).is_none() => {
                    match parse_reference(source, &format!("{token} {next}")) {
                        Some(reference) => (Some(reference), 2),
                        None => (None, 1),
                    }
                }
                _ => (None, 1),
            },
        };
        match found {
            Some(reference) => {
                if seen.insert(reference.identifier.clone()) {
                    scan.recognized.push(reference);
                }
            }
            None => scan.rejected.push(token.to_string()),
        }
        i += consumed;
    }
    scan
}
