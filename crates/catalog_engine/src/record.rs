use catalog_core::{normalize_tags, Problem, ProblemType, Submitter};
use catalog_logging::catalog_warn;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Row shape of the `problems` table. Column names are the field names.
///
/// This is the only place where storage rows and [`Problem`] meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<u32>,
    pub url: String,
    #[serde(default)]
    pub solved: u32,
    pub date_added: String,
    pub added_by: String,
    pub added_by_url: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default, rename = "type")]
    pub problem_type: Option<String>,
}

impl ProblemRecord {
    pub fn from_problem(problem: &Problem) -> Self {
        Self {
            identifier: problem.identifier.clone(),
            name: problem.name.clone(),
            tags: normalize_tags(&problem.tags),
            difficulty: problem.difficulty,
            url: problem.source_url.clone(),
            solved: problem.solved_count,
            date_added: problem.added_on.to_rfc3339(),
            added_by: problem.submitter.name.clone(),
            added_by_url: problem.submitter.profile_url.clone(),
            likes: problem.likes,
            dislikes: problem.dislikes,
            problem_type: problem.kind.map(|kind| kind.as_str().to_string()),
        }
    }

    pub fn into_problem(self) -> Result<Problem, StoreError> {
        let added_on = parse_date_added(&self.date_added).ok_or_else(|| StoreError::CorruptRow {
            identifier: self.identifier.clone(),
            reason: format!("bad date_added {:?}", self.date_added),
        })?;
        let kind = self
            .problem_type
            .as_deref()
            .map(|label| parse_problem_type(&self.identifier, label));
        Ok(Problem {
            identifier: self.identifier,
            name: self.name,
            tags: normalize_tags(self.tags),
            difficulty: self.difficulty,
            source_url: self.url,
            solved_count: self.solved,
            added_on,
            submitter: Submitter {
                name: self.added_by,
                profile_url: self.added_by_url,
            },
            likes: self.likes,
            dislikes: self.dislikes,
            kind,
        })
    }
}

/// Labels outside the known set are filed under misc rather than failing
/// the whole row.
fn parse_problem_type(identifier: &str, label: &str) -> ProblemType {
    label.parse().unwrap_or_else(|err| {
        catalog_warn!("{}: {}, treating as misc", identifier, err);
        ProblemType::Misc
    })
}

/// Accepts full RFC 3339 timestamps and the bare dates older rows carry.
fn parse_date_added(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> ProblemRecord {
        ProblemRecord {
            identifier: "1442B".to_string(),
            name: "Identify the Operations".to_string(),
            tags: vec!["greedy".to_string(), "dsu".to_string(), "greedy".to_string()],
            difficulty: Some(1900),
            url: "https://codeforces.com/contest/1442/problem/B".to_string(),
            solved: 2356,
            date_added: "2024-01-25".to_string(),
            added_by: "camc".to_string(),
            added_by_url: "https://codeforces.com/profile/camc".to_string(),
            likes: 156,
            dislikes: 8,
            problem_type: None,
        }
    }

    #[test]
    fn row_maps_to_problem() {
        let problem = record().into_problem().unwrap();
        assert_eq!(problem.source_url, "https://codeforces.com/contest/1442/problem/B");
        assert_eq!(problem.solved_count, 2356);
        assert_eq!(problem.submitter.name, "camc");
        assert_eq!(problem.tags, vec!["dsu", "greedy"]);
        assert_eq!(
            problem.added_on,
            Utc.with_ymd_and_hms(2024, 1, 25, 0, 0, 0).unwrap()
        );
        assert_eq!((problem.likes, problem.dislikes), (156, 8));
    }

    #[test]
    fn problem_maps_back_with_rfc3339_date() {
        let problem = record().into_problem().unwrap();
        let row = ProblemRecord::from_problem(&problem);
        assert_eq!(row.date_added, "2024-01-25T00:00:00+00:00");
        assert_eq!(row.into_problem().unwrap(), problem);
    }

    #[test]
    fn unreadable_date_is_reported() {
        let mut row = record();
        row.date_added = "yesterday".to_string();
        assert!(matches!(
            row.into_problem(),
            Err(StoreError::CorruptRow { identifier, .. }) if identifier == "1442B"
        ));
    }

    #[test]
    fn problem_type_label_maps_both_ways() {
        let mut row = record();
        row.problem_type = Some("graph".to_string());
        let problem = row.into_problem().unwrap();
        assert_eq!(problem.kind, Some(ProblemType::Graph));
        assert_eq!(
            ProblemRecord::from_problem(&problem).problem_type.as_deref(),
            Some("graph")
        );

        let mut row = record();
        row.problem_type = Some("dynamic programming".to_string());
        assert_eq!(row.into_problem().unwrap().kind, Some(ProblemType::Misc));
    }

    #[test]
    fn json_uses_column_names() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["added_by_url"], "https://codeforces.com/profile/camc");
        assert_eq!(json["date_added"], "2024-01-25");
        assert!(json["type"].is_null());
    }
}
