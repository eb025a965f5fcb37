use std::sync::Arc;

use catalog_core::ProblemRef;
use catalog_logging::catalog_debug;
use serde::Deserialize;
use thiserror::Error;

use crate::{FetchError, Fetcher};

pub const DEFAULT_CODEFORCES_API: &str = "https://codeforces.com/api";

/// What the Codeforces API tells us about one problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemMeta {
    pub name: String,
    pub tags: Vec<String>,
    pub rating: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("codeforces request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("unexpected codeforces response: {0}")]
    Malformed(String),
    #[error("codeforces rejected the request: {0}")]
    Rejected(String),
    #[error("problem {index} not found in contest {contest_id}")]
    MissingProblem { contest_id: String, index: String },
    #[error("{0} is not a codeforces reference")]
    NotCodeforces(String),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Standings {
    problems: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
struct ApiProblem {
    index: String,
    name: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    rating: Option<u32>,
}

pub struct CodeforcesApi {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
}

impl CodeforcesApi {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_CODEFORCES_API.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn standings_url(&self, contest_id: &str, gym: bool) -> Result<String, ApiError> {
        let mut url = url::Url::parse(&format!("{}/contest.standings", self.base_url))
            .map_err(|err| ApiError::Malformed(format!("api base url: {err}")))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("contestId", contest_id)
                .append_pair("from", "1")
                .append_pair("count", "1");
            if gym {
                query.append_pair("gym", "true");
            }
        }
        Ok(url.into())
    }

    /// Looks the problem up in its contest's standings, which list every
    /// problem of the contest. Gym contests often hide theirs; those get a
    /// placeholder name.
    pub async fn problem_meta(&self, reference: &ProblemRef) -> Result<ProblemMeta, ApiError> {
        let contest_id = reference
            .contest_id
            .as_deref()
            .ok_or_else(|| ApiError::NotCodeforces(reference.identifier.clone()))?;
        let url = self.standings_url(contest_id, reference.gym)?;
        catalog_debug!("codeforces standings lookup for {}", reference.identifier);

        let output = self.fetcher.fetch(&url).await?;
        let envelope: Envelope<Standings> = serde_json::from_slice(&output.bytes)
            .map_err(|err| ApiError::Malformed(err.to_string()))?;
        if envelope.status != "OK" {
            return Err(ApiError::Rejected(
                envelope
                    .comment
                    .unwrap_or_else(|| format!("status {}", envelope.status)),
            ));
        }
        let standings = envelope
            .result
            .ok_or_else(|| ApiError::Malformed("missing result".to_string()))?;

        match standings
            .problems
            .into_iter()
            .find(|p| p.index == reference.index)
        {
            Some(problem) => Ok(ProblemMeta {
                name: problem.name,
                tags: problem.tags,
                rating: problem.rating,
            }),
            None if reference.gym => Ok(ProblemMeta {
                name: format!(
                    "Problem {} from Gym Contest {}",
                    reference.index, contest_id
                ),
                tags: vec!["gym".to_string()],
                rating: None,
            }),
            None => Err(ApiError::MissingProblem {
                contest_id: contest_id.to_string(),
                index: reference.index.clone(),
            }),
        }
    }
}
