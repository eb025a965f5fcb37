use std::sync::Arc;

use catalog_core::{
    map_kattis_difficulty, normalize_tags, title_from_slug, Problem, ProblemRef, Source,
    SubmissionDetails, Submitter,
};
use catalog_logging::{catalog_info, catalog_warn};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{ApiError, CodeforcesApi, Fetcher, KattisClient, ProblemStore, StoreError};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Problem already exists in database: {url}")]
    AlreadyExists { url: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Turns a recognized reference into a stored catalog entry.
pub struct SubmissionService {
    store: Arc<dyn ProblemStore>,
    codeforces: CodeforcesApi,
    kattis: KattisClient,
    clock: Clock,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn ProblemStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            store,
            codeforces: CodeforcesApi::new(fetcher.clone()),
            kattis: KattisClient::new(fetcher),
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_codeforces(mut self, codeforces: CodeforcesApi) -> Self {
        self.codeforces = codeforces;
        self
    }

    pub fn with_kattis(mut self, kattis: KattisClient) -> Self {
        self.kattis = kattis;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Checks the catalog, gathers metadata and inserts the problem.
    pub async fn submit(
        &self,
        reference: &ProblemRef,
        details: &SubmissionDetails,
    ) -> Result<Problem, SubmitError> {
        if self.store.exists_by_url(&reference.canonical_url).await? {
            return Err(SubmitError::AlreadyExists {
                url: reference.canonical_url.clone(),
            });
        }

        let problem = match reference.source {
            Source::Codeforces => self.build_codeforces(reference, details).await?,
            Source::Kattis => self.build_kattis(reference, details).await,
        };

        match self.store.insert(&problem).await {
            Ok(identifier) => {
                catalog_info!("added {} ({})", identifier, problem.source_url);
                Ok(problem)
            }
            // Lost a race with another submitter between the check and the insert.
            Err(StoreError::DuplicateUrl { url }) => Err(SubmitError::AlreadyExists { url }),
            Err(err) => Err(err.into()),
        }
    }

    async fn build_codeforces(
        &self,
        reference: &ProblemRef,
        details: &SubmissionDetails,
    ) -> Result<Problem, SubmitError> {
        let meta = self.codeforces.problem_meta(reference).await?;
        let difficulty = meta
            .rating
            .or_else(|| details.estimated_difficulty.map(map_kattis_difficulty));
        let tags = normalize_tags(meta.tags.iter().chain(details.tags.iter()));
        Ok(self.new_problem(reference, details, meta.name, tags, difficulty))
    }

    /// Never fails: an unreachable page falls back to a name built from the
    /// slug and the submitter's own estimate.
    async fn build_kattis(&self, reference: &ProblemRef, details: &SubmissionDetails) -> Problem {
        let page = match self.kattis.page(reference).await {
            Ok(page) => Some(page),
            Err(err) => {
                catalog_warn!("kattis page for {} unavailable: {}", reference.identifier, err);
                None
            }
        };
        let name = page
            .as_ref()
            .and_then(|page| page.title.clone())
            .unwrap_or_else(|| title_from_slug(&reference.index));
        let difficulty = page
            .as_ref()
            .and_then(|page| page.rating)
            .or(details.estimated_difficulty)
            .map(map_kattis_difficulty);
        let tags = normalize_tags(&details.tags);
        self.new_problem(reference, details, name, tags, difficulty)
    }

    fn new_problem(
        &self,
        reference: &ProblemRef,
        details: &SubmissionDetails,
        name: String,
        tags: Vec<String>,
        difficulty: Option<u32>,
    ) -> Problem {
        Problem {
            identifier: reference.identifier.clone(),
            name,
            tags,
            difficulty,
            source_url: reference.canonical_url.clone(),
            solved_count: 0,
            added_on: (self.clock)(),
            submitter: Submitter::for_handle(reference.source, &details.submitter),
            likes: 0,
            dislikes: 0,
            kind: details.kind,
        }
    }
}
