use std::sync::Mutex;

use catalog_core::{Counts, Problem};
use catalog_logging::catalog_debug;

use crate::{ProblemStore, SeedProvider, StoreError};

/// Keeps the catalog in process memory. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    problems: Mutex<Vec<Problem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: &dyn SeedProvider) -> Result<Self, StoreError> {
        let store = Self::new();
        {
            let mut problems = store.lock()?;
            for problem in seed.problems()? {
                if check_unique(&problems, &problem).is_ok() {
                    problems.push(problem);
                }
            }
        }
        Ok(store)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Problem>>, StoreError> {
        self.problems
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

fn check_unique(problems: &[Problem], candidate: &Problem) -> Result<(), StoreError> {
    if problems.iter().any(|p| p.source_url == candidate.source_url) {
        return Err(StoreError::DuplicateUrl {
            url: candidate.source_url.clone(),
        });
    }
    if problems.iter().any(|p| p.identifier == candidate.identifier) {
        return Err(StoreError::DuplicateIdentifier(candidate.identifier.clone()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl ProblemStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Problem>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn get(&self, identifier: &str) -> Result<Option<Problem>, StoreError> {
        Ok(self
            .lock()?
            .iter()
            .find(|p| p.identifier == identifier)
            .cloned())
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.iter().any(|p| p.source_url == url))
    }

    async fn insert(&self, problem: &Problem) -> Result<String, StoreError> {
        let mut problems = self.lock()?;
        check_unique(&problems, problem)?;
        problems.push(problem.clone());
        catalog_debug!("memory store: inserted {}", problem.identifier);
        Ok(problem.identifier.clone())
    }

    async fn update_counts(
        &self,
        identifier: &str,
        counts: Counts,
    ) -> Result<Problem, StoreError> {
        let mut problems = self.lock()?;
        let problem = problems
            .iter_mut()
            .find(|p| p.identifier == identifier)
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))?;
        problem.likes = counts.likes;
        problem.dislikes = counts.dislikes;
        Ok(problem.clone())
    }
}
