use catalog_core::Problem;

use crate::{ProblemRecord, StoreError};

const BUILTIN_SEED_JSON: &str = include_str!("../data/seed_problems.json");

/// Supplies the starting catalog for a store.
pub trait SeedProvider: Send + Sync {
    fn problems(&self) -> Result<Vec<Problem>, StoreError>;
}

/// The curated starter list shipped with the crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSeed;

impl SeedProvider for BuiltinSeed {
    fn problems(&self) -> Result<Vec<Problem>, StoreError> {
        let records: Vec<ProblemRecord> = serde_json::from_str(BUILTIN_SEED_JSON)
            .map_err(|err| StoreError::Backend(format!("builtin seed: {err}")))?;
        records.into_iter().map(ProblemRecord::into_problem).collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySeed;

impl SeedProvider for EmptySeed {
    fn problems(&self) -> Result<Vec<Problem>, StoreError> {
        Ok(Vec::new())
    }
}

/// Seeds a fixed list, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct FixedSeed(pub Vec<Problem>);

impl SeedProvider for FixedSeed {
    fn problems(&self) -> Result<Vec<Problem>, StoreError> {
        Ok(self.0.clone())
    }
}
