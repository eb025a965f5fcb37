//! Catalog engine: storage, page fetching and the services behind effects.
mod codeforces;
mod decode;
mod extract;
mod feedback;
mod fetch;
mod kattis;
mod memory;
mod persist;
mod record;
mod seed;
mod sqlite;
mod store;
mod submit;
mod types;

pub use codeforces::{ApiError, CodeforcesApi, ProblemMeta, DEFAULT_CODEFORCES_API};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use extract::{KattisPage, KattisPageExtractor, PageExtractor};
pub use feedback::persist_feedback;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use kattis::{KattisClient, KattisError, DEFAULT_KATTIS_BASE};
pub use memory::MemoryStore;
pub use persist::{ensure_dir, write_atomic, PersistError};
pub use record::ProblemRecord;
pub use seed::{BuiltinSeed, EmptySeed, FixedSeed, SeedProvider};
pub use sqlite::SqliteStore;
pub use store::{ProblemStore, StoreError};
pub use submit::{Clock, SubmissionService, SubmitError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
