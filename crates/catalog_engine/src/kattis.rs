use std::sync::Arc;

use catalog_core::ProblemRef;
use thiserror::Error;

use crate::{decode_page, DecodeError, FetchError, Fetcher, KattisPage, KattisPageExtractor, PageExtractor};

pub const DEFAULT_KATTIS_BASE: &str = "https://open.kattis.com";

#[derive(Debug, Error)]
pub enum KattisError {
    #[error("fetching kattis page failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Reads title and rating from Kattis problem pages.
pub struct KattisClient {
    fetcher: Arc<dyn Fetcher>,
    extractor: Box<dyn PageExtractor>,
    base_url: String,
}

impl KattisClient {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            extractor: Box::new(KattisPageExtractor),
            base_url: DEFAULT_KATTIS_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn PageExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn page_url(&self, reference: &ProblemRef) -> String {
        format!("{}/problems/{}", self.base_url, reference.index)
    }

    pub async fn page(&self, reference: &ProblemRef) -> Result<KattisPage, KattisError> {
        let output = self.fetcher.fetch(&self.page_url(reference)).await?;
        let decoded = decode_page(&output.bytes, output.metadata.content_type.as_deref())?;
        Ok(self.extractor.extract(&decoded.text))
    }
}
