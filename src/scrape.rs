use anyhow::Result;
use tracing::info;

use crate::extract::SiteExtractor;
use crate::storage::Storage;

/// Thin orchestrator wiring one extractor to one storage backend. All domain
/// logic lives in the collaborators; the only branch is save vs. delete.
pub struct Scraper<S: Storage> {
    extractor: SiteExtractor,
    storage: S,
}

impl<S: Storage> Scraper<S> {
    pub fn new(extractor: SiteExtractor, storage: S) -> Self {
        Scraper { extractor, storage }
    }

    pub async fn scrape(&self, delete: bool) -> Result<()> {
        info!("Scraping {}", self.extractor.url());
        let facts = self.extractor.run().await?;
        info!("Extracted {} facts", facts.len());

        if delete {
            self.storage.delete(&facts)?;
            info!("Processed deletions for {} facts", facts.len());
        } else {
            self.storage.save(&facts)?;
            info!("Saved {} facts", facts.len());
        }
        Ok(())
    }
}
