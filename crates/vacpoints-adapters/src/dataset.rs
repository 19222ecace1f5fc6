//! JSON resort dataset: the seed file shipped in `data/` and the import/export format.

use std::collections::HashSet;

use tracing::{info, warn};

use vacpoints_ports::error::{ParseError, PortError};
use vacpoints_ports::outbound::{DatasetSource, ResortRepository};
use vacpoints_ports::types::Dataset;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDataset;

impl JsonDataset {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetSource for JsonDataset {
    fn parse(&self, payload: &[u8]) -> Result<Dataset, ParseError> {
        let dataset: Dataset =
            serde_json::from_slice(payload).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        let mut seen = HashSet::new();
        for resort in &dataset.resorts {
            if !seen.insert(resort.id().as_str()) {
                return Err(ParseError::InvalidPayload(format!(
                    "duplicate resort id: {}",
                    resort.id()
                )));
            }
            resort
                .validate()
                .map_err(|e| ParseError::InvalidPayload(format!("{}: {e}", resort.id())))?;
        }
        Ok(dataset)
    }

    fn export(&self, dataset: &Dataset) -> Result<Vec<u8>, ParseError> {
        serde_json::to_vec_pretty(dataset).map_err(|e| ParseError::InvalidPayload(e.to_string()))
    }
}

/// Load `dataset` into an empty store. A store that already holds resorts is left alone.
pub async fn seed_if_empty<R>(repo: &R, dataset: &Dataset) -> Result<usize, PortError>
where
    R: ResortRepository,
{
    let existing = repo.list_all().await?;
    if !existing.is_empty() {
        info!(resorts = existing.len(), "resort store already seeded");
        return Ok(0);
    }
    if dataset.resorts.is_empty() {
        warn!("seed dataset has no resorts");
        return Ok(0);
    }
    repo.save_all(&dataset.resorts).await?;
    info!(resorts = dataset.resorts.len(), "seeded resort store");
    Ok(dataset.resorts.len())
}
