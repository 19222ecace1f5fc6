use serde::{Deserialize, Serialize};

use vacpoints_core::resort::Resort;

/// Whole resort dataset as stored in the seed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub resorts: Vec<Resort>,
}

/// Outcome of merging a dataset into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added: Vec<String>,
    pub replaced: Vec<String>,
}
