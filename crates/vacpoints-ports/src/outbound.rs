use async_trait::async_trait;

use vacpoints_core::quote::Quote;
use vacpoints_core::resort::Resort;
use vacpoints_core::settings::Profile;

use crate::error::{ParseError, PortError};
use crate::types::Dataset;

#[async_trait]
pub trait ResortRepository: Send + Sync {
    async fn save(&self, resort: &Resort) -> Result<(), PortError>;
    /// Saves every resort or none of them.
    async fn save_all(&self, resorts: &[Resort]) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Resort>, PortError>;
    async fn list_all(&self) -> Result<Vec<Resort>, PortError>;
    async fn delete(&self, id: &str) -> Result<(), PortError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load_profile(&self, name: &str) -> Result<Option<Profile>, PortError>;
    async fn save_profile(&self, name: &str, profile: &Profile) -> Result<(), PortError>;
}

/// Reads and writes the whole resort dataset document.
pub trait DatasetSource: Send + Sync {
    fn parse(&self, payload: &[u8]) -> Result<Dataset, ParseError>;
    fn export(&self, dataset: &Dataset) -> Result<Vec<u8>, ParseError>;
}

/// Renders a quote breakdown for download.
pub trait QuoteExporter: Send + Sync {
    fn export(&self, quote: &Quote) -> Result<Vec<u8>, PortError>;
    fn content_type(&self) -> &str;
}
