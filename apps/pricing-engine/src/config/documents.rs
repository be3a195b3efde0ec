//! Invoice document configuration.

use serde::{Deserialize, Serialize};

use crate::domain::documents::IdentifierRegion;

use super::ClientSettings;

/// Invoice document configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Where the order identifier is printed on PDF invoices.
    #[serde(default)]
    pub region: IdentifierRegion,
    /// Client settings for fetching rendered invoices.
    #[serde(default)]
    pub client: ClientSettings,
}
