/// Display-only banner shipped alongside a dataset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogInfo {
    pub last_updated: String,
    pub status: String,
}

impl CatalogInfo {
    pub fn new(last_updated: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            last_updated: last_updated.into(),
            status: status.into(),
        }
    }
}

impl Default for CatalogInfo {
    fn default() -> Self {
        Self::new("inconnue", "inconnu")
    }
}
