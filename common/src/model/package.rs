use serde::{Deserialize, Serialize};

/// A subscription tier offered to subscribers.
///
/// The entity carries only what is persisted in the `packages` table. The number
/// of subscribers on a package is never stored here; it is projected at read time
/// into a [`PackageSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub name: String,
    /// Monthly price, never negative.
    pub price: f64,
    /// Free-text bandwidth descriptor such as `"10 Mbps"`.
    pub speed: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A [`Package`] annotated with the number of clients currently linked to it.
///
/// Produced by the package listing. The count is recomputed on every read, so it
/// reflects the state of the `clients` table at the time of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSummary {
    #[serde(flatten)]
    pub package: Package,
    #[serde(rename = "clients_count")]
    pub client_count: i64,
}
