use crate::model::package::Package;
use serde::{Deserialize, Serialize};

/// A subscriber record. Holds a non-owning reference to exactly one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub address: String,
    /// Kept as text so leading digits and country prefixes survive.
    pub whatsapp_number: String,
    /// Relative path returned by the file storage, e.g. `id_cards/<uuid>.jpg`.
    pub id_card_photo_path: Option<String>,
    pub package_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A client with its package loaded alongside, as returned by the client listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientWithPackage {
    #[serde(flatten)]
    pub client: Client,
    pub package: Package,
}
