use serde::Deserialize;

/// Fields submitted by the package create and edit forms.
///
/// Every field is optional text so that a missing or malformed value reaches
/// validation and comes back as a per-field message instead of a rejected request.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PackageForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub speed: Option<String>,
}

/// Text fields submitted by the client create and edit forms.
/// The optional ID card photo travels as a separate multipart file part.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ClientForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub whatsapp_number: Option<String>,
    pub package_id: Option<String>,
}
