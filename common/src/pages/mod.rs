//! Payloads returned by the listing endpoints.
//!
//! Each page bundles everything the front end needs to render one screen,
//! including the flash left behind by the previous form submission.

use crate::model::client::ClientWithPackage;
use crate::model::flash::Flash;
use crate::model::package::{Package, PackageSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagesPage {
    pub packages: Vec<PackageSummary>,
    pub flash: Option<Flash>,
}

/// The clients screen also needs the package catalog to fill its package picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientsPage {
    pub clients: Vec<ClientWithPackage>,
    pub packages: Vec<Package>,
    pub flash: Option<Flash>,
}
