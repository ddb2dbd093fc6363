//! # Persistence
//!
//! The package catalog and the subscriber records live in one SQLite database.
//! Entity shapes come from `common::model`; the operations on them are exposed
//! through the [`PackageStore`] and [`ClientStore`] traits, implemented here by
//! [`SqliteStore`].
//!
//! ## Sub-modules:
//! - `schema`: connection setup and table definitions.
//! - `guard`: the client count that blocks deletion of packages still in use.
//! - `packages`: `PackageStore` over the `packages` table.
//! - `clients`: `ClientStore` over the `clients` table.
//! - `seed`: demo data for an empty database.
//!
//! Every mutating operation runs inside a single transaction, so a failed
//! request leaves no partial writes behind.

mod clients;
mod guard;
mod packages;
mod schema;
pub mod seed;

use crate::error::{AppError, Result};
use crate::storage::{FileStorage, Upload};
use common::model::client::{Client, ClientWithPackage};
use common::model::package::{Package, PackageSummary};
use common::requests::{ClientForm, PackageForm};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

pub trait PackageStore: Send + Sync {
    /// All packages by id, each with its current client count.
    fn list_packages(&self) -> Result<Vec<PackageSummary>>;

    /// All packages by id, without counts.
    fn all_packages(&self) -> Result<Vec<Package>>;

    fn create_package(&self, form: &PackageForm) -> Result<Package>;

    /// Fails with `NotFound` before any validation runs.
    fn update_package(&self, id: i64, form: &PackageForm) -> Result<Package>;

    /// Refused with `Conflict` while any client still references the package.
    fn delete_package(&self, id: i64) -> Result<()>;

    fn client_count_for(&self, package_id: i64) -> Result<i64>;
}

pub trait ClientStore: Send + Sync {
    /// All clients by id, each with its package loaded in the same query.
    fn list_clients(&self) -> Result<Vec<ClientWithPackage>>;

    /// Validates, then stores `photo` (if any), then inserts.
    fn create_client(
        &self,
        form: &ClientForm,
        photo: Option<&Upload>,
        storage: &dyn FileStorage,
    ) -> Result<Client>;

    /// Like `create_client`; without a `photo` the stored path is kept.
    fn update_client(
        &self,
        id: i64,
        form: &ClientForm,
        photo: Option<&Upload>,
        storage: &dyn FileStorage,
    ) -> Result<Client>;

    fn delete_client(&self, id: i64) -> Result<()>;
}

/// SQLite-backed store. One connection, opened at start-up and shared by all
/// request handlers; access is serialized by the mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        schema::configure(&conn)?;
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock().map_err(|_| AppError::LockPoisoned)?;
        f(&mut conn)
    }
}
