use crate::error::{AppError, Result};
use crate::store::guard;
use crate::store::{PackageStore, SqliteStore};
use crate::validation::validate_package;
use common::model::package::{Package, PackageSummary};
use common::requests::PackageForm;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_PACKAGE: &str =
    "SELECT id, name, price, speed, created_at, updated_at FROM packages";

/// Every package with the number of clients referencing it, counted in the
/// same statement so the figure matches `guard::client_count_for` at read time.
const SELECT_PACKAGE_SUMMARY: &str = "SELECT p.id, p.name, p.price, p.speed, p.created_at, \
     p.updated_at, COUNT(c.id) \
     FROM packages p LEFT JOIN clients c ON c.package_id = p.id \
     GROUP BY p.id ORDER BY p.id";

/// Maps six package columns starting at `start`. Shared with the client join.
pub(crate) fn package_at(row: &Row<'_>, start: usize) -> rusqlite::Result<Package> {
    Ok(Package {
        id: row.get(start)?,
        name: row.get(start + 1)?,
        price: row.get(start + 2)?,
        speed: row.get(start + 3)?,
        created_at: row.get(start + 4)?,
        updated_at: row.get(start + 5)?,
    })
}

pub(crate) fn find_package(conn: &Connection, id: i64) -> rusqlite::Result<Option<Package>> {
    conn.query_row(
        &format!("{} WHERE id = ?1", SELECT_PACKAGE),
        params![id],
        |row| package_at(row, 0),
    )
    .optional()
}

pub(crate) fn package_exists(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM packages WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )
}

fn all(conn: &Connection) -> rusqlite::Result<Vec<Package>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_PACKAGE))?;
    let packages = stmt
        .query_map([], |row| package_at(row, 0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(packages)
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound {
        entity: "package",
        id,
    }
}

impl PackageStore for SqliteStore {
    fn list_packages(&self) -> Result<Vec<PackageSummary>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(SELECT_PACKAGE_SUMMARY)?;
            let summaries = stmt
                .query_map([], |row| {
                    Ok(PackageSummary {
                        package: package_at(row, 0)?,
                        client_count: row.get(6)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(summaries)
        })
    }

    fn all_packages(&self) -> Result<Vec<Package>> {
        self.with_conn(|conn| Ok(all(conn)?))
    }

    fn create_package(&self, form: &PackageForm) -> Result<Package> {
        let draft = validate_package(form)?;
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO packages (name, price, speed) VALUES (?1, ?2, ?3)",
                params![draft.name, draft.price, draft.speed],
            )?;
            let id = tx.last_insert_rowid();
            let package = find_package(&tx, id)?.ok_or_else(|| not_found(id))?;
            tx.commit()?;
            log::info!("Created package {} '{}'", package.id, package.name);
            Ok(package)
        })
    }

    fn update_package(&self, id: i64, form: &PackageForm) -> Result<Package> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            if !package_exists(&tx, id)? {
                return Err(not_found(id));
            }
            let draft = validate_package(form)?;
            tx.execute(
                "UPDATE packages
                 SET name = ?1, price = ?2, speed = ?3, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?4",
                params![draft.name, draft.price, draft.speed, id],
            )?;
            let package = find_package(&tx, id)?.ok_or_else(|| not_found(id))?;
            tx.commit()?;
            log::info!("Updated package {}", id);
            Ok(package)
        })
    }

    fn delete_package(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            if !package_exists(&tx, id)? {
                return Err(not_found(id));
            }
            let count = guard::client_count_for(&tx, id)?;
            if count > 0 {
                log::warn!("Refused to delete package {}: {} client(s) linked", id, count);
                return Err(AppError::package_in_use(count));
            }
            tx.execute("DELETE FROM packages WHERE id = ?1", params![id])?;
            tx.commit()?;
            log::info!("Deleted package {}", id);
            Ok(())
        })
    }

    fn client_count_for(&self, package_id: i64) -> Result<i64> {
        self.with_conn(|conn| Ok(guard::client_count_for(conn, package_id)?))
    }
}
