use crate::error::{AppError, Result};
use crate::storage::{FileStorage, Upload};
use crate::store::packages::{package_at, package_exists};
use crate::store::{ClientStore, SqliteStore};
use crate::validation::validate_client;
use common::model::client::{Client, ClientWithPackage};
use common::requests::ClientForm;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_CLIENT: &str = "SELECT id, name, address, whatsapp_number, id_card_photo_path, \
     package_id, created_at, updated_at FROM clients";

const SELECT_CLIENT_WITH_PACKAGE: &str = "SELECT c.id, c.name, c.address, c.whatsapp_number, \
     c.id_card_photo_path, c.package_id, c.created_at, c.updated_at, \
     p.id, p.name, p.price, p.speed, p.created_at, p.updated_at \
     FROM clients c JOIN packages p ON p.id = c.package_id \
     ORDER BY c.id";

fn client_at(row: &Row<'_>, start: usize) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(start)?,
        name: row.get(start + 1)?,
        address: row.get(start + 2)?,
        whatsapp_number: row.get(start + 3)?,
        id_card_photo_path: row.get(start + 4)?,
        package_id: row.get(start + 5)?,
        created_at: row.get(start + 6)?,
        updated_at: row.get(start + 7)?,
    })
}

fn find_client(conn: &Connection, id: i64) -> rusqlite::Result<Option<Client>> {
    conn.query_row(
        &format!("{} WHERE id = ?1", SELECT_CLIENT),
        params![id],
        |row| client_at(row, 0),
    )
    .optional()
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound { entity: "client", id }
}

fn store_photo(photo: Option<&Upload>, storage: &dyn FileStorage) -> Result<Option<String>> {
    match photo {
        Some(upload) => Ok(Some(storage.put(&upload.bytes, &upload.filename)?)),
        None => Ok(None),
    }
}

impl ClientStore for SqliteStore {
    fn list_clients(&self) -> Result<Vec<ClientWithPackage>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(SELECT_CLIENT_WITH_PACKAGE)?;
            let clients = stmt
                .query_map([], |row| {
                    Ok(ClientWithPackage {
                        client: client_at(row, 0)?,
                        package: package_at(row, 8)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(clients)
        })
    }

    fn create_client(
        &self,
        form: &ClientForm,
        photo: Option<&Upload>,
        storage: &dyn FileStorage,
    ) -> Result<Client> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let draft = validate_client(form, |package_id| Ok(package_exists(&tx, package_id)?))?;
            let photo_path = store_photo(photo, storage)?;
            tx.execute(
                "INSERT INTO clients (name, address, whatsapp_number, id_card_photo_path, package_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    draft.name,
                    draft.address,
                    draft.whatsapp_number,
                    photo_path,
                    draft.package_id
                ],
            )?;
            let id = tx.last_insert_rowid();
            let client = find_client(&tx, id)?.ok_or_else(|| not_found(id))?;
            tx.commit()?;
            log::info!(
                "Created client {} on package {}",
                client.id,
                client.package_id
            );
            Ok(client)
        })
    }

    fn update_client(
        &self,
        id: i64,
        form: &ClientForm,
        photo: Option<&Upload>,
        storage: &dyn FileStorage,
    ) -> Result<Client> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            if find_client(&tx, id)?.is_none() {
                return Err(not_found(id));
            }
            let draft = validate_client(form, |package_id| Ok(package_exists(&tx, package_id)?))?;
            let photo_path = store_photo(photo, storage)?;
            tx.execute(
                "UPDATE clients
                 SET name = ?1, address = ?2, whatsapp_number = ?3, package_id = ?4,
                     id_card_photo_path = COALESCE(?5, id_card_photo_path),
                     updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?6",
                params![
                    draft.name,
                    draft.address,
                    draft.whatsapp_number,
                    draft.package_id,
                    photo_path,
                    id
                ],
            )?;
            let client = find_client(&tx, id)?.ok_or_else(|| not_found(id))?;
            tx.commit()?;
            log::info!("Updated client {}", id);
            Ok(client)
        })
    }

    fn delete_client(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM clients WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(not_found(id));
            }
            log::info!("Deleted client {}", id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use crate::store::PackageStore;
    use common::requests::PackageForm;
    use std::io;
    use std::sync::Mutex;

    /// Records every upload and hands out predictable paths.
    #[derive(Default)]
    struct RecordingStorage {
        stored: Mutex<Vec<String>>,
    }

    impl FileStorage for RecordingStorage {
        fn put(&self, _bytes: &[u8], name: &str) -> std::result::Result<String, StorageError> {
            let mut stored = self.stored.lock().unwrap();
            let path = format!("id_cards/{}-{}", stored.len(), name);
            stored.push(path.clone());
            Ok(path)
        }
    }

    struct BrokenStorage;

    impl FileStorage for BrokenStorage {
        fn put(&self, _bytes: &[u8], _name: &str) -> std::result::Result<String, StorageError> {
            Err(StorageError::Write {
                path: "id_cards/x.jpg".into(),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            })
        }
    }

    fn store_with_package() -> (SqliteStore, i64) {
        let store = SqliteStore::open_in_memory().unwrap();
        let package = store
            .create_package(&PackageForm {
                name: Some("Basic".to_string()),
                price: Some("150000".to_string()),
                speed: Some("10 Mbps".to_string()),
            })
            .unwrap();
        (store, package.id)
    }

    fn form(package_id: i64) -> ClientForm {
        ClientForm {
            name: Some("Alice".to_string()),
            address: Some("X".to_string()),
            whatsapp_number: Some("62811".to_string()),
            package_id: Some(package_id.to_string()),
        }
    }

    fn photo(name: &str) -> Upload {
        Upload {
            filename: name.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn create_without_photo() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        let client = store.create_client(&form(package_id), None, &storage).unwrap();

        assert_eq!(client.name, "Alice");
        assert_eq!(client.whatsapp_number, "62811");
        assert_eq!(client.package_id, package_id);
        assert_eq!(client.id_card_photo_path, None);
        assert!(storage.stored.lock().unwrap().is_empty());
    }

    #[test]
    fn create_with_photo_records_the_stored_path() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        let client = store
            .create_client(&form(package_id), Some(&photo("ktp.jpg")), &storage)
            .unwrap();
        assert_eq!(client.id_card_photo_path.as_deref(), Some("id_cards/0-ktp.jpg"));
    }

    #[test]
    fn create_with_unknown_package_persists_nothing() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        let err = store
            .create_client(&form(package_id + 100), Some(&photo("ktp.jpg")), &storage)
            .unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.get("package_id"), ["The selected package id is invalid."])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.list_clients().unwrap().is_empty());
        assert!(storage.stored.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_upload_persists_nothing() {
        let (store, package_id) = store_with_package();
        let err = store
            .create_client(&form(package_id), Some(&photo("ktp.jpg")), &BrokenStorage)
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(store.list_clients().unwrap().is_empty());
    }

    #[test]
    fn update_without_photo_keeps_the_existing_path() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        let created = store
            .create_client(&form(package_id), Some(&photo("ktp.jpg")), &storage)
            .unwrap();

        let mut changed = form(package_id);
        changed.name = Some("Alice Smith".to_string());
        let updated = store
            .update_client(created.id, &changed, None, &storage)
            .unwrap();

        assert_eq!(updated.name, "Alice Smith");
        assert_eq!(updated.id_card_photo_path, created.id_card_photo_path);
    }

    #[test]
    fn update_with_photo_replaces_the_path() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        let created = store.create_client(&form(package_id), None, &storage).unwrap();
        let updated = store
            .update_client(created.id, &form(package_id), Some(&photo("new.png")), &storage)
            .unwrap();
        assert_eq!(updated.id_card_photo_path.as_deref(), Some("id_cards/0-new.png"));
    }

    #[test]
    fn update_missing_client_is_not_found() {
        let (store, package_id) = store_with_package();
        let err = store
            .update_client(5, &form(package_id), None, &RecordingStorage::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "client", id: 5 }));
    }

    #[test]
    fn update_cannot_point_at_a_missing_package() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        let created = store.create_client(&form(package_id), None, &storage).unwrap();
        let err = store
            .update_client(created.id, &form(package_id + 1), None, &storage)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.list_clients().unwrap()[0].client, created);
    }

    #[test]
    fn list_embeds_the_package() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        store.create_client(&form(package_id), None, &storage).unwrap();

        let listed = store.list_clients().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].package.id, package_id);
        assert_eq!(listed[0].package.name, "Basic");
    }

    #[test]
    fn delete_removes_only_the_client() {
        let (store, package_id) = store_with_package();
        let storage = RecordingStorage::default();
        let client = store.create_client(&form(package_id), None, &storage).unwrap();

        store.delete_client(client.id).unwrap();
        assert!(store.list_clients().unwrap().is_empty());
        assert_eq!(store.all_packages().unwrap().len(), 1);

        let err = store.delete_client(client.id).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
