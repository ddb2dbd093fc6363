//! Demo data for a fresh installation.

use crate::error::Result;
use crate::store::SqliteStore;
use rusqlite::params;

const PACKAGES: [(&str, f64, &str); 6] = [
    ("Paket Rumahan", 150000.0, "10 Mbps"),
    ("Paket Standar", 275000.0, "30 Mbps"),
    ("Paket Bisnis", 450000.0, "100 Mbps"),
    ("Paket Ultra Fiber", 650000.0, "500 Mbps"),
    ("Paket Gamers", 350000.0, "50 Mbps"),
    ("Paket Keluarga", 325000.0, "40 Mbps"),
];

const CLIENTS: [(&str, &str, &str, &str); 4] = [
    ("Alice Smith", "123 Main St, Anytown", "6281234567890", "dummy/alice_ktp.jpg"),
    ("Bob Johnson", "456 Oak Ave, Somewhere", "6281298765432", "dummy/bob_ktp.jpg"),
    ("Charlie Brown", "789 Pine Ln, Nowhere", "6281211223344", "dummy/charlie_ktp.jpg"),
    ("Diana Prince", "101 Justice Rd, Metropolis", "6281255667788", "dummy/diana_ktp.jpg"),
];

/// Inserts the demo catalog and demo clients if no package exists yet.
/// Returns whether anything was written.
pub fn seed_demo_data(store: &SqliteStore) -> Result<bool> {
    store.with_conn(|conn| {
        let tx = conn.transaction()?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM packages", [], |row| row.get(0))?;
        if existing > 0 {
            log::info!("Skipping demo data: {} package(s) already present", existing);
            return Ok(false);
        }

        let mut package_ids = Vec::with_capacity(PACKAGES.len());
        for (name, price, speed) in PACKAGES {
            tx.execute(
                "INSERT INTO packages (name, price, speed) VALUES (?1, ?2, ?3)",
                params![name, price, speed],
            )?;
            package_ids.push(tx.last_insert_rowid());
        }

        for (i, (name, address, whatsapp_number, photo)) in CLIENTS.into_iter().enumerate() {
            tx.execute(
                "INSERT INTO clients (name, address, whatsapp_number, id_card_photo_path, package_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    name,
                    address,
                    whatsapp_number,
                    photo,
                    package_ids[i % package_ids.len()]
                ],
            )?;
        }

        tx.commit()?;
        log::info!(
            "Seeded {} packages and {} clients",
            PACKAGES.len(),
            CLIENTS.len()
        );
        Ok(true)
    })
}
