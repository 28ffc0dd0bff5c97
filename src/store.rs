// 💾 Calculation Record Store - SQLite-backed + in-memory
// The store is the single source of truth; per-record consistency is its job

use crate::error::CalcResult;
use crate::model::CarbonCalculation;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, RwLock};

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Persistence contract consumed by the service and the email validator.
///
/// Injectable so the service and validators can be tested against an
/// in-memory store. Implementations assign the id on first save and
/// fully overwrite the record on subsequent saves (last writer wins).
pub trait CalculationStore: Send + Sync {
    /// Persist the record, assigning an id if it has none.
    /// Returns the record as stored.
    fn save(&self, record: CarbonCalculation) -> CalcResult<CarbonCalculation>;

    fn find_by_id(&self, id: &str) -> CalcResult<Option<CarbonCalculation>>;

    /// Exact-match email existence check, used for the uniqueness rule.
    fn exists_by_email(&self, email: &str) -> CalcResult<bool>;
}

fn assign_identity(mut record: CarbonCalculation) -> CarbonCalculation {
    if record.id.is_empty() {
        record.id = uuid::Uuid::new_v4().to_string();
    }
    record.updated_at = Utc::now();
    record
}

// ============================================================================
// SQLITE STORE
// ============================================================================

/// Document-style SQLite store: the record body is stored as a JSON blob,
/// with id and email lifted into columns for lookups.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> CalcResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> CalcResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> CalcResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS carbon_calculations (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                record TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_calculations_email
             ON carbon_calculations (email)",
            [],
        )?;

        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }
}

impl CalculationStore for SqliteStore {
    fn save(&self, record: CarbonCalculation) -> CalcResult<CarbonCalculation> {
        let record = assign_identity(record);
        let body = serde_json::to_string(&record)?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO carbon_calculations (id, email, record)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET email = ?2, record = ?3",
            params![record.id, record.email, body],
        )?;

        Ok(record)
    }

    fn find_by_id(&self, id: &str) -> CalcResult<Option<CarbonCalculation>> {
        let conn = self.conn.lock().unwrap();
        let body: Option<String> = conn
            .query_row(
                "SELECT record FROM carbon_calculations WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn exists_by_email(&self, email: &str) -> CalcResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM carbon_calculations WHERE email = ?1",
            params![email],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// HashMap-backed store for tests and the demo CLI.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, CarbonCalculation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CalculationStore for MemoryStore {
    fn save(&self, record: CarbonCalculation) -> CalcResult<CarbonCalculation> {
        let record = assign_identity(record);
        let mut records = self.records.write().unwrap();
        records.insert(record.id.clone(), record.clone());

        Ok(record)
    }

    fn find_by_id(&self, id: &str) -> CalcResult<Option<CarbonCalculation>> {
        let records = self.records.read().unwrap();
        Ok(records.get(id).cloned())
    }

    fn exists_by_email(&self, email: &str) -> CalcResult<bool> {
        let records = self.records.read().unwrap();
        Ok(records.values().any(|r| r.email == email))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TransportationEntry, TransportationType};

    fn sample_record() -> CarbonCalculation {
        CarbonCalculation::new("João Silva", "joao@email.com", "SP", "11999999999")
    }

    #[test]
    fn test_memory_save_assigns_id() {
        let store = MemoryStore::new();
        let saved = store.save(sample_record()).unwrap();

        assert!(!saved.id.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_find_by_id_roundtrip() {
        let store = MemoryStore::new();
        let saved = store.save(sample_record()).unwrap();

        let found = store.find_by_id(&saved.id).unwrap().unwrap();
        assert_eq!(found.email, "joao@email.com");

        assert!(store.find_by_id("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_memory_exists_by_email() {
        let store = MemoryStore::new();
        store.save(sample_record()).unwrap();

        assert!(store.exists_by_email("joao@email.com").unwrap());
        assert!(!store.exists_by_email("other@email.com").unwrap());
    }

    #[test]
    fn test_sqlite_save_and_fetch() {
        let store = SqliteStore::open_in_memory().unwrap();
        let saved = store.save(sample_record()).unwrap();

        assert!(!saved.id.is_empty());

        let found = store.find_by_id(&saved.id).unwrap().unwrap();
        assert_eq!(found.name, "João Silva");
        assert_eq!(found.uf, "SP");
        assert!(found.total_emission.is_none());
    }

    #[test]
    fn test_sqlite_overwrite_keeps_single_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut saved = store.save(sample_record()).unwrap();

        saved.energy_consumption = 350.0;
        saved.transportation = vec![TransportationEntry::new(TransportationType::Car, 200.0)];
        saved.energy_emission = Some(164.5);

        let id = saved.id.clone();
        store.save(saved).unwrap();

        let found = store.find_by_id(&id).unwrap().unwrap();
        assert_eq!(found.energy_consumption, 350.0);
        assert_eq!(found.energy_emission, Some(164.5));
        assert_eq!(found.transportation.len(), 1);
    }

    #[test]
    fn test_sqlite_exists_by_email_exact_match() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(sample_record()).unwrap();

        assert!(store.exists_by_email("joao@email.com").unwrap());
        assert!(!store.exists_by_email("JOAO@email.com").unwrap());
    }
}
