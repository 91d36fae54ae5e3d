//! Read-only access to master database table snapshots.
//!
//! Builders consume full-table snapshots as ordered sequences of field
//! mappings. The trait is implemented for SQLite snapshot files (rusqlite)
//! and for in-memory fixtures used in tests.

use std::collections::HashMap;
use std::path::Path;

/// Error type for record store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A single column value
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Int(i64),
    Real(f64),
    Text(String),
    Null,
}

/// One table row as a field-name mapping
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, Field>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Field> {
        self.fields.get(column)
    }

    /// Integer value of a column. Numeric text is parsed.
    pub fn int(&self, column: &str) -> Option<i64> {
        match self.fields.get(column)? {
            Field::Int(v) => Some(*v),
            Field::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// String form of a column. Integers stringify (ids are stored as
    /// numbers in the source tables but keyed as digit strings downstream).
    pub fn string(&self, column: &str) -> Option<String> {
        match self.fields.get(column)? {
            Field::Int(v) => Some(v.to_string()),
            Field::Real(v) => Some(v.to_string()),
            Field::Text(s) => Some(s.clone()),
            Field::Null => None,
        }
    }
}

impl FromIterator<(String, Field)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Field)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Query contract over one region's table snapshots.
///
/// Implementations hand back consistent full-table reads; there are no
/// transactions or partial results.
pub trait RecordStore {
    /// All rows of a table, in storage order
    fn rows(&self, table: &str) -> StoreResult<Vec<Row>>;
}

/// SQLite-backed snapshot store
pub struct SqliteStore {
    conn: rusqlite::Connection,
}

impl SqliteStore {
    /// Open a snapshot file
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = rusqlite::Connection::open_with_flags(
            path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Direct access to the connection (test setup)
    pub fn connection(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

fn value_to_field(value: rusqlite::types::ValueRef<'_>) -> Field {
    use rusqlite::types::ValueRef;
    match value {
        ValueRef::Null => Field::Null,
        ValueRef::Integer(v) => Field::Int(v),
        ValueRef::Real(v) => Field::Real(v),
        ValueRef::Text(s) => Field::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(_) => Field::Null,
    }
}

impl RecordStore for SqliteStore {
    fn rows(&self, table: &str) -> StoreResult<Vec<Row>> {
        // Table names come from builder constants, never user input.
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {table}"))
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = Vec::new();
        let mut raw = stmt
            .query([])
            .map_err(|e| StoreError::Database(e.to_string()))?;
        while let Some(row) = raw.next().map_err(|e| StoreError::Database(e.to_string()))? {
            let mapped: Row = columns
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = row
                        .get_ref(i)
                        .map(value_to_field)
                        .unwrap_or(Field::Null);
                    (name.clone(), value)
                })
                .collect();
            rows.push(mapped);
        }
        Ok(rows)
    }
}

/// In-memory fixture store for builder tests.
///
/// Tables not declared by the fixture read as empty, so tests only set up
/// the tables they exercise.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Row>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a table's rows
    pub fn insert_table(&mut self, table: &str, rows: Vec<Row>) {
        self.tables.insert(table.to_string(), rows);
    }
}

impl RecordStore for MemoryStore {
    fn rows(&self, table: &str) -> StoreResult<Vec<Row>> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_row(pairs: &[(&str, Field)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_row_int_parses_text() {
        let row = fixture_row(&[
            ("a", Field::Int(42)),
            ("b", Field::Text("101011".to_string())),
            ("c", Field::Null),
        ]);
        assert_eq!(row.int("a"), Some(42));
        assert_eq!(row.int("b"), Some(101_011));
        assert_eq!(row.int("c"), None);
        assert_eq!(row.int("missing"), None);
    }

    #[test]
    fn test_row_string_stringifies_ints() {
        let row = fixture_row(&[("id", Field::Int(101_011)), ("name", Field::Null)]);
        assert_eq!(row.string("id").as_deref(), Some("101011"));
        assert_eq!(row.string("name"), None);
    }

    #[test]
    fn test_memory_store_missing_table_is_empty() {
        let store = MemoryStore::new();
        assert!(store.rows("unit_data").unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_returns_rows_in_order() {
        let mut store = MemoryStore::new();
        store.insert_table(
            "unit_data",
            vec![
                fixture_row(&[("unit_id", Field::Int(100_101))]),
                fixture_row(&[("unit_id", Field::Int(100_201))]),
            ],
        );
        let rows = store.rows("unit_data").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].int("unit_id"), Some(100_101));
        assert_eq!(rows[1].int("unit_id"), Some(100_201));
    }

    #[test]
    fn test_sqlite_store_reads_all_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .connection()
            .execute_batch(
                "CREATE TABLE equipment_data (equipment_id INTEGER, equipment_name TEXT);
                 INSERT INTO equipment_data VALUES (101011, 'Iron Blade');
                 INSERT INTO equipment_data VALUES (111011, 'Iron Blade Blueprint');",
            )
            .unwrap();

        let rows = store.rows("equipment_data").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].string("equipment_id").as_deref(), Some("101011"));
        assert_eq!(rows[0].string("equipment_name").as_deref(), Some("Iron Blade"));
    }

    #[test]
    fn test_sqlite_store_unknown_table_errors() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.rows("no_such_table").is_err());
    }
}
