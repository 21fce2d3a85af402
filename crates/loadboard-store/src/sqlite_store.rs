//! SQLite implementation of PostingRepository

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::debug;
use uuid::Uuid;

use loadboard_domain::model::{NewPosting, PostingRecord};
use loadboard_domain::repository::PostingRepository;
use loadboard_domain::service::{fold_case, SearchFilter};
use loadboard_types::{Error, Result, StoreError};

use crate::schema::{POSTING_COLUMNS, SCHEMA, TABLE};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Posting store backed by a SQLite database file.
///
/// Holds only the database path; every operation opens its own connection,
/// so clones can be moved freely between request handlers.
#[derive(Debug, Clone)]
pub struct SqlitePostingStore {
    db_path: PathBuf,
}

impl SqlitePostingStore {
    /// Open (or create) the database and make sure the schema exists
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { db_path };
        let conn = store.connect()?;
        // Readers do not block the single writer in WAL mode
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!("journal_mode = {}", mode);
        conn.execute_batch(SCHEMA)?;
        debug!("Posting store ready at {}", store.db_path.display());
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path).map_err(|e| {
            StoreError::Unavailable(format!("{}: {}", self.db_path.display(), e))
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        // casefold() must agree with fold_case() used by the board filter
        conn.create_scalar_function(
            "casefold",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let value = ctx.get::<Option<String>>(0)?;
                Ok(value.map(|v| fold_case(&v)))
            },
        )?;

        Ok(conn)
    }
}

impl PostingRepository for SqlitePostingStore {
    fn insert(&self, posting: &NewPosting) -> Result<PostingRecord> {
        let conn = self.connect()?;
        let id = Uuid::new_v4().to_string();
        let pickup_date = posting
            .pickup_date
            .map(|d| d.format(DATE_FORMAT).to_string());

        let sql = format!(
            "INSERT INTO {TABLE} (id, origin, destination, distance, rate, equipment, \
             broker, broker_email, pickup_date, commodity, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
             RETURNING {POSTING_COLUMNS}"
        );

        let record = conn.query_row(
            &sql,
            params![
                id,
                posting.origin,
                posting.destination,
                posting.distance,
                posting.rate,
                posting.equipment,
                posting.broker,
                posting.broker_email,
                pickup_date,
                posting.commodity,
                posting.status,
            ],
            decode_posting,
        )?;

        Ok(record)
    }

    fn search(&self, filter: &SearchFilter) -> Result<Vec<PostingRecord>> {
        let conn = self.connect()?;

        let mut where_parts: Vec<&str> = vec!["status = ?"];
        let mut values: Vec<Value> = vec![Value::Text(filter.status.clone())];

        if let Some(origin) = &filter.origin {
            where_parts.push("instr(casefold(origin), casefold(?)) > 0");
            values.push(Value::Text(origin.clone()));
        }
        if let Some(destination) = &filter.destination {
            where_parts.push("instr(casefold(destination), casefold(?)) > 0");
            values.push(Value::Text(destination.clone()));
        }
        if let Some(equipment) = &filter.equipment {
            where_parts.push("equipment = ?");
            values.push(Value::Text(equipment.clone()));
        }
        values.push(Value::Integer(i64::from(filter.limit)));

        let sql = format!(
            "SELECT {POSTING_COLUMNS} FROM {TABLE} WHERE {} \
             ORDER BY created_at DESC, rowid DESC LIMIT ?",
            where_parts.join(" AND ")
        );

        debug!("search: {} ({} bound values)", sql, values.len());
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), decode_posting)?;
        let postings = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(postings)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE}"), [], |row| row.get(0))?;
        usize::try_from(count).map_err(|e| Error::Store(StoreError::Unavailable(e.to_string())))
    }
}

fn decode_posting(row: &Row<'_>) -> rusqlite::Result<PostingRecord> {
    let pickup_date: Option<String> = row.get(9)?;
    let created_at: String = row.get(12)?;

    Ok(PostingRecord {
        id: row.get(0)?,
        origin: row.get(1)?,
        destination: row.get(2)?,
        distance: row.get(3)?,
        rate: row.get(4)?,
        rate_per_mile: row.get(5)?,
        equipment: row.get(6)?,
        broker: row.get(7)?,
        broker_email: row.get(8)?,
        pickup_date: pickup_date
            .filter(|d| !d.is_empty())
            .map(|d| parse_date(9, &d))
            .transpose()?,
        commodity: row.get(10)?,
        status: row.get(11)?,
        created_at: parse_timestamp(12, &created_at)?,
    })
}

fn parse_date(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadboard_domain::model::{DEFAULT_BROKER, DEFAULT_EQUIPMENT, DEFAULT_STATUS};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, SqlitePostingStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqlitePostingStore::open(dir.path().join("loads.db")).expect("open store");
        (dir, store)
    }

    fn new_posting(origin: &str, destination: &str, equipment: &str) -> NewPosting {
        NewPosting {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance: 967,
            rate: 1800.0,
            equipment: equipment.to_string(),
            broker: DEFAULT_BROKER.to_string(),
            broker_email: String::new(),
            pickup_date: None,
            commodity: String::new(),
            status: DEFAULT_STATUS.to_string(),
        }
    }

    fn origins(postings: &[PostingRecord]) -> Vec<&str> {
        postings.iter().map(|p| p.origin.as_str()).collect()
    }

    #[test]
    fn test_insert_returns_store_assigned_fields() {
        let (_dir, store) = open_temp();
        let mut posting = new_posting("Chicago, IL", "Dallas, TX", DEFAULT_EQUIPMENT);
        posting.pickup_date = NaiveDate::from_ymd_opt(2025, 6, 1);

        let record = store.insert(&posting).unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.origin, "Chicago, IL");
        assert_eq!(record.distance, 967);
        assert!((record.rate_per_mile.unwrap() - 1.86).abs() < 1e-9);
        assert_eq!(record.pickup_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(record.status, "available");
        assert!(record.created_at <= Utc::now());
    }

    #[test]
    fn test_identifiers_are_unique() {
        let (_dir, store) = open_temp();
        let ids: HashSet<String> = (0..20)
            .map(|i| {
                store
                    .insert(&new_posting(&format!("City {i}"), "Dallas, TX", "Van"))
                    .unwrap()
                    .id
            })
            .collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(store.count().unwrap(), 20);
    }

    #[test]
    fn test_newest_first_and_limit() {
        let (_dir, store) = open_temp();
        for origin in ["A", "B", "C"] {
            store.insert(&new_posting(origin, "Z", "Van")).unwrap();
        }

        let all = store.search(&SearchFilter::default()).unwrap();
        assert_eq!(origins(&all), vec!["C", "B", "A"]);

        let one = store.search(&SearchFilter::default().with_limit(1)).unwrap();
        assert_eq!(origins(&one), vec!["C"]);

        let none = store.search(&SearchFilter::default().with_limit(0)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_substring_filters_ignore_case() {
        let (_dir, store) = open_temp();
        store.insert(&new_posting("Los Angeles, CA", "Phoenix, AZ", "Van")).unwrap();
        store.insert(&new_posting("Chicago, IL", "Dallas, TX", "Van")).unwrap();
        store.insert(&new_posting("München", "Zürich", "Van")).unwrap();

        let found = store
            .search(&SearchFilter::default().with_origin(Some("los angeles")))
            .unwrap();
        assert_eq!(origins(&found), vec!["Los Angeles, CA"]);

        let found = store
            .search(&SearchFilter::default().with_destination(Some("DALLAS")))
            .unwrap();
        assert_eq!(origins(&found), vec!["Chicago, IL"]);

        let found = store
            .search(&SearchFilter::default().with_origin(Some("MÜNCHEN")))
            .unwrap();
        assert_eq!(origins(&found), vec!["München"]);
    }

    #[test]
    fn test_equipment_is_exact() {
        let (_dir, store) = open_temp();
        store.insert(&new_posting("Miami, FL", "Boston, MA", "Reefer")).unwrap();

        let van = store
            .search(&SearchFilter::default().with_equipment(Some("Van")))
            .unwrap();
        assert!(van.is_empty());

        let lower = store
            .search(&SearchFilter::default().with_equipment(Some("reefer")))
            .unwrap();
        assert!(lower.is_empty());

        let reefer = store
            .search(&SearchFilter::default().with_equipment(Some("Reefer")))
            .unwrap();
        assert_eq!(reefer.len(), 1);
    }

    #[test]
    fn test_status_filter() {
        let (_dir, store) = open_temp();
        store.insert(&new_posting("A", "B", "Van")).unwrap();
        let mut booked = new_posting("C", "D", "Van");
        booked.status = "booked".to_string();
        store.insert(&booked).unwrap();

        let available = store.search(&SearchFilter::default()).unwrap();
        assert_eq!(origins(&available), vec!["A"]);

        let booked = store
            .search(&SearchFilter::default().with_status(Some("booked")))
            .unwrap();
        assert_eq!(origins(&booked), vec!["C"]);

        let upper = store
            .search(&SearchFilter::default().with_status(Some("Available")))
            .unwrap();
        assert!(upper.is_empty());
    }

    #[test]
    fn test_filter_values_match_literally() {
        let (_dir, store) = open_temp();
        store.insert(&new_posting("O'Hare, IL", "100% Dock_1", "Van")).unwrap();
        store.insert(&new_posting("Chicago, IL", "Dallas, TX", "Van")).unwrap();

        let found = store
            .search(&SearchFilter::default().with_origin(Some("o'hare")))
            .unwrap();
        assert_eq!(origins(&found), vec!["O'Hare, IL"]);

        let found = store
            .search(&SearchFilter::default().with_destination(Some("%")))
            .unwrap();
        assert_eq!(found.len(), 1);

        let found = store
            .search(&SearchFilter::default().with_destination(Some("_")))
            .unwrap();
        assert_eq!(found.len(), 1);

        let hostile = store
            .search(&SearchFilter::default().with_origin(Some("' OR '1'='1")))
            .unwrap();
        assert!(hostile.is_empty());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_check_constraint_rejects_non_positive_distance() {
        let (_dir, store) = open_temp();
        let mut posting = new_posting("A", "B", "Van");
        posting.distance = 0;

        let err = store.insert(&posting).unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("loads.db");
        SqlitePostingStore::open(&path)
            .unwrap()
            .insert(&new_posting("A", "B", "Van"))
            .unwrap();

        let reopened = SqlitePostingStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert_eq!(reopened.db_path(), path.as_path());
    }
}
