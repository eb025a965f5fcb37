use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use catalog_core::{Counts, Problem};
use catalog_logging::{catalog_debug, catalog_info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{ProblemRecord, ProblemStore, SeedProvider, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS problems (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    identifier   TEXT    NOT NULL UNIQUE,
    name         TEXT    NOT NULL,
    tags         TEXT    NOT NULL DEFAULT '[]',
    difficulty   INTEGER,
    url          TEXT    NOT NULL UNIQUE,
    solved       INTEGER NOT NULL DEFAULT 0 CHECK (solved >= 0),
    date_added   TEXT    NOT NULL,
    added_by     TEXT    NOT NULL,
    added_by_url TEXT    NOT NULL,
    likes        INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0),
    dislikes     INTEGER NOT NULL DEFAULT 0 CHECK (dislikes >= 0),
    type         TEXT
);
";

const COLUMNS: &str = "identifier, name, tags, difficulty, url, solved, date_added, \
                       added_by, added_by_url, likes, dislikes, type";

/// SQLite-backed catalog. Rows get a generated integer key; lookups go by
/// identifier or url, both unique.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|err| StoreError::Backend(format!("{}: {err}", parent.display())))?;
        }
        let conn = Connection::open(path)?;
        catalog_info!("opened catalog database at {:?}", path);
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        add_type_column(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts every seed problem not already present; returns how many were added.
    pub fn seed(&self, seed: &dyn SeedProvider) -> Result<usize, StoreError> {
        let mut conn = self.lock()?;
        let mut added = 0;
        for problem in seed.problems()? {
            match insert_checked(&mut conn, &problem) {
                Ok(()) => added += 1,
                Err(StoreError::DuplicateUrl { .. } | StoreError::DuplicateIdentifier(_)) => {
                    catalog_debug!("seed: {} already present", problem.identifier);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(added)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Backend("sqlite connection lock poisoned".to_string()))
    }
}

/// Databases created before problems carried a type lack the column.
fn add_type_column(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('problems')")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    if !columns.iter().any(|column| column == "type") {
        catalog_info!("adding type column to problems table");
        conn.execute_batch("ALTER TABLE problems ADD COLUMN type TEXT")?;
    }
    Ok(())
}

/// Checks uniqueness and inserts inside one transaction, so a duplicate url
/// is rejected before any row is written.
fn insert_checked(conn: &mut Connection, problem: &Problem) -> Result<(), StoreError> {
    let record = ProblemRecord::from_problem(problem);
    let tx = conn.transaction()?;

    let url_taken: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM problems WHERE url = ?1)",
        params![record.url],
        |row| row.get(0),
    )?;
    if url_taken {
        return Err(StoreError::DuplicateUrl { url: record.url });
    }
    let id_taken: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM problems WHERE identifier = ?1)",
        params![record.identifier],
        |row| row.get(0),
    )?;
    if id_taken {
        return Err(StoreError::DuplicateIdentifier(record.identifier));
    }

    let tags = serde_json::to_string(&record.tags)
        .map_err(|err| StoreError::Backend(err.to_string()))?;
    tx.execute(
        &format!(
            "INSERT INTO problems ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        ),
        params![
            record.identifier,
            record.name,
            tags,
            record.difficulty,
            record.url,
            record.solved,
            record.date_added,
            record.added_by,
            record.added_by_url,
            record.likes,
            record.dislikes,
            record.problem_type,
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Raw row with tags still JSON-encoded.
struct RawRow {
    record: ProblemRecord,
    tags_json: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        record: ProblemRecord {
            identifier: row.get(0)?,
            name: row.get(1)?,
            tags: Vec::new(),
            difficulty: row.get(3)?,
            url: row.get(4)?,
            solved: row.get(5)?,
            date_added: row.get(6)?,
            added_by: row.get(7)?,
            added_by_url: row.get(8)?,
            likes: row.get(9)?,
            dislikes: row.get(10)?,
            problem_type: row.get(11)?,
        },
        tags_json: row.get(2)?,
    })
}

fn into_problem(raw: RawRow) -> Result<Problem, StoreError> {
    let RawRow {
        mut record,
        tags_json,
    } = raw;
    record.tags = serde_json::from_str(&tags_json).map_err(|err| StoreError::CorruptRow {
        identifier: record.identifier.clone(),
        reason: format!("tags: {err}"),
    })?;
    record.into_problem()
}

fn select_one(conn: &Connection, identifier: &str) -> Result<Option<Problem>, StoreError> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM problems WHERE identifier = ?1"),
            params![identifier],
            read_row,
        )
        .optional()?;
    raw.map(into_problem).transpose()
}

#[async_trait::async_trait]
impl ProblemStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Problem>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM problems ORDER BY id"))?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(into_problem).collect()
    }

    async fn get(&self, identifier: &str) -> Result<Option<Problem>, StoreError> {
        let conn = self.lock()?;
        select_one(&conn, identifier)
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM problems WHERE url = ?1)",
            params![url],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    async fn insert(&self, problem: &Problem) -> Result<String, StoreError> {
        let mut conn = self.lock()?;
        insert_checked(&mut conn, problem)?;
        catalog_debug!("sqlite store: inserted {}", problem.identifier);
        Ok(problem.identifier.clone())
    }

    async fn update_counts(
        &self,
        identifier: &str,
        counts: Counts,
    ) -> Result<Problem, StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE problems SET likes = ?1, dislikes = ?2 WHERE identifier = ?3",
            params![counts.likes, counts.dislikes, identifier],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(identifier.to_string()));
        }
        select_one(&conn, identifier)?.ok_or_else(|| StoreError::NotFound(identifier.to_string()))
    }
}
