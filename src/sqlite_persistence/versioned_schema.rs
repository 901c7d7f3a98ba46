use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::error::PersistenceError;

type Result<T> = std::result::Result<T, PersistenceError>;

/// Offset added to the schema version stored in `PRAGMA user_version`, so a
/// database created by something else (version 0) is never mistaken for ours.
pub const BASE_DB_VERSION: usize = 7000;

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            #[allow(unused_mut)]
            let mut column = Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
        }
    }

    fn from_sql(s: &str) -> Option<&'static SqlType> {
        match s {
            "TEXT" => Some(&SqlType::Text),
            "INTEGER" => Some(&SqlType::Integer),
            "REAL" => Some(&SqlType::Real),
            _ => None,
        }
    }
}

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
}

pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    /// (index name, indexed column)
    pub indices: &'static [(&'static str, &'static str)],
    pub unique_constraints: &'static [&'static [&'static str]],
}

impl Table {
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let mut sql = format!("{} {}", column.name, column.sql_type.as_sql());
                if column.is_primary_key {
                    sql.push_str(" PRIMARY KEY");
                }
                if column.non_null {
                    sql.push_str(" NOT NULL");
                }
                sql
            })
            .collect();
        for unique_constraint in self.unique_constraints {
            parts.push(format!("UNIQUE ({})", unique_constraint.join(", ")));
        }
        format!("CREATE TABLE {} ({});", self.name, parts.join(", "))
    }

    pub fn create(&self, conn: &Connection) -> Result<()> {
        conn.execute(&self.create_sql(), params![])?;
        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )?;
        }
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        struct ActualColumn {
            name: String,
            sql_type: String,
            non_null: bool,
            is_primary_key: bool,
        }

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", self.name))?;
        let actual: Vec<ActualColumn> = stmt
            .query_map(params![], |row| {
                Ok(ActualColumn {
                    name: row.get(1)?,
                    sql_type: row.get(2)?,
                    non_null: row.get::<_, i32>(3)? == 1,
                    is_primary_key: row.get::<_, i32>(5)? > 0,
                })
            })?
            .collect::<std::result::Result<_, _>>()?;

        if actual.len() != self.columns.len() {
            return Err(schema_error(format!(
                "Table {} has {} columns, expected {}. Found column names: {}",
                self.name,
                actual.len(),
                self.columns.len(),
                actual
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        for (actual_column, expected) in actual.iter().zip(self.columns.iter()) {
            if actual_column.name != expected.name {
                return Err(schema_error(format!(
                    "Table {} column name mismatch: expected {}, got {}",
                    self.name, expected.name, actual_column.name
                )));
            }
            if SqlType::from_sql(&actual_column.sql_type) != Some(expected.sql_type) {
                return Err(schema_error(format!(
                    "Table {} column {} type mismatch: expected {:?}, got {}",
                    self.name, expected.name, expected.sql_type, actual_column.sql_type
                )));
            }
            if actual_column.non_null != expected.non_null {
                return Err(schema_error(format!(
                    "Table {} column {} non-null mismatch: expected {}, got {}",
                    self.name, expected.name, expected.non_null, actual_column.non_null
                )));
            }
            if actual_column.is_primary_key != expected.is_primary_key {
                return Err(schema_error(format!(
                    "Table {} column {} primary key mismatch: expected {}, got {}",
                    self.name, expected.name, expected.is_primary_key, actual_column.is_primary_key
                )));
            }
        }

        for (index_name, _column) in self.indices {
            let index_exists = conn
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1 AND tbl_name=?2",
                    params![index_name, self.name],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !index_exists {
                return Err(schema_error(format!(
                    "Table {} is missing index '{}'",
                    self.name, index_name
                )));
            }
        }

        if !self.unique_constraints.is_empty() {
            let unique_column_sets = unique_index_columns(conn, self.name)?;
            for expected_columns in self.unique_constraints {
                let mut expected: Vec<&str> = expected_columns.to_vec();
                expected.sort();
                let found = unique_column_sets
                    .iter()
                    .any(|cols| cols.iter().map(String::as_str).eq(expected.iter().copied()));
                if !found {
                    return Err(schema_error(format!(
                        "Table {} is missing unique constraint on columns ({})",
                        self.name,
                        expected_columns.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Sorted column lists of every unique index on `table`.
fn unique_index_columns(conn: &Connection, table: &str) -> Result<Vec<Vec<String>>> {
    let mut stmt = conn.prepare(&format!("PRAGMA index_list({})", table))?;
    let unique_indices: Vec<String> = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i32>(2)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?
        .into_iter()
        .filter(|(_, is_unique)| *is_unique == 1)
        .map(|(name, _)| name)
        .collect();

    let mut out = Vec::with_capacity(unique_indices.len());
    for index_name in unique_indices {
        let mut stmt = conn.prepare(&format!("PRAGMA index_info({})", index_name))?;
        let mut cols: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(2))?
            .collect::<rusqlite::Result<_>>()?;
        cols.sort();
        out.push(cols);
    }
    Ok(out)
}

fn schema_error(message: String) -> PersistenceError {
    PersistenceError::Schema(message)
}

pub struct VersionedSchema {
    pub version: usize,
    pub tables: &'static [Table],
    pub migration: Option<fn(&Connection) -> rusqlite::Result<()>>,
}

impl VersionedSchema {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        for table in self.tables {
            table.create(conn)?;
        }
        conn.pragma_update(None, "user_version", BASE_DB_VERSION + self.version)?;
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        for table in self.tables {
            table.validate(conn)?;
        }
        Ok(())
    }
}

/// Brings `conn` to the latest of `schemas`.
///
/// An empty database gets the latest schema directly. A database at an
/// older version runs every later migration inside one transaction. The
/// result is validated against the latest schema in both cases.
pub fn migrate_if_needed(conn: &mut Connection, schemas: &[VersionedSchema]) -> Result<()> {
    let latest = schemas
        .last()
        .ok_or_else(|| schema_error("No schema versions defined".to_string()))?;

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating warehouse db schema at version {}", latest.version);
        let tx = conn.transaction()?;
        latest.create(&tx)?;
        tx.commit()?;
        return Ok(());
    }

    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if db_version < BASE_DB_VERSION as i64 {
        return Err(schema_error(format!(
            "Database has user_version {}, it was not created by this tool",
            db_version
        )));
    }
    let mut current_version = (db_version - BASE_DB_VERSION as i64) as usize;
    if current_version > latest.version {
        return Err(schema_error(format!(
            "Database schema version {} is newer than the supported version {}",
            current_version, latest.version
        )));
    }

    if current_version < latest.version {
        let from_version = current_version;
        let tx = conn.transaction()?;
        for schema in schemas.iter().filter(|s| s.version > from_version) {
            if let Some(migration_fn) = schema.migration {
                info!(
                    "Migrating warehouse db from version {} to {}",
                    current_version, schema.version
                );
                migration_fn(&tx)?;
            }
            current_version = schema.version;
        }
        tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
        tx.commit()?;
    }

    latest.validate(conn)
}
