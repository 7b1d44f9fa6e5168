use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, ToSql};

use crate::fields::Field;
use crate::notice::Notice;

const TABLE: &str = "data";

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    let columns: Vec<String> = Field::ALL
        .iter()
        .map(|f| format!("{} TEXT", f.column()))
        .collect();
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {} (
            link TEXT PRIMARY KEY,
            {},
            lat  REAL,
            lng  REAL
        );",
        TABLE,
        columns.join(",\n            "),
    ))?;
    Ok(())
}

fn table_exists(conn: &Connection) -> Result<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [TABLE],
        |r| r.get(0),
    )?;
    Ok(n > 0)
}

/// Links already saved by earlier runs. A missing table means none.
pub fn existing_links(conn: &Connection) -> Result<HashSet<String>> {
    if !table_exists(conn)? {
        return Ok(HashSet::new());
    }
    let mut stmt = conn.prepare(&format!("SELECT link FROM {}", TABLE))?;
    let links = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<HashSet<String>, _>>()?;
    Ok(links)
}

/// Upsert notices keyed by `link`, creating the table on first use.
pub fn save_notices(conn: &Connection, notices: &[Notice]) -> Result<usize> {
    init_schema(conn)?;

    let mut columns = vec!["link"];
    columns.extend(Field::ALL.iter().map(|f| f.column()));
    columns.extend(["lat", "lng"]);
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
        TABLE,
        columns.join(", "),
        placeholders.join(", "),
    );

    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(&sql)?;
        for n in notices {
            let values: Vec<Option<&str>> = Field::ALL.iter().map(|f| n.get(*f)).collect();
            let lat = n.location.map(|l| l.lat);
            let lng = n.location.map(|l| l.lng);

            let mut params: Vec<&dyn ToSql> = Vec::with_capacity(columns.len());
            params.push(&n.link);
            params.extend(values.iter().map(|v| v as &dyn ToSql));
            params.push(&lat);
            params.push(&lng);

            count += stmt.execute(params.as_slice())?;
        }
    }
    tx.commit()?;
    Ok(count)
}
