use rusqlite::{Connection, OptionalExtension as _};

pub(crate) fn table_exists(conn: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [table],
        |row| row.get(0),
    )
}

/// Declared type of `table.column`, `None` when the column is absent.
pub(crate) fn column_type(
    conn: &Connection,
    table: &str,
    column: &str,
) -> Result<Option<String>, rusqlite::Error> {
    conn.query_row(
        "SELECT type FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )
    .optional()
}

/// Returns `true` when the column was added, `false` when it already existed.
pub(crate) fn add_column_if_not_exists(
    conn: &Connection,
    table: &str,
    column: &str,
    col_type: &str,
) -> Result<bool, rusqlite::Error> {
    if column_type(conn, table, column)?.is_some() {
        return Ok(false);
    }
    let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {col_type}");
    conn.execute(&sql, [])?;
    Ok(true)
}

pub(crate) fn index_exists(conn: &Connection, index: &str) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1)",
        [index],
        |row| row.get(0),
    )
}

/// Text affinity per SQLite's type-name rules.
pub(crate) fn is_text_type(declared: &str) -> bool {
    let upper = declared.to_ascii_uppercase();
    upper.contains("CHAR") || upper.contains("TEXT") || upper.contains("CLOB")
}

/// Length bound of a `VARCHAR(n)` style declaration.
pub(crate) fn declared_length(declared: &str) -> Option<i32> {
    let open = declared.find('(')?;
    let close = declared[open..].find(')')? + open;
    declared[open + 1..close].trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_affinity() {
        assert!(is_text_type("VARCHAR(50)"));
        assert!(is_text_type("text"));
        assert!(is_text_type("NCHAR(10)"));
        assert!(!is_text_type("INTEGER"));
        assert!(!is_text_type(""));
    }

    #[test]
    fn varchar_length() {
        assert_eq!(declared_length("VARCHAR(50)"), Some(50));
        assert_eq!(declared_length("varchar( 12 )"), Some(12));
        assert_eq!(declared_length("TEXT"), None);
    }
}
