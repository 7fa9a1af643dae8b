use anyhow::{Context, Result};
use std::io::Read;

/// Column names with a fixed meaning. Every other named column is a player.
pub const SPECIAL_COLUMN_NAMES: [&str; 7] =
    ["Date", "Type", "Buyin", "Guest", "Guest2", "Rebuys", "Notes"];

pub fn is_special_column(name: &str) -> bool {
    SPECIAL_COLUMN_NAMES.contains(&name)
}

/// One spreadsheet row: column name to cell text, in sheet column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell. A repeated column keeps its first position but takes the new value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some((_, v)) => *v = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Cell text, empty when the column is missing.
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn date(&self) -> &str {
        self.get_or_empty("Date")
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Non-empty person columns, in column order.
    pub fn players(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells()
            .filter(|(c, v)| !c.is_empty() && !v.is_empty() && !is_special_column(c))
    }
}

/// Reads a header-led CSV sheet into rows.
///
/// Short rows are allowed, missing trailing cells read as empty.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .context("Failed to read the header row")?
        .clone();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read data row {}", index + 1))?;
        let mut row = RawRow::new();
        for (i, column) in headers.iter().enumerate() {
            row.insert(column, record.get(i).unwrap_or(""));
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_maps_headers_to_cells() {
        let input = "Date,Buyin,Rebuys,alice,bob\n20230506, 20 ,,220,\n";
        let rows = read_rows(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date(), "20230506");
        assert_eq!(rows[0].get("Buyin"), Some("20"));
        assert_eq!(rows[0].get("bob"), Some(""));
        assert_eq!(rows[0].get("carol"), None);
    }

    #[test]
    fn test_short_row_reads_missing_cells_as_empty() {
        let input = "Date,Buyin,alice,bob\n20230506,20,40\n";
        let rows = read_rows(input.as_bytes()).unwrap();
        assert_eq!(rows[0].get("bob"), Some(""));
    }

    #[test]
    fn test_players_skip_special_empty_and_unnamed_columns() {
        let row = RawRow::new()
            .with("Date", "20230506")
            .with("Type", "cash")
            .with("Buyin", "20")
            .with("Notes", "late start")
            .with("alice", "40")
            .with("bob", "")
            .with("", "7")
            .with("carol", "0");

        let players: Vec<_> = row.players().collect();
        assert_eq!(players, vec![("alice", "40"), ("carol", "0")]);
    }

    #[test]
    fn test_repeated_column_keeps_position_and_last_value() {
        let mut row = RawRow::new().with("alice", "1").with("bob", "2");
        row.insert("alice", "3");
        let cells: Vec<_> = row.cells().collect();
        assert_eq!(cells, vec![("alice", "3"), ("bob", "2")]);
    }
}
