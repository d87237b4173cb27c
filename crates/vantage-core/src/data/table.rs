use std::fs::File;
use std::path::Path;

/// Row-oriented string table with normalized column names. Both inputs have
/// open-ended schemas, so cells stay untyped until a column role is known.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_csv(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|err| format!("failed to open CSV {}: {}", path.display(), err))?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|err| format!("failed to read CSV headers {}: {}", path.display(), err))?
            .iter()
            .map(normalize_column)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record =
                result.map_err(|err| format!("failed to parse CSV row {}: {}", path.display(), err))?;
            let mut row: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
            // Ragged rows are padded/truncated to the header width.
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when the column has at least one non-empty cell and every
    /// non-empty cell parses as a number.
    pub fn is_numeric_column(&self, column: usize) -> bool {
        let mut seen = false;
        for row in &self.rows {
            let raw = row.get(column).map(String::as_str).unwrap_or("").trim();
            if raw.is_empty() {
                continue;
            }
            if raw.parse::<f64>().is_err() {
                return false;
            }
            seen = true;
        }
        seen
    }
}

pub fn normalize_column(raw: &str) -> String {
    raw.trim().to_lowercase()
}
