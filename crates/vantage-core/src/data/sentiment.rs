use crate::data::dates;
use crate::data::table::Table;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentDateSource {
    DateColumn,
    TimestampColumn,
}

#[derive(Debug, Default)]
pub struct SentimentLoadReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub duplicate_dates: usize,
    pub date_source: Option<SentimentDateSource>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Sentiment rows that survived date parsing; `dates` is parallel to
/// `table.rows`. Duplicate days are kept (the join multiplies matches the
/// way a relational inner join would) but counted in the report.
#[derive(Debug)]
pub struct SentimentTable {
    pub table: Table,
    pub dates: Vec<NaiveDate>,
}

pub fn load_csv(path: &Path) -> Result<(SentimentTable, SentimentLoadReport), String> {
    let table = Table::from_csv(path)?;
    let mut report = SentimentLoadReport {
        rows_read: table.rows.len(),
        ..SentimentLoadReport::default()
    };

    let (source, column) = match table.column_index("date") {
        Some(idx) => (SentimentDateSource::DateColumn, idx),
        None => match table.column_index("timestamp") {
            Some(idx) => (SentimentDateSource::TimestampColumn, idx),
            None => {
                return Err(format!(
                    "no recognizable date column in sentiment data {} \
                     (expected 'date' or 'timestamp')",
                    path.display()
                ))
            }
        },
    };
    report.date_source = Some(source);
    tracing::info!(
        source = ?source,
        column = %table.columns[column],
        "sentiment date column selected"
    );

    let Table { columns, rows } = table;
    let mut kept_rows = Vec::with_capacity(rows.len());
    let mut dates = Vec::with_capacity(rows.len());
    let mut seen = BTreeSet::new();

    for row in rows {
        let raw = row.get(column).map(String::as_str).unwrap_or("");
        match dates::parse_day_first(raw) {
            Some(date) => {
                if !seen.insert(date) {
                    report.duplicate_dates += 1;
                }
                if report.first_date.map_or(true, |d| date < d) {
                    report.first_date = Some(date);
                }
                if report.last_date.map_or(true, |d| date > d) {
                    report.last_date = Some(date);
                }
                dates.push(date);
                kept_rows.push(row);
            }
            None => report.rows_dropped += 1,
        }
    }

    Ok((
        SentimentTable {
            table: Table {
                columns,
                rows: kept_rows,
            },
            dates,
        },
        report,
    ))
}
