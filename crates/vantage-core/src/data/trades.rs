use crate::data::dates;
use crate::data::table::Table;
use chrono::NaiveDate;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDateSource {
    EpochMillis,
    LocalizedString,
}

#[derive(Debug, Default)]
pub struct TradeLoadReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub date_source: Option<TradeDateSource>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Trade rows that survived date parsing; `dates` is parallel to
/// `table.rows`.
#[derive(Debug)]
pub struct TradeTable {
    pub table: Table,
    pub dates: Vec<NaiveDate>,
}

pub fn load_csv(path: &Path) -> Result<(TradeTable, TradeLoadReport), String> {
    let table = Table::from_csv(path)?;
    let mut report = TradeLoadReport {
        rows_read: table.rows.len(),
        ..TradeLoadReport::default()
    };

    // Prefer a numeric epoch-millisecond column over the localized string one.
    let (source, column) = match table.column_index("timestamp") {
        Some(idx) if table.is_numeric_column(idx) => (TradeDateSource::EpochMillis, idx),
        _ => match table.column_index("timestamp ist") {
            Some(idx) => (TradeDateSource::LocalizedString, idx),
            None => {
                return Err(format!(
                    "no recognizable time column in trader data {} \
                     (expected numeric 'timestamp' or 'timestamp ist')",
                    path.display()
                ))
            }
        },
    };
    report.date_source = Some(source);
    tracing::info!(
        source = ?source,
        column = %table.columns[column],
        "trader date column selected"
    );

    let Table { columns, rows } = table;
    let mut kept_rows = Vec::with_capacity(rows.len());
    let mut dates = Vec::with_capacity(rows.len());

    for row in rows {
        let raw = row.get(column).map(String::as_str).unwrap_or("");
        let parsed = match source {
            TradeDateSource::EpochMillis => dates::parse_epoch_millis(raw),
            TradeDateSource::LocalizedString => dates::parse_day_first(raw),
        };
        match parsed {
            Some(date) => {
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
        TradeTable {
            table: Table {
                columns,
                rows: kept_rows,
            },
            dates,
        },
        report,
    ))
}
