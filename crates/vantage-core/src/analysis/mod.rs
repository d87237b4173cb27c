use crate::data::sentiment::SentimentTable;
use crate::data::trades::TradeTable;
use crate::types::{MergedRow, SentimentBucket};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub mod columns;

pub use columns::{detect_roles, ColumnRef, ColumnRoles, ColumnSource};

/// Strip thousands separators and currency symbols before numeric coercion.
/// Anything that still fails to parse becomes missing.
pub fn clean_money(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

pub fn parse_numeric(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Inner join on the date key: one output pair per (trade row, sentiment
/// row) match, so duplicate sentiment days multiply matches.
pub fn merge_on_date(trades: &TradeTable, sentiment: &SentimentTable) -> Vec<(usize, usize)> {
    let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for (index, date) in sentiment.dates.iter().enumerate() {
        by_date.entry(*date).or_default().push(index);
    }

    let mut pairs = Vec::new();
    for (trade_index, date) in trades.dates.iter().enumerate() {
        if let Some(matches) = by_date.get(date) {
            for sentiment_index in matches {
                pairs.push((trade_index, *sentiment_index));
            }
        }
    }
    pairs
}

pub fn build_merged_rows(
    trades: &TradeTable,
    sentiment: &SentimentTable,
    roles: &ColumnRoles,
) -> Vec<MergedRow> {
    let fetch = |trade_index: usize, sentiment_index: usize, column: ColumnRef| -> &str {
        match column.source {
            ColumnSource::Trades => trades.table.value(trade_index, column.index),
            ColumnSource::Sentiment => sentiment.table.value(sentiment_index, column.index),
        }
    };

    merge_on_date(trades, sentiment)
        .into_iter()
        .map(|(trade_index, sentiment_index)| {
            let pnl = roles
                .pnl
                .and_then(|column| clean_money(fetch(trade_index, sentiment_index, column)));
            let leverage = roles
                .leverage
                .and_then(|column| parse_numeric(fetch(trade_index, sentiment_index, column)));
            let score = roles
                .sentiment_score
                .and_then(|column| parse_numeric(fetch(trade_index, sentiment_index, column)));
            MergedRow {
                date: trades.dates[trade_index],
                pnl,
                leverage,
                sentiment_score: score,
                bucket: SentimentBucket::from_score(score),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketStats {
    pub bucket: SentimentBucket,
    pub trades: usize,
    pub mean_pnl: Option<f64>,
    pub win_rate: f64,
}

/// Per-bucket aggregates in fixed chart order, restricted to buckets that
/// actually occur. Mean PnL skips missing values; the win rate counts them
/// as losses (a missing PnL is not strictly positive).
pub fn bucket_stats(rows: &[MergedRow]) -> Vec<BucketStats> {
    SentimentBucket::CHART_ORDER
        .iter()
        .filter_map(|bucket| {
            let members: Vec<&MergedRow> = rows.iter().filter(|row| row.bucket == *bucket).collect();
            if members.is_empty() {
                return None;
            }
            let pnls: Vec<f64> = members.iter().filter_map(|row| row.pnl).collect();
            let mean_pnl = if pnls.is_empty() {
                None
            } else {
                Some(pnls.iter().sum::<f64>() / pnls.len() as f64)
            };
            let wins = members.iter().filter(|row| row.is_win()).count();
            Some(BucketStats {
                bucket: *bucket,
                trades: members.len(),
                mean_pnl,
                win_rate: wins as f64 / members.len() as f64,
            })
        })
        .collect()
}

/// (sentiment score, leverage) pairs where both sides are present.
pub fn scatter_points(rows: &[MergedRow]) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|row| match (row.sentiment_score, row.leverage) {
            (Some(score), Some(leverage)) if score.is_finite() && leverage.is_finite() => {
                Some((score, leverage))
            }
            _ => None,
        })
        .collect()
}
