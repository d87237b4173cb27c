use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use vantage_core::{analysis, chart, data};

pub const DEFAULT_TRADES_PATH: &str = "data/historical_data.csv";
pub const DEFAULT_SENTIMENT_PATH: &str = "data/fear_greed_index.csv";
pub const DEFAULT_OUT_DIR: &str = "images";

const TRADES_FALLBACK: &str = "historical_data.csv";
const SENTIMENT_FALLBACK: &str = "fear_greed_index.csv";

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub trades_path: PathBuf,
    pub sentiment_path: PathBuf,
    pub out_dir: PathBuf,
}

/// The whole pipeline, one sequential pass: load and clean both inputs,
/// inner-join on the date key, aggregate, render charts, write the summary
/// artifact. Returns a JSON status object describing what was produced.
pub fn run(args: &RunArgs) -> Result<serde_json::Value, String> {
    let trades_path = data::resolve_input_path("trader data", &args.trades_path, TRADES_FALLBACK)?;
    let sentiment_path =
        data::resolve_input_path("sentiment data", &args.sentiment_path, SENTIMENT_FALLBACK)?;

    tracing::info!(path = %trades_path.display(), "loading trader data");
    let (trades, trade_report) = data::trades::load_csv(&trades_path)?;
    tracing::info!(
        rows = trades.dates.len(),
        dropped = trade_report.rows_dropped,
        "trader data loaded"
    );

    tracing::info!(path = %sentiment_path.display(), "loading sentiment data");
    let (sentiment, sentiment_report) = data::sentiment::load_csv(&sentiment_path)?;
    tracing::info!(
        rows = sentiment.dates.len(),
        dropped = sentiment_report.rows_dropped,
        duplicate_dates = sentiment_report.duplicate_dates,
        "sentiment data loaded"
    );

    if let (Some(t_first), Some(t_last), Some(s_first), Some(s_last)) = (
        trade_report.first_date,
        trade_report.last_date,
        sentiment_report.first_date,
        sentiment_report.last_date,
    ) {
        tracing::info!(
            trader_range = %format!("{t_first} to {t_last}"),
            sentiment_range = %format!("{s_first} to {s_last}"),
            "input date ranges"
        );
        if !data::ranges_overlap((t_first, t_last), (s_first, s_last)) {
            tracing::warn!("trader and sentiment date ranges do not overlap");
        }
    }

    let roles = analysis::detect_roles(&trades.table.columns, &sentiment.table.columns);
    let rows = analysis::build_merged_rows(&trades, &sentiment, &roles);
    tracing::info!(merged_rows = rows.len(), "merged tables on date key");
    if rows.is_empty() {
        return Err("merged result is empty; the two inputs share no dates".to_string());
    }

    let stats = analysis::bucket_stats(&rows);
    chart::ensure_out_dir(&args.out_dir)?;
    let mut charts: Vec<String> = Vec::new();

    if roles.pnl.is_some() && roles.sentiment_score.is_some() && !stats.is_empty() {
        let path = chart::render_pnl_by_bucket(&args.out_dir, &stats)?;
        tracing::info!(path = %path.display(), "saved pnl chart");
        charts.push(path.display().to_string());
    } else {
        tracing::warn!("pnl or sentiment score column missing; skipping pnl chart");
    }

    let points = analysis::scatter_points(&rows);
    if roles.leverage.is_some() && !points.is_empty() {
        let path = chart::render_leverage_scatter(&args.out_dir, &points)?;
        tracing::info!(path = %path.display(), "saved leverage chart");
        charts.push(path.display().to_string());
    } else {
        tracing::warn!("leverage column missing or empty; skipping leverage chart");
    }

    if roles.pnl.is_some() && roles.sentiment_score.is_some() && !stats.is_empty() {
        let path = chart::render_win_rate(&args.out_dir, &stats)?;
        tracing::info!(path = %path.display(), "saved win-rate chart");
        charts.push(path.display().to_string());
    } else {
        tracing::warn!("pnl or sentiment score column missing; skipping win-rate chart");
    }

    let summary_path = args.out_dir.join("summary.json");
    write_summary_json(&summary_path, &rows, &stats)?;

    Ok(serde_json::json!({
        "status": "ok",
        "trader_rows": trades.dates.len(),
        "sentiment_rows": sentiment.dates.len(),
        "merged_rows": rows.len(),
        "charts": charts,
        "out_dir": args.out_dir.display().to_string(),
        "summary_json": summary_path.display().to_string(),
    }))
}

fn write_summary_json(
    path: &Path,
    rows: &[vantage_core::types::MergedRow],
    stats: &[analysis::BucketStats],
) -> Result<(), String> {
    let buckets: Vec<serde_json::Value> = stats
        .iter()
        .map(|stat| {
            serde_json::json!({
                "bucket": stat.bucket.label(),
                "trades": stat.trades,
                "mean_pnl": stat.mean_pnl,
                "win_rate": stat.win_rate,
            })
        })
        .collect();
    let json = serde_json::json!({
        "merged_rows": rows.len(),
        "buckets": buckets,
    });
    let json = serde_json::to_string_pretty(&json)
        .map_err(|err| format!("failed to serialize summary: {err}"))?;
    let mut file = fs::File::create(path)
        .map_err(|err| format!("failed to create summary {}: {}", path.display(), err))?;
    file.write_all(json.as_bytes())
        .map_err(|err| format!("failed to write summary {}: {}", path.display(), err))
}
