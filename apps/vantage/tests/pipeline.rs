use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use vantage::run::{run, RunArgs};

fn unique_tmp_dir(name: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("vantage_{name}_{}_{}", std::process::id(), now))
}

fn write_inputs(dir: &PathBuf, trades_csv: &str, sentiment_csv: &str) -> (PathBuf, PathBuf) {
    fs::create_dir_all(dir).expect("create tmp dir");
    let trades_path = dir.join("historical_data.csv");
    fs::write(&trades_path, trades_csv).expect("write trades csv");
    let sentiment_path = dir.join("fear_greed_index.csv");
    fs::write(&sentiment_path, sentiment_csv).expect("write sentiment csv");
    (trades_path, sentiment_path)
}

#[test]
fn pipeline_produces_charts_and_summary() {
    let dir = unique_tmp_dir("pipeline");
    // Epoch-millisecond timestamps on 2024-03-01 and 2024-03-02.
    let trades_csv = "Account,Closed PnL,Leverage,Timestamp\n\
a,\"$1,250.00\",10,1709290800000\n\
a,-40.5,5,1709294400000\n\
a,12.0,2,1709377200000\n";
    let sentiment_csv = "date,value,classification\n\
2024-03-01,20,Extreme Fear\n\
2024-03-02,80,Extreme Greed\n";
    let (trades_path, sentiment_path) = write_inputs(&dir, trades_csv, sentiment_csv);
    let out_dir = dir.join("images");

    let summary = run(&RunArgs {
        trades_path,
        sentiment_path,
        out_dir: out_dir.clone(),
    })
    .expect("pipeline run");

    assert_eq!(summary["status"], "ok");
    assert_eq!(summary["trader_rows"], 3);
    assert_eq!(summary["sentiment_rows"], 2);
    assert_eq!(summary["merged_rows"], 3);
    assert_eq!(summary["charts"].as_array().expect("charts").len(), 3);

    assert!(out_dir.join("pnl_by_sentiment.png").exists());
    assert!(out_dir.join("leverage_vs_sentiment.png").exists());
    assert!(out_dir.join("win_rate_by_sentiment.png").exists());

    let written = fs::read_to_string(out_dir.join("summary.json")).expect("summary.json");
    let parsed: serde_json::Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(parsed["merged_rows"], 3);
    let buckets = parsed["buckets"].as_array().expect("buckets");
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["bucket"], "Extreme Fear");
    assert_eq!(buckets[0]["win_rate"], 0.5);
    assert_eq!(buckets[1]["bucket"], "Extreme Greed");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn disjoint_date_ranges_abort_without_charts() {
    let dir = unique_tmp_dir("disjoint");
    let trades_csv = "Closed PnL,Timestamp\n10.0,1709290800000\n";
    let sentiment_csv = "date,value\n2020-01-01,50\n";
    let (trades_path, sentiment_path) = write_inputs(&dir, trades_csv, sentiment_csv);
    let out_dir = dir.join("images");

    let err = run(&RunArgs {
        trades_path,
        sentiment_path,
        out_dir: out_dir.clone(),
    })
    .expect_err("should fail on empty merge");

    assert!(err.contains("merged result is empty"));
    assert!(!out_dir.join("pnl_by_sentiment.png").exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_leverage_skips_scatter_only() {
    let dir = unique_tmp_dir("no_leverage");
    let trades_csv = "Closed PnL,Timestamp\n10.0,1709290800000\n-3.0,1709294400000\n";
    let sentiment_csv = "date,value\n2024-03-01,40\n";
    let (trades_path, sentiment_path) = write_inputs(&dir, trades_csv, sentiment_csv);
    let out_dir = dir.join("images");

    let summary = run(&RunArgs {
        trades_path,
        sentiment_path,
        out_dir: out_dir.clone(),
    })
    .expect("pipeline run");

    assert_eq!(summary["merged_rows"], 2);
    assert!(out_dir.join("pnl_by_sentiment.png").exists());
    assert!(!out_dir.join("leverage_vs_sentiment.png").exists());
    assert!(out_dir.join("win_rate_by_sentiment.png").exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_reports_both_candidates() {
    let err = run(&RunArgs {
        trades_path: PathBuf::from("/nonexistent/historical_data.csv"),
        sentiment_path: PathBuf::from("/nonexistent/fear_greed_index.csv"),
        out_dir: PathBuf::from("/tmp/vantage_unused"),
    })
    .expect_err("should fail");
    assert!(err.contains("could not find trader data"));
}
