use crate::analysis::BucketStats;
use crate::types::SentimentBucket;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1200, 800);
const TEAL: RGBColor = RGBColor(0x00, 0x80, 0x80);

pub fn bucket_color(bucket: SentimentBucket) -> RGBColor {
    match bucket {
        SentimentBucket::ExtremeFear => RGBColor(0xd6, 0x27, 0x28),
        SentimentBucket::Fear => RGBColor(0xff, 0x7f, 0x0e),
        SentimentBucket::Greed => RGBColor(0x2c, 0xa0, 0x2c),
        SentimentBucket::ExtremeGreed => RGBColor(0x1f, 0x77, 0xb4),
        SentimentBucket::Unknown => RGBColor(0x7f, 0x7f, 0x7f),
    }
}

pub fn ensure_out_dir(dir: &Path) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create output dir {}: {}", dir.display(), err))
}

fn padded_range(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min - span * fraction, max + span * fraction)
    }
}

/// Mean PnL per sentiment bucket as a bar chart: per-bucket palette, dashed
/// zero line, and a dollar label above each non-negative bar, below each
/// negative one.
pub fn render_pnl_by_bucket(out_dir: &Path, stats: &[BucketStats]) -> Result<PathBuf, String> {
    let path = out_dir.join("pnl_by_sentiment.png");
    let values: Vec<f64> = stats
        .iter()
        .map(|stat| stat.mean_pnl.unwrap_or(0.0))
        .collect();
    let raw_min = values.iter().cloned().fold(0.0_f64, f64::min);
    let raw_max = values.iter().cloned().fold(0.0_f64, f64::max);
    let (y_min, y_max) = padded_range(raw_min, raw_max, 0.15);

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| format!("failed to fill chart background: {err}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Average Trader PnL per Sentiment Zone",
            ("sans-serif", 36).into_font(),
        )
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d((0..stats.len()).into_segmented(), y_min..y_max)
        .map_err(|err| format!("failed to build pnl chart: {err}"))?;

    let labels: Vec<&'static str> = stats.iter().map(|stat| stat.bucket.label()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) if *index < labels.len() => labels[*index].to_string(),
            _ => String::new(),
        })
        .x_desc("Market Sentiment")
        .y_desc("Average PnL (USD)")
        .axis_desc_style(("sans-serif", 24))
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(|err| format!("failed to draw pnl chart mesh: {err}"))?;

    chart
        .draw_series(stats.iter().enumerate().map(|(index, stat)| {
            let value = stat.mean_pnl.unwrap_or(0.0);
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0.0),
                    (SegmentValue::Exact(index + 1), value),
                ],
                bucket_color(stat.bucket).filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))
        .map_err(|err| format!("failed to draw pnl bars: {err}"))?;

    chart
        .draw_series(DashedLineSeries::new(
            vec![
                (SegmentValue::Exact(0), 0.0),
                (SegmentValue::Exact(stats.len()), 0.0),
            ],
            8,
            5,
            BLACK.stroke_width(2),
        ))
        .map_err(|err| format!("failed to draw zero line: {err}"))?;

    let offset = (y_max - y_min) * 0.02;
    chart
        .draw_series(stats.iter().enumerate().map(|(index, stat)| {
            let value = stat.mean_pnl.unwrap_or(0.0);
            let (y, v_pos) = if value >= 0.0 {
                (value + offset, VPos::Bottom)
            } else {
                (value - offset, VPos::Top)
            };
            let style = ("sans-serif", 20)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, v_pos));
            Text::new(
                format!("${:.2}", value),
                (SegmentValue::CenterOf(index), y),
                style,
            )
        }))
        .map_err(|err| format!("failed to draw pnl labels: {err}"))?;

    root.present()
        .map_err(|err| format!("failed to write {}: {err}", path.display()))?;
    drop(chart);
    drop(root);
    Ok(path)
}

/// Leverage versus raw sentiment score as a semi-transparent scatter.
pub fn render_leverage_scatter(out_dir: &Path, points: &[(f64, f64)]) -> Result<PathBuf, String> {
    let path = out_dir.join("leverage_vs_sentiment.png");
    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = padded_range(x_min, x_max, 0.05);
    let (y_min, y_max) = padded_range(y_min, y_max, 0.05);

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| format!("failed to fill chart background: {err}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Leverage Usage vs. Fear & Greed Index",
            ("sans-serif", 36).into_font(),
        )
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|err| format!("failed to build leverage chart: {err}"))?;

    chart
        .configure_mesh()
        .x_desc("Fear & Greed Index")
        .y_desc("Leverage (x)")
        .axis_desc_style(("sans-serif", 24))
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(|err| format!("failed to draw leverage chart mesh: {err}"))?;

    let point_style = RGBColor(0x2a, 0x78, 0x8e).mix(0.5).filled();
    chart
        .draw_series(
            points
                .iter()
                .map(|(score, leverage)| Circle::new((*score, *leverage), 6, point_style)),
        )
        .map_err(|err| format!("failed to draw leverage points: {err}"))?;

    root.present()
        .map_err(|err| format!("failed to write {}: {err}", path.display()))?;
    drop(chart);
    drop(root);
    Ok(path)
}

/// Win rate per sentiment bucket: teal bars on a 0..110% axis with percent
/// tick labels.
pub fn render_win_rate(out_dir: &Path, stats: &[BucketStats]) -> Result<PathBuf, String> {
    let path = out_dir.join("win_rate_by_sentiment.png");

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| format!("failed to fill chart background: {err}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Win Rate by Market Sentiment", ("sans-serif", 36).into_font())
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d((0..stats.len()).into_segmented(), 0.0..1.1_f64)
        .map_err(|err| format!("failed to build win-rate chart: {err}"))?;

    let labels: Vec<&'static str> = stats.iter().map(|stat| stat.bucket.label()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) if *index < labels.len() => labels[*index].to_string(),
            _ => String::new(),
        })
        .y_label_formatter(&|rate| format!("{:.0}%", rate * 100.0))
        .x_desc("Market Sentiment")
        .y_desc("Win Rate (%)")
        .axis_desc_style(("sans-serif", 24))
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(|err| format!("failed to draw win-rate chart mesh: {err}"))?;

    chart
        .draw_series(stats.iter().enumerate().map(|(index, stat)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0.0),
                    (SegmentValue::Exact(index + 1), stat.win_rate),
                ],
                TEAL.filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))
        .map_err(|err| format!("failed to draw win-rate bars: {err}"))?;

    chart
        .draw_series(stats.iter().enumerate().map(|(index, stat)| {
            let style = ("sans-serif", 20)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            Text::new(
                format!("{:.1}%", stat.win_rate * 100.0),
                (SegmentValue::CenterOf(index), stat.win_rate + 0.02),
                style,
            )
        }))
        .map_err(|err| format!("failed to draw win-rate labels: {err}"))?;

    root.present()
        .map_err(|err| format!("failed to write {}: {err}", path.display()))?;
    drop(chart);
    drop(root);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{ensure_out_dir, render_leverage_scatter, render_pnl_by_bucket, render_win_rate};
    use crate::analysis::BucketStats;
    use crate::types::SentimentBucket;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_tmp_dir(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("vantage_{name}_{}_{}", std::process::id(), now))
    }

    fn sample_stats() -> Vec<BucketStats> {
        vec![
            BucketStats {
                bucket: SentimentBucket::ExtremeFear,
                trades: 4,
                mean_pnl: Some(-12.5),
                win_rate: 0.25,
            },
            BucketStats {
                bucket: SentimentBucket::Greed,
                trades: 10,
                mean_pnl: Some(80.0),
                win_rate: 0.6,
            },
        ]
    }

    #[test]
    fn renders_all_three_charts() {
        let dir = unique_tmp_dir("charts");
        ensure_out_dir(&dir).expect("out dir");

        let stats = sample_stats();
        let points = vec![(20.0, 10.0), (55.0, 3.0), (80.0, 1.0)];

        let pnl = render_pnl_by_bucket(&dir, &stats).expect("pnl chart");
        let scatter = render_leverage_scatter(&dir, &points).expect("scatter chart");
        let win = render_win_rate(&dir, &stats).expect("win-rate chart");

        assert!(pnl.exists());
        assert!(scatter.exists());
        assert!(win.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn single_point_scatter_does_not_degenerate() {
        let dir = unique_tmp_dir("charts_single");
        ensure_out_dir(&dir).expect("out dir");

        let path = render_leverage_scatter(&dir, &[(50.0, 2.0)]).expect("scatter chart");
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
