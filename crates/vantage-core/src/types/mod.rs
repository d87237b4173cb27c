use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SentimentBucket {
    ExtremeFear,
    Fear,
    Greed,
    ExtremeGreed,
    Unknown,
}

impl SentimentBucket {
    /// Fixed categorical-axis order. `Unknown` never appears on charts.
    pub const CHART_ORDER: [SentimentBucket; 4] = [
        SentimentBucket::ExtremeFear,
        SentimentBucket::Fear,
        SentimentBucket::Greed,
        SentimentBucket::ExtremeGreed,
    ];

    /// Thresholds 25, 50, 75 resolve to the upper bucket.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(value) if value.is_nan() => SentimentBucket::Unknown,
            Some(value) if value < 25.0 => SentimentBucket::ExtremeFear,
            Some(value) if value < 50.0 => SentimentBucket::Fear,
            Some(value) if value < 75.0 => SentimentBucket::Greed,
            Some(_) => SentimentBucket::ExtremeGreed,
            None => SentimentBucket::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentBucket::ExtremeFear => "Extreme Fear",
            SentimentBucket::Fear => "Fear",
            SentimentBucket::Greed => "Greed",
            SentimentBucket::ExtremeGreed => "Extreme Greed",
            SentimentBucket::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub pnl: Option<f64>,
    pub leverage: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub bucket: SentimentBucket,
}

impl MergedRow {
    /// A win is a strictly positive PnL; missing PnL is not a win.
    pub fn is_win(&self) -> bool {
        self.pnl.map_or(false, |pnl| pnl > 0.0)
    }
}
