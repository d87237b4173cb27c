#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    Trades,
    Sentiment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub source: ColumnSource,
    pub index: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnRoles {
    pub pnl: Option<ColumnRef>,
    pub leverage: Option<ColumnRef>,
    pub sentiment_score: Option<ColumnRef>,
}

/// Heuristic substring matching over the merged column namespace, trade
/// columns first, first match wins. A wrong pick on an unusual schema is a
/// known risk; the chosen column is logged per role so it stays visible.
pub fn detect_roles(trade_columns: &[String], sentiment_columns: &[String]) -> ColumnRoles {
    let merged: Vec<(ColumnRef, &str)> = trade_columns
        .iter()
        .enumerate()
        .map(|(index, name)| {
            (
                ColumnRef {
                    source: ColumnSource::Trades,
                    index,
                },
                name.as_str(),
            )
        })
        .chain(sentiment_columns.iter().enumerate().map(|(index, name)| {
            (
                ColumnRef {
                    source: ColumnSource::Sentiment,
                    index,
                },
                name.as_str(),
            )
        }))
        .collect();

    let find = |role: &str, pred: &dyn Fn(&str) -> bool| -> Option<ColumnRef> {
        match merged.iter().find(|(_, name)| pred(name)) {
            Some((column, name)) => {
                tracing::info!(role, column = *name, "column role detected");
                Some(*column)
            }
            None => {
                tracing::warn!(role, "no matching column; dependent analyses will be skipped");
                None
            }
        }
    };

    ColumnRoles {
        pnl: find("pnl", &|name| {
            name.contains("closed pnl") || name.contains("closed_pnl") || name.contains("pnl")
        }),
        leverage: find("leverage", &|name| name.contains("leverage")),
        sentiment_score: find("sentiment_score", &|name| {
            name.contains("value") && !name.contains("size")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_roles, ColumnSource};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn detects_roles_across_both_tables() {
        let trades = cols(&["account", "closed pnl", "leverage", "size usd", "timestamp"]);
        let sentiment = cols(&["date", "value", "classification"]);

        let roles = detect_roles(&trades, &sentiment);
        let pnl = roles.pnl.expect("pnl");
        assert_eq!(pnl.source, ColumnSource::Trades);
        assert_eq!(pnl.index, 1);
        let leverage = roles.leverage.expect("leverage");
        assert_eq!(leverage.index, 2);
        let score = roles.sentiment_score.expect("score");
        assert_eq!(score.source, ColumnSource::Sentiment);
        assert_eq!(score.index, 1);
    }

    #[test]
    fn size_columns_do_not_match_the_score_role() {
        let trades = cols(&["size usd", "pnl", "timestamp"]);
        let sentiment = cols(&["date", "value"]);

        let roles = detect_roles(&trades, &sentiment);
        let score = roles.sentiment_score.expect("score");
        assert_eq!(score.source, ColumnSource::Sentiment);
        assert_eq!(score.index, 1);
    }

    #[test]
    fn absent_roles_are_tolerated() {
        let trades = cols(&["account", "timestamp"]);
        let sentiment = cols(&["date", "classification"]);

        let roles = detect_roles(&trades, &sentiment);
        assert!(roles.pnl.is_none());
        assert!(roles.leverage.is_none());
        assert!(roles.sentiment_score.is_none());
    }

    #[test]
    fn first_match_wins() {
        let trades = cols(&["pnl", "realized pnl", "timestamp"]);
        let sentiment = cols(&["date", "value"]);

        let roles = detect_roles(&trades, &sentiment);
        assert_eq!(roles.pnl.expect("pnl").index, 0);
    }
}
