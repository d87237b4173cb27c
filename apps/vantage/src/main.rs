use clap::Parser;
use std::path::PathBuf;
use vantage::config;
use vantage::run::{
    run, RunArgs, DEFAULT_OUT_DIR, DEFAULT_SENTIMENT_PATH, DEFAULT_TRADES_PATH,
};

#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(about = "Trader performance vs. market sentiment analyzer.", version)]
struct Cli {
    /// Trade history CSV path.
    #[arg(long)]
    trades: Option<PathBuf>,

    /// Daily fear/greed index CSV path.
    #[arg(long)]
    sentiment: Option<PathBuf>,

    /// Directory for rendered charts and the run summary.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Config file path (TOML). If omitted, uses env VANTAGE_CONFIG when set.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a single JSON line instead of human output.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let args = match resolve_args(&cli) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    match run(&args) {
        Ok(summary) => {
            if cli.json {
                println!("{}", summary);
            } else {
                println!(
                    "analysis complete: {} merged rows, charts in {}",
                    summary["merged_rows"],
                    args.out_dir.display()
                );
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() -> Result<(), String> {
    let filter = std::env::var("VANTAGE_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| format!("invalid log filter: {err}"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

/// CLI flags override the config file, which overrides built-in defaults.
fn resolve_args(cli: &Cli) -> Result<RunArgs, String> {
    let config_path = cli.config.clone().or_else(|| {
        std::env::var("VANTAGE_CONFIG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    });
    let paths = match config_path {
        Some(path) => config::load_config(&path)?.paths.unwrap_or_default(),
        None => config::PathsConfig::default(),
    };

    Ok(RunArgs {
        trades_path: cli
            .trades
            .clone()
            .or_else(|| paths.trades_path.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TRADES_PATH)),
        sentiment_path: cli
            .sentiment
            .clone()
            .or_else(|| paths.sentiment_path.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SENTIMENT_PATH)),
        out_dir: cli
            .out_dir
            .clone()
            .or_else(|| paths.out_dir.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
    })
}
