use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub paths: Option<PathsConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub trades_path: Option<String>,
    pub sentiment_path: Option<String>,
    pub out_dir: Option<String>,
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_tmp_path(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("vantage_{name}_{}_{}", std::process::id(), now))
    }

    #[test]
    fn parses_paths_section() {
        let path = unique_tmp_path("config.toml");
        let toml_data = "[paths]\n\
trades_path = \"data/historical_data.csv\"\n\
sentiment_path = \"data/fear_greed_index.csv\"\n\
out_dir = \"images\"\n";
        fs::write(&path, toml_data).expect("write toml");

        let config = load_config(&path).expect("load config");
        let paths = config.paths.expect("paths");
        assert_eq!(paths.trades_path.as_deref(), Some("data/historical_data.csv"));
        assert_eq!(paths.out_dir.as_deref(), Some("images"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let path = unique_tmp_path("config_bad.toml");
        fs::write(&path, "[paths]\nsurprise = true\n").expect("write toml");

        let err = load_config(&path).expect_err("should fail");
        assert!(err.contains("failed to parse TOML"));
        let _ = fs::remove_file(&path);
    }
}
