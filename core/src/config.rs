//! Loading of the race configuration file.

use std::fs;
use std::path::Path;

use biathlon_types::RaceConfig;

use crate::error::ConfigError;

/// Read and parse a JSON race configuration.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RaceConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        laps = config.laps,
        firing_lines = config.firing_lines,
        start = %config.start,
        "Loaded race config"
    );
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<RaceConfig, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const SAMPLE: &str = r#"{
        "laps": 2,
        "lapLen": 3651,
        "penaltyLen": 50,
        "firingLines": 1,
        "start": "09:30:00.000",
        "startDelta": "00:00:30"
    }"#;

    #[test]
    fn test_load_config_from_file() {
        let path =
            std::env::temp_dir().join(format!("biathlon-config-{}.json", std::process::id()));
        fs::write(&path, SAMPLE).unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.laps, 2);
        assert_eq!(config.start_tolerance(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config("/nonexistent/biathlon/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_start_time_is_parse_error() {
        let text = SAMPLE.replace("09:30:00.000", "9:30");
        assert!(parse_config(&text).is_err());
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = parse_config(r#"{ "laps": 2 }"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
