use std::path::PathBuf;

/// Environment variable holding the log filter directive
pub const LOG_FILTER_ENV: &str = "VERSIONED_ENUM_LOG";

/// Log filter used when `VERSIONED_ENUM_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Returns the path to the data directory for versioned-enum.
/// Uses $XDG_DATA_HOME/versioned-enum if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/versioned-enum,
/// or ./versioned-enum if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default catalog file.
pub fn catalog_path() -> PathBuf {
    data_dir().join("catalog.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("versioned-enum.log")
}

/// Returns the log filter directive, falling back to [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> String {
    log_filter_with_env(std::env::var(LOG_FILTER_ENV).ok())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("versioned-enum")
}

fn log_filter_with_env(filter: Option<String>) -> String {
    filter
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/versioned-enum"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/versioned-enum"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./versioned-enum"));
    }

    #[rstest]
    #[case(Some("debug"), "debug")]
    #[case(Some("versioned_enum=trace"), "versioned_enum=trace")]
    #[case(Some("  "), "info")]
    #[case(None, "info")]
    fn log_filter_with_env_returns_expected(#[case] env: Option<&str>, #[case] expected: &str) {
        assert_eq!(log_filter_with_env(env.map(str::to_string)), expected);
    }
}
