use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog file used when `--catalog` is not given. `None` means the
    /// built-in seed catalog.
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_path = lookup("SCHOLARSHIP_CATALOG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let log_filter =
            lookup("RUST_LOG").unwrap_or_else(|| "scholarship_match=info".to_string());
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            catalog_path,
            log_filter,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.log_filter, "scholarship_match=info");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_catalog_and_logging_settings() {
        let config = config_from(&[
            ("SCHOLARSHIP_CATALOG", "data/catalog.csv"),
            ("RUST_LOG", "scholarship_match=debug"),
            ("LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.catalog_path, Some(PathBuf::from("data/catalog.csv")));
        assert_eq!(config.log_filter, "scholarship_match=debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_catalog_path_means_seed_catalog() {
        assert_eq!(config_from(&[("SCHOLARSHIP_CATALOG", "  ")]).catalog_path, None);
    }
}
