use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenderConfig {
    // Page <title>; the document name is used when absent
    #[serde(default)]
    pub title: Option<String>,

    // Replaces the fixed informational note under the header
    #[serde(default)]
    pub note: Option<String>,

    // Inline CSS emitted in <head>
    #[serde(default)]
    pub stylesheet: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    // Catalog symbols dropped while loading
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl CatalogConfig {
    pub fn ignored_symbols(&self) -> HashSet<&str> {
        self.ignore.iter().map(String::as_str).collect()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.render.title.is_none());
        assert!(config.render.note.is_none());
        assert!(config.catalog.ignore.is_empty());
    }

    #[test]
    fn test_parse_sections() {
        let config = Config::from_toml(
            r#"
[render]
title = "Field Units"
note = "Internal use only."

[catalog]
ignore = ["Mm", "angstrom"]
"#,
        )
        .unwrap();

        assert_eq!(config.render.title.as_deref(), Some("Field Units"));
        assert_eq!(config.render.note.as_deref(), Some("Internal use only."));
        assert!(config.render.stylesheet.is_none());

        let ignored = config.catalog.ignored_symbols();
        assert!(ignored.contains("Mm"));
        assert!(ignored.contains("angstrom"));
        assert!(!ignored.contains("m"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = Config::from_toml("[render\ntitle = 1");
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }
}
