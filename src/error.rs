use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Expected root element 'UnitOfMeasureDictionary', found '{0}'")]
    UnexpectedRoot(String),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}
