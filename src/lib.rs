pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use catalog::models::{UnitDefinition, UnitDictionary, UnitKind};
pub use config::Config;
pub use error::CatalogError;
pub use render::CatalogRenderer;
