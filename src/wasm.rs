// WebAssembly bindings for the unit catalog
use crate::catalog;
use crate::config::Config;
use crate::query;
use crate::render::CatalogRenderer;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct CatalogWasm {
    config: Config,
}

impl Default for CatalogWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CatalogWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: Config::empty(),
        }
    }

    /// Replace the renderer/catalog options with a TOML document
    #[wasm_bindgen]
    pub fn set_config(&mut self, config_toml: &str) -> Result<(), JsValue> {
        self.config = Config::from_toml(config_toml)
            .map_err(|e| JsValue::from_str(&format!("Failed to load config: {}", e)))?;
        Ok(())
    }

    /// Render POSC XML (document contents, not a path) to an HTML page
    #[wasm_bindgen]
    pub fn render_xml(&self, xml: &str) -> Result<String, JsValue> {
        let dictionary = self.load(xml)?;
        Ok(CatalogRenderer::new(self.config.render.clone()).render(&dictionary))
    }

    /// Returns JSON string of the parsed dictionary
    #[wasm_bindgen]
    pub fn export_xml(&self, xml: &str) -> Result<String, JsValue> {
        let dictionary = self.load(xml)?;
        serde_json::to_string(&dictionary)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize dictionary: {}", e)))
    }

    /// Query the dictionary using query path syntax
    /// Returns JSON string of the query result
    #[wasm_bindgen]
    pub fn query_xml(&self, xml: &str, query_str: &str) -> Result<String, JsValue> {
        let dictionary = self.load(xml)?;

        let executor = query::executor::QueryExecutor::new(&dictionary);
        let result = executor
            .execute_str(query_str)
            .map_err(|e| JsValue::from_str(&format!("Query error: {}", e)))?;

        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
    }

    /// Returns the validation report as text (empty when clean)
    #[wasm_bindgen]
    pub fn check_xml(&self, xml: &str) -> Result<String, JsValue> {
        let dictionary = self.load(xml)?;
        Ok(catalog::validate_dictionary(&dictionary).to_string())
    }
}

impl CatalogWasm {
    fn load(&self, xml: &str) -> Result<catalog::models::UnitDictionary, JsValue> {
        let mut dictionary = catalog::load_dictionary_from_str(xml)
            .map_err(|e| JsValue::from_str(&format!("Failed to load dictionary: {}", e)))?;
        catalog::apply_ignore_list(&mut dictionary, &self.config.catalog);
        Ok(dictionary)
    }
}
