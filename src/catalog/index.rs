use crate::catalog::models::{UnitDefinition, UnitDictionary};
use std::collections::HashMap;

// Separates a document/URI prefix from the catalog symbol in a base-unit reference
pub const FRAGMENT_MARKER: char = '#';

/// Read-only catalog-symbol lookup table, built once per dictionary.
pub struct SymbolIndex<'a> {
    units: HashMap<&'a str, &'a UnitDefinition>,
}

impl<'a> SymbolIndex<'a> {
    pub fn new(dictionary: &'a UnitDictionary) -> Self {
        let mut units = HashMap::with_capacity(dictionary.units.len());
        for unit in &dictionary.units {
            // First definition wins; duplicates are reported by validation
            units.entry(unit.catalog_symbol.as_str()).or_insert(unit);
        }
        Self { units }
    }

    pub fn get(&self, symbol: &str) -> Option<&'a UnitDefinition> {
        self.units.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Looks up the unit a base-unit reference points at.
    ///
    /// With a fragment marker only the text after the marker is used as the key;
    /// otherwise the whole reference is.
    pub fn lookup_reference(&self, reference: &str) -> Option<&'a UnitDefinition> {
        self.get(reference_key(reference))
    }

    /// Display text for a base-unit reference.
    ///
    /// A reference that resolves shows the matched unit's catalog symbol. One
    /// that does not shows the key itself (the text after the fragment marker,
    /// or the raw reference when there is no marker).
    pub fn resolve_base_unit(&self, reference: &str) -> String {
        let key = reference_key(reference);
        match self.get(key) {
            Some(unit) => unit.catalog_symbol.clone(),
            None => {
                tracing::debug!(reference, "Base unit reference not found in catalog");
                key.to_string()
            }
        }
    }
}

pub fn reference_key(reference: &str) -> &str {
    match reference.split_once(FRAGMENT_MARKER) {
        Some((_, fragment)) => fragment,
        None => reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::ConversionToBaseUnit;

    fn dictionary() -> UnitDictionary {
        UnitDictionary {
            units: vec![
                UnitDefinition::base("metre", "m", "length"),
                UnitDefinition::conversion("centimetre", "cm", ConversionToBaseUnit::new("#m")),
                UnitDefinition::base("duplicate metre", "m", "shadowed"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_key() {
        assert_eq!(reference_key("#m"), "m");
        assert_eq!(reference_key("posc.xml#m"), "m");
        assert_eq!(reference_key("m"), "m");
        assert_eq!(reference_key("#"), "");
    }

    #[test]
    fn test_first_duplicate_wins() {
        let dictionary = dictionary();
        let index = SymbolIndex::new(&dictionary);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("m").unwrap().name, "metre");
    }

    #[test]
    fn test_resolve_with_fragment() {
        let dictionary = dictionary();
        let index = SymbolIndex::new(&dictionary);
        assert_eq!(index.resolve_base_unit("#m"), "m");
        assert_eq!(index.resolve_base_unit("urn:posc#cm"), "cm");
    }

    #[test]
    fn test_unresolved_fragment_shows_stripped_key() {
        let dictionary = dictionary();
        let index = SymbolIndex::new(&dictionary);
        assert_eq!(index.resolve_base_unit("#furlong"), "furlong");
    }

    #[test]
    fn test_resolve_without_fragment() {
        let dictionary = dictionary();
        let index = SymbolIndex::new(&dictionary);
        assert_eq!(index.resolve_base_unit("cm"), "cm");
        assert_eq!(index.resolve_base_unit("ext:kelvin"), "ext:kelvin");
    }
}
