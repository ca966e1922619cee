use crate::catalog::index::SymbolIndex;
use crate::catalog::models::UnitDictionary;
use serde::Serialize;
use std::collections::HashMap;

// Units grouped under the base unit they convert to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseUnitCategory {
    #[serde(rename = "baseUnit")]
    pub base_unit: String,

    #[serde(rename = "quantityTypes")]
    pub quantity_types: Vec<String>,

    pub units: Vec<String>,
}

/// Group every unit under its resolved base unit, keeping first-seen order for
/// both the groups and their members.
pub fn group_by_base_unit(dictionary: &UnitDictionary) -> Vec<BaseUnitCategory> {
    let index = SymbolIndex::new(dictionary);
    let mut categories: Vec<BaseUnitCategory> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for unit in &dictionary.units {
        let base_unit = match unit.conversion_to_base() {
            Some(conversion) => index.resolve_base_unit(&conversion.base_unit),
            None => unit.catalog_symbol.clone(),
        };

        let position = match positions.get(&base_unit) {
            Some(&position) => position,
            None => {
                positions.insert(base_unit.clone(), categories.len());
                categories.push(BaseUnitCategory {
                    base_unit,
                    quantity_types: Vec::new(),
                    units: Vec::new(),
                });
                categories.len() - 1
            }
        };

        let category = &mut categories[position];
        for quantity_type in &unit.quantity_types {
            if !category.quantity_types.contains(quantity_type) {
                category.quantity_types.push(quantity_type.clone());
            }
        }
        category.units.push(unit.catalog_symbol.clone());
    }

    categories
}
