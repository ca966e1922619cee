use crate::catalog::index::SymbolIndex;
use crate::catalog::models::{UnitDefinition, UnitKind};
use crate::render::coefficients::{resolve_coefficients, Coefficients};

pub const DEPRECATED_MARKER: &str = "(Deprecated)";

// One row of the base-units table, cell text before escaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUnitRow<'a> {
    pub name: &'a str,
    pub quantity_types: &'a [String],
    pub catalog_name: &'a str,
    pub catalog_symbol: &'a str,
    pub rp66_symbol: &'a str,
    pub description: &'a str,
}

// One row of the customary-units table, cell text before escaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomaryUnitRow<'a> {
    pub name: &'a str,
    pub quantity_types: &'a [String],
    pub catalog_name: &'a str,
    pub catalog_symbol: &'a str,
    pub deprecated: bool,
    pub rp66_symbol: &'a str,
    pub base_unit: String,
    pub coefficients: Coefficients,
}

impl CustomaryUnitRow<'_> {
    pub fn symbol_display(&self) -> String {
        if self.deprecated {
            format!("{} {}", self.catalog_symbol, DEPRECATED_MARKER)
        } else {
            self.catalog_symbol.to_string()
        }
    }
}

pub fn base_unit_rows(units: &[UnitDefinition]) -> Vec<BaseUnitRow<'_>> {
    units
        .iter()
        .filter_map(|unit| match &unit.kind {
            UnitKind::Base { description } => Some(BaseUnitRow {
                name: &unit.name,
                quantity_types: &unit.quantity_types,
                catalog_name: &unit.catalog_name,
                catalog_symbol: &unit.catalog_symbol,
                rp66_symbol: unit.rp66_symbol().unwrap_or_default(),
                description: description.as_str(),
            }),
            UnitKind::Conversion(_) => None,
        })
        .collect()
}

pub fn customary_unit_rows<'a>(
    units: &'a [UnitDefinition],
    index: &SymbolIndex,
) -> Vec<CustomaryUnitRow<'a>> {
    units
        .iter()
        .filter_map(|unit| {
            let conversion = unit.conversion_to_base()?;
            Some(CustomaryUnitRow {
                name: &unit.name,
                quantity_types: &unit.quantity_types,
                catalog_name: &unit.catalog_name,
                catalog_symbol: &unit.catalog_symbol,
                deprecated: unit.deprecated,
                rp66_symbol: unit.rp66_symbol().unwrap_or_default(),
                base_unit: index.resolve_base_unit(&conversion.base_unit),
                coefficients: resolve_coefficients(conversion),
            })
        })
        .collect()
}
