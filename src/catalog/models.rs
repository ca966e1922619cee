use serde::Serialize;

// Naming system whose aliases are surfaced in the catalog tables
pub const RP66: &str = "RP66";

// Alternate symbol for the same unit in another naming system
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SameUnit {
    #[serde(rename = "namingSystem")]
    pub naming_system: String,
    pub uom: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fraction {
    pub numerator: Option<String>,
    pub denominator: Option<String>,
}

// (A + B*x) / (C + D*x), each coefficient kept as the document's literal text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Formula {
    #[serde(rename = "A")]
    pub a: Option<String>,
    #[serde(rename = "B")]
    pub b: Option<String>,
    #[serde(rename = "C")]
    pub c: Option<String>,
    #[serde(rename = "D")]
    pub d: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionToBaseUnit {
    // Weak reference: a catalog symbol, "#symbol", or an external identifier
    #[serde(rename = "baseUnit")]
    pub base_unit: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction: Option<Fraction>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<Formula>,
}

/// Which numerator form a conversion uses, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionForm<'a> {
    Factor(&'a str),
    Fraction(&'a Fraction),
    Formula(&'a Formula),
    Unspecified,
}

impl ConversionToBaseUnit {
    pub fn new(base_unit: impl Into<String>) -> Self {
        Self {
            base_unit: base_unit.into(),
            factor: None,
            fraction: None,
            formula: None,
        }
    }

    pub fn form(&self) -> ConversionForm<'_> {
        if let Some(factor) = &self.factor {
            ConversionForm::Factor(factor)
        } else if let Some(fraction) = &self.fraction {
            ConversionForm::Fraction(fraction)
        } else if let Some(formula) = &self.formula {
            ConversionForm::Formula(formula)
        } else {
            ConversionForm::Unspecified
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UnitKind {
    Base { description: String },
    Conversion(ConversionToBaseUnit),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitDefinition {
    pub name: String,

    #[serde(rename = "quantityTypes")]
    pub quantity_types: Vec<String>,

    #[serde(rename = "catalogName")]
    pub catalog_name: String,

    // Lookup key, expected to be unique within a dictionary
    #[serde(rename = "catalogSymbol")]
    pub catalog_symbol: String,

    pub deprecated: bool,

    #[serde(rename = "sameUnits", skip_serializing_if = "Vec::is_empty")]
    pub same_units: Vec<SameUnit>,

    #[serde(flatten)]
    pub kind: UnitKind,
}

impl UnitDefinition {
    pub fn base(name: &str, symbol: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity_types: Vec::new(),
            catalog_name: String::new(),
            catalog_symbol: symbol.to_string(),
            deprecated: false,
            same_units: Vec::new(),
            kind: UnitKind::Base {
                description: description.to_string(),
            },
        }
    }

    pub fn conversion(name: &str, symbol: &str, conversion: ConversionToBaseUnit) -> Self {
        Self {
            name: name.to_string(),
            quantity_types: Vec::new(),
            catalog_name: String::new(),
            catalog_symbol: symbol.to_string(),
            deprecated: false,
            same_units: Vec::new(),
            kind: UnitKind::Conversion(conversion),
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self.kind, UnitKind::Base { .. })
    }

    pub fn conversion_to_base(&self) -> Option<&ConversionToBaseUnit> {
        match &self.kind {
            UnitKind::Conversion(conversion) => Some(conversion),
            UnitKind::Base { .. } => None,
        }
    }

    pub fn rp66_symbol(&self) -> Option<&str> {
        self.same_units
            .iter()
            .find(|alias| alias.naming_system == RP66)
            .map(|alias| alias.uom.as_str())
    }
}

// Immutable snapshot of one or more POSC documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitDictionary {
    #[serde(rename = "documentName")]
    pub document_name: String,

    #[serde(rename = "documentDate")]
    pub document_date: String,

    pub disclaimer: String,

    pub units: Vec<UnitDefinition>,
}

impl UnitDictionary {
    pub fn base_units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.iter().filter(|u| u.is_base())
    }

    pub fn customary_units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.iter().filter(|u| !u.is_base())
    }
}
