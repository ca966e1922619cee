use crate::catalog::index::SymbolIndex;
use crate::catalog::models::*;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

lazy_static! {
    /// Decimal literal as written in POSC coefficients: "0.3048", "-273.15", "1E-3", ".5"
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: String, location: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: IssueSeverity::Error,
            message,
            location,
        });
    }

    pub fn add_warning(&mut self, message: String, location: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            message,
            location,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.errors.is_empty() {
            writeln!(f, "Errors:")?;
            for error in &self.errors {
                write_issue(f, error)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                write_issue(f, warning)?;
            }
        }

        Ok(())
    }
}

fn write_issue(f: &mut fmt::Formatter<'_>, issue: &ValidationIssue) -> fmt::Result {
    match &issue.location {
        Some(loc) => writeln!(f, "  [{}] {}", loc, issue.message),
        None => writeln!(f, "  {}", issue.message),
    }
}

pub fn looks_like_number(text: &str) -> bool {
    NUMBER_PATTERN.is_match(text.trim())
}

/// Check a dictionary for problems the renderer silently tolerates.
pub fn validate_dictionary(dictionary: &UnitDictionary) -> ValidationResult {
    let mut validation = ValidationResult::new();
    let index = SymbolIndex::new(dictionary);

    check_duplicate_symbols(dictionary, &mut validation);

    for unit in &dictionary.units {
        if let Some(conversion) = unit.conversion_to_base() {
            check_conversion(unit, conversion, &index, &mut validation);
        }
    }

    check_quantity_type_ownership(dictionary, &index, &mut validation);

    if validation.has_issues() {
        tracing::warn!(
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            "Dictionary validation found issues"
        );
    }

    validation
}

fn check_duplicate_symbols(dictionary: &UnitDictionary, validation: &mut ValidationResult) {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (position, unit) in dictionary.units.iter().enumerate() {
        if unit.catalog_symbol.is_empty() {
            validation.add_warning(
                format!("Unit '{}' has no catalog symbol", unit.name),
                Some(format!("units[{}]", position)),
            );
            continue;
        }

        match seen.get(unit.catalog_symbol.as_str()) {
            Some(first) => validation.add_error(
                format!(
                    "Catalog symbol '{}' is already defined by units[{}]",
                    unit.catalog_symbol, first
                ),
                Some(format!("{}/catalogSymbol", unit.catalog_symbol)),
            ),
            None => {
                seen.insert(unit.catalog_symbol.as_str(), position);
            }
        }
    }
}

fn check_conversion(
    unit: &UnitDefinition,
    conversion: &ConversionToBaseUnit,
    index: &SymbolIndex,
    validation: &mut ValidationResult,
) {
    let symbol = &unit.catalog_symbol;

    if index.lookup_reference(&conversion.base_unit).is_none() {
        validation.add_warning(
            format!(
                "Base unit '{}' does not exist in this dictionary",
                conversion.base_unit
            ),
            Some(format!("{}/baseUnit", symbol)),
        );
    }

    let mut coefficients: Vec<(&str, &str)> = Vec::new();
    match conversion.form() {
        ConversionForm::Unspecified => {
            validation.add_warning(
                "Conversion has no Factor, Fraction or Formula".to_string(),
                Some(format!("{}/conversion", symbol)),
            );
        }
        _ => {
            if let Some(factor) = &conversion.factor {
                coefficients.push(("Factor", factor.as_str()));
            }
            if let Some(fraction) = &conversion.fraction {
                coefficients.extend(fraction.numerator.as_deref().map(|v| ("Numerator", v)));
                coefficients.extend(fraction.denominator.as_deref().map(|v| ("Denominator", v)));
            }
            if let Some(formula) = &conversion.formula {
                coefficients.extend(formula.a.as_deref().map(|v| ("A", v)));
                coefficients.extend(formula.b.as_deref().map(|v| ("B", v)));
                coefficients.extend(formula.c.as_deref().map(|v| ("C", v)));
                coefficients.extend(formula.d.as_deref().map(|v| ("D", v)));
            }
        }
    }

    for (field, value) in coefficients {
        // Empty coefficients fall back to defaults when rendered
        if !value.is_empty() && !looks_like_number(value) {
            validation.add_warning(
                format!("Coefficient {} '{}' is not a number", field, value),
                Some(format!("{}/{}", symbol, field)),
            );
        }
    }
}

// Each quantity type should belong to a single base unit
fn check_quantity_type_ownership(
    dictionary: &UnitDictionary,
    index: &SymbolIndex,
    validation: &mut ValidationResult,
) {
    let mut owners: HashMap<&str, String> = HashMap::new();

    for unit in &dictionary.units {
        let base = match unit.conversion_to_base() {
            Some(conversion) => index.resolve_base_unit(&conversion.base_unit),
            None => unit.catalog_symbol.clone(),
        };

        for quantity_type in &unit.quantity_types {
            match owners.get(quantity_type.as_str()) {
                Some(owner) if *owner != base => {
                    validation.add_warning(
                        format!(
                            "Quantity type '{}' already belongs to base unit '{}' (and now '{}')",
                            quantity_type, owner, base
                        ),
                        Some(format!("{}/quantityType", unit.catalog_symbol)),
                    );
                }
                Some(_) => {}
                None => {
                    owners.insert(quantity_type.as_str(), base.clone());
                }
            }
        }
    }
}
