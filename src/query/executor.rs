use crate::catalog::index::SymbolIndex;
use crate::catalog::models::*;
use crate::query::parser::{FilterOperator, ParseError, QueryPath};
use crate::render::coefficients::resolve_coefficients;
use serde_json::{json, Value as JsonValue};

#[derive(Debug)]
pub enum QueryError {
    UnitNotFound(String),
    PropertyNotFound(String),
    IndexOutOfRange(usize, usize),
    InvalidType(String),
    ParseError(ParseError),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::UnitNotFound(symbol) => write!(f, "Unit '{}' not found", symbol),
            QueryError::PropertyNotFound(prop) => write!(f, "Property '{}' not found", prop),
            QueryError::IndexOutOfRange(idx, len) => {
                write!(f, "Index {} out of range (length: {})", idx, len)
            }
            QueryError::InvalidType(msg) => write!(f, "Invalid type: {}", msg),
            QueryError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<ParseError> for QueryError {
    fn from(e: ParseError) -> Self {
        QueryError::ParseError(e)
    }
}

pub struct QueryExecutor<'a> {
    dictionary: &'a UnitDictionary,
    index: SymbolIndex<'a>,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(dictionary: &'a UnitDictionary) -> Self {
        Self {
            dictionary,
            index: SymbolIndex::new(dictionary),
        }
    }

    pub fn execute_str(&self, path: &str) -> Result<JsonValue, QueryError> {
        let path = crate::query::parser::parse_query_path(path)?;
        self.execute(&path)
    }

    pub fn execute(&self, path: &QueryPath) -> Result<JsonValue, QueryError> {
        match path {
            QueryPath::Unit(symbol) => {
                let unit = self
                    .index
                    .get(symbol)
                    .ok_or_else(|| QueryError::UnitNotFound(symbol.clone()))?;
                Ok(self.unit_view(unit))
            }
            QueryPath::Dictionary => Ok(self.dictionary_view()),
            QueryPath::Property(name, inner) => {
                let value = self.execute(inner)?;
                get_property(&value, name)
            }
            QueryPath::Index(idx, inner) => {
                let value = self.execute(inner)?;
                get_index(&value, *idx)
            }
            QueryPath::Filter {
                field,
                operator,
                value,
                inner,
            } => {
                let array_value = self.execute(inner)?;
                apply_filter(&array_value, field, *operator, value)
            }
        }
    }

    /// JSON view of one unit, with the base unit and coefficients resolved the
    /// same way the catalog tables show them.
    pub fn unit_view(&self, unit: &UnitDefinition) -> JsonValue {
        let mut view = json!({
            "name": unit.name,
            "quantityTypes": unit.quantity_types,
            "catalogName": unit.catalog_name,
            "catalogSymbol": unit.catalog_symbol,
            "deprecated": unit.deprecated,
            "rp66": unit.rp66_symbol(),
        });

        // json! always yields an object here
        if let JsonValue::Object(map) = &mut view {
            match &unit.kind {
                UnitKind::Base { description } => {
                    map.insert("kind".to_string(), json!("base"));
                    map.insert("description".to_string(), json!(description));
                }
                UnitKind::Conversion(conversion) => {
                    map.insert("kind".to_string(), json!("conversion"));
                    map.insert("baseUnit".to_string(), json!(conversion.base_unit));
                    map.insert(
                        "base".to_string(),
                        json!(self.index.resolve_base_unit(&conversion.base_unit)),
                    );
                    map.insert(
                        "coefficients".to_string(),
                        json!(resolve_coefficients(conversion)),
                    );
                }
            }
        }

        view
    }

    fn dictionary_view(&self) -> JsonValue {
        let units: Vec<JsonValue> = self
            .dictionary
            .units
            .iter()
            .map(|unit| self.unit_view(unit))
            .collect();

        json!({
            "name": self.dictionary.document_name,
            "date": self.dictionary.document_date,
            "disclaimer": self.dictionary.disclaimer,
            "count": self.dictionary.units.len(),
            "units": units,
        })
    }
}

fn get_property(value: &JsonValue, name: &str) -> Result<JsonValue, QueryError> {
    match value {
        JsonValue::Object(map) => map
            .get(name)
            .cloned()
            .ok_or_else(|| QueryError::PropertyNotFound(name.to_string())),
        _ => Err(QueryError::InvalidType(format!(
            "Cannot access property '{}' on non-object",
            name
        ))),
    }
}

fn get_index(value: &JsonValue, idx: usize) -> Result<JsonValue, QueryError> {
    match value {
        JsonValue::Array(arr) => arr
            .get(idx)
            .cloned()
            .ok_or(QueryError::IndexOutOfRange(idx, arr.len())),
        _ => Err(QueryError::InvalidType(format!(
            "Cannot index into non-array (index: {})",
            idx
        ))),
    }
}

fn apply_filter(
    value: &JsonValue,
    field: &str,
    operator: FilterOperator,
    filter_value: &str,
) -> Result<JsonValue, QueryError> {
    match value {
        JsonValue::Array(arr) => {
            let filtered: Vec<JsonValue> = arr
                .iter()
                .filter(|item| {
                    let matched = get_property(item, field)
                        .map(|fv| matches_value(&fv, filter_value))
                        .unwrap_or(false);
                    match operator {
                        FilterOperator::Equals => matched,
                        FilterOperator::NotEquals => !matched,
                    }
                })
                .cloned()
                .collect();
            Ok(JsonValue::Array(filtered))
        }
        _ => Err(QueryError::InvalidType(
            "Filter can only be applied to arrays".to_string(),
        )),
    }
}

fn matches_value(value: &JsonValue, filter_value: &str) -> bool {
    match value {
        JsonValue::String(s) => s == filter_value,
        JsonValue::Bool(b) => filter_value.parse::<bool>().is_ok_and(|f| *b == f),
        JsonValue::Number(n) => match (n.as_f64(), filter_value.parse::<f64>()) {
            (Some(n_val), Ok(f_val)) => (n_val - f_val).abs() < f64::EPSILON,
            _ => false,
        },
        // Lists such as quantityTypes match when any element does
        JsonValue::Array(items) => items.iter().any(|item| matches_value(item, filter_value)),
        _ => false,
    }
}
