use crate::catalog::models::*;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;

const ROOT_ELEMENT: &str = "UnitOfMeasureDictionary";

/// Parse a POSC units-of-measure document.
///
/// Elements are matched by local name, so documents using the
/// `http://www.posc.org/schemas` default namespace and bare documents load
/// the same way.
pub fn load_dictionary_from_str(xml: &str) -> Result<UnitDictionary, CatalogError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    if root.tag_name().name() != ROOT_ELEMENT {
        return Err(CatalogError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    let mut dictionary = UnitDictionary::default();

    if let Some(info) = child(root, "DocumentInformation") {
        dictionary.document_name = child_text(info, "DocumentName").unwrap_or_default();
        dictionary.document_date = child_text(info, "DocumentDate").unwrap_or_default();
        dictionary.disclaimer = child_text(info, "Disclaimer").unwrap_or_default();
    }

    // Units live one level below the root (UnitsDefinition in POSC files)
    for section in root.children().filter(|n| n.is_element()) {
        for unit_node in children(section, "UnitOfMeasure") {
            dictionary.units.push(parse_unit(unit_node));
        }
    }

    tracing::debug!(
        document = %dictionary.document_name,
        units = dictionary.units.len(),
        "Parsed units-of-measure dictionary"
    );

    Ok(dictionary)
}

pub fn load_dictionary_from_file<P: AsRef<Path>>(path: P) -> Result<UnitDictionary, CatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "Loading dictionary");
    load_dictionary_from_str(&content)
}

/// Load several documents into one dictionary.
///
/// Units are appended in argument order; header fields come from the first
/// document. Symbols listed in `config.ignore` are dropped.
pub fn load_dictionaries<P: AsRef<Path>>(
    paths: &[P],
    config: &CatalogConfig,
) -> Result<UnitDictionary, CatalogError> {
    let mut merged: Option<UnitDictionary> = None;

    for path in paths {
        let dictionary = load_dictionary_from_file(path)?;
        match merged.as_mut() {
            Some(existing) => existing.units.extend(dictionary.units),
            None => merged = Some(dictionary),
        }
    }

    let mut dictionary = merged.unwrap_or_default();
    apply_ignore_list(&mut dictionary, config);
    Ok(dictionary)
}

pub fn apply_ignore_list(dictionary: &mut UnitDictionary, config: &CatalogConfig) {
    if config.ignore.is_empty() {
        return;
    }

    let ignored = config.ignored_symbols();
    let before = dictionary.units.len();
    dictionary
        .units
        .retain(|unit| !ignored.contains(unit.catalog_symbol.as_str()));

    tracing::debug!(
        dropped = before - dictionary.units.len(),
        "Applied catalog ignore list"
    );
}

fn parse_unit(node: Node) -> UnitDefinition {
    let quantity_types = children(node, "QuantityType")
        .map(|n| normalize_whitespace(&element_text(n)))
        .filter(|q| !q.is_empty())
        .collect();

    let same_units = children(node, "SameUnit")
        .map(|n| SameUnit {
            naming_system: n.attribute("namingSystem").unwrap_or_default().to_string(),
            uom: n.attribute("uom").unwrap_or_default().to_string(),
        })
        .collect();

    let deprecated = child(node, "Deprecated").is_some_and(|n| is_truthy(&element_text(n)));

    let kind = match child(node, "ConversionToBaseUnit") {
        Some(conversion) => UnitKind::Conversion(parse_conversion(conversion)),
        None => UnitKind::Base {
            description: child(node, "BaseUnit")
                .and_then(|base| child_text(base, "Description"))
                .unwrap_or_default(),
        },
    };

    UnitDefinition {
        name: child_text(node, "Name").unwrap_or_default(),
        quantity_types,
        catalog_name: child_text(node, "CatalogName").unwrap_or_default(),
        catalog_symbol: child_text(node, "CatalogSymbol").unwrap_or_default(),
        deprecated,
        same_units,
        kind,
    }
}

fn parse_conversion(node: Node) -> ConversionToBaseUnit {
    let fraction = child(node, "Fraction").map(|f| Fraction {
        numerator: child_text(f, "Numerator"),
        denominator: child_text(f, "Denominator"),
    });

    let formula = child(node, "Formula").map(|f| Formula {
        a: child_text(f, "A"),
        b: child_text(f, "B"),
        c: child_text(f, "C"),
        d: child_text(f, "D"),
    });

    ConversionToBaseUnit {
        base_unit: node.attribute("baseUnit").unwrap_or_default().trim().to_string(),
        factor: child_text(node, "Factor"),
        fraction,
        formula,
    }
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'a str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

// Present-but-empty elements yield Some("")
fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name).map(|n| element_text(n).trim().to_string())
}

// All text under the element; comments and processing instructions are skipped
fn element_text(node: Node) -> String {
    node.descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// <Deprecated/> and <Deprecated>true</Deprecated> both mark a unit
fn is_truthy(text: &str) -> bool {
    match text.trim() {
        "" => true,
        value => matches!(value.to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
    }
}
