use crate::catalog::index::SymbolIndex;
use crate::catalog::models::{UnitDefinition, UnitDictionary};
use crate::config::RenderConfig;
use crate::render::rows::*;
use std::fmt::Write;

pub const DEFAULT_NOTE: &str = "Customary units convert to their base unit with \
    y = (A + B*x) / (C + D*x), where x is the value in the customary unit and y \
    the value in the base unit.";

const BASE_UNIT_COLUMNS: [&str; 6] = [
    "Name",
    "Quantity Type",
    "Catalog Name",
    "Catalog Symbol",
    "RP66 symbol",
    "Base Unit Description",
];

const CUSTOMARY_UNIT_COLUMNS: [&str; 10] = [
    "Name",
    "Quantity Type",
    "Catalog Name",
    "Catalog Symbol",
    "RP66 symbol",
    "Base Unit",
    "A",
    "B",
    "C",
    "D",
];

/// Renders a unit dictionary as a standalone HTML page.
///
/// Rendering never fails: missing fields become empty cells and unresolved
/// base-unit references are shown as written.
#[derive(Debug, Clone, Default)]
pub struct CatalogRenderer {
    config: RenderConfig,
}

impl CatalogRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, dictionary: &UnitDictionary) -> String {
        let index = SymbolIndex::new(dictionary);
        let title = self
            .config
            .title
            .as_deref()
            .unwrap_or(&dictionary.document_name);

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(title));
        if let Some(stylesheet) = &self.config.stylesheet {
            let _ = writeln!(html, "<style>\n{}\n</style>", stylesheet);
        }
        html.push_str("</head>\n<body>\n");

        html.push_str(&self.render_header(dictionary));
        html.push_str(&self.render_base_units_table(&dictionary.units));
        html.push_str(&self.render_customary_units_table(&dictionary.units, &index));

        html.push_str("</body>\n</html>\n");

        tracing::debug!(
            units = dictionary.units.len(),
            bytes = html.len(),
            "Rendered unit catalog"
        );
        html
    }

    pub fn render_header(&self, dictionary: &UnitDictionary) -> String {
        let note = self.config.note.as_deref().unwrap_or(DEFAULT_NOTE);

        let mut html = String::new();
        let _ = writeln!(html, "<h1>{}</h1>", escape(&dictionary.document_name));
        let _ = writeln!(
            html,
            "<p><b>Issue date:</b> {}</p>",
            escape(&dictionary.document_date)
        );
        let _ = writeln!(
            html,
            "<p><b>Disclaimer:</b> {}</p>",
            escape(&dictionary.disclaimer)
        );
        let _ = writeln!(html, "<p class=\"note\">{}</p>", escape(note));
        html
    }

    /// Empty when the units contain no base unit.
    pub fn render_base_units_table(&self, units: &[UnitDefinition]) -> String {
        let rows = base_unit_rows(units);
        if rows.is_empty() {
            return String::new();
        }

        let mut html = String::new();
        html.push_str("<h2>Table of Base Units</h2>\n");
        open_table(&mut html, &BASE_UNIT_COLUMNS);
        for row in &rows {
            write_row(
                &mut html,
                &[
                    escape(row.name),
                    join_lines(row.quantity_types),
                    escape(row.catalog_name),
                    escape(row.catalog_symbol),
                    escape(row.rp66_symbol),
                    escape(row.description),
                ],
            );
        }
        html.push_str("</table>\n");
        html
    }

    pub fn render_customary_units_table(
        &self,
        units: &[UnitDefinition],
        index: &SymbolIndex,
    ) -> String {
        let rows = customary_unit_rows(units, index);

        let mut html = String::new();
        html.push_str("<h2>Table of Customary Units</h2>\n");
        open_table(&mut html, &CUSTOMARY_UNIT_COLUMNS);
        for row in &rows {
            write_row(
                &mut html,
                &[
                    escape(row.name),
                    join_lines(row.quantity_types),
                    escape(row.catalog_name),
                    escape(&row.symbol_display()),
                    escape(row.rp66_symbol),
                    escape(&row.base_unit),
                    escape(&row.coefficients.a),
                    escape(&row.coefficients.b),
                    escape(&row.coefficients.c),
                    escape(&row.coefficients.d),
                ],
            );
        }
        html.push_str("</table>\n");
        html
    }
}

fn open_table(html: &mut String, columns: &[&str]) {
    html.push_str("<table border=\"1\">\n<tr>");
    for column in columns {
        let _ = write!(html, "<th>{}</th>", column);
    }
    html.push_str("</tr>\n");
}

// Cells are already escaped
fn write_row(html: &mut String, cells: &[String]) {
    html.push_str("<tr>");
    for cell in cells {
        let _ = write!(html, "<td>{}</td>", cell);
    }
    html.push_str("</tr>\n");
}

fn join_lines(values: &[String]) -> String {
    values
        .iter()
        .map(|v| escape(v))
        .collect::<Vec<_>>()
        .join("<br/>")
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
