#[derive(Debug, Clone, PartialEq)]
pub enum QueryPath {
    // Unit by catalog symbol: "cm"
    Unit(String),
    // Header and unit list: "dictionary"
    Dictionary,
    // Property access: "cm/name"
    Property(String, Box<QueryPath>),
    // Array index: "dictionary/units/0"
    Index(usize, Box<QueryPath>),
    // Array filter: "dictionary/units[kind=base]"
    Filter {
        field: String,
        operator: FilterOperator,
        value: String,
        inner: Box<QueryPath>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equals,
    NotEquals,
}

pub const DICTIONARY_HEAD: &str = "dictionary";

#[derive(Debug)]
pub enum ParseError {
    EmptyPath,
    UnterminatedQuote,
    InvalidFilter(String),
    InvalidCharacter(char, usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyPath => write!(f, "Query path cannot be empty"),
            ParseError::UnterminatedQuote => write!(f, "Unterminated quote in unit symbol"),
            ParseError::InvalidFilter(s) => write!(f, "Invalid filter: {}", s),
            ParseError::InvalidCharacter(c, pos) => {
                write!(f, "Invalid character {:?} at position {}", c, pos)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse `HEAD[/SEGMENT...]`.
///
/// HEAD is a catalog symbol or `dictionary`. Symbols containing `/` (such as
/// `m/s`) are written in double quotes: `"m/s"/coefficients/B`.
pub fn parse_query_path(path: &str) -> Result<QueryPath, ParseError> {
    if let Some((pos, c)) = path.char_indices().find(|(_, c)| c.is_control()) {
        return Err(ParseError::InvalidCharacter(c, pos));
    }

    let path = path.trim();
    if path.is_empty() {
        return Err(ParseError::EmptyPath);
    }

    let (head, rest) = split_head(path)?;
    if head.is_empty() {
        return Err(ParseError::EmptyPath);
    }

    let mut current = if head == DICTIONARY_HEAD {
        QueryPath::Dictionary
    } else {
        QueryPath::Unit(head.to_string())
    };

    for part in rest.split('/') {
        if part.is_empty() {
            continue;
        }

        let (name, filter) = split_filter(part)?;

        if !name.is_empty() {
            current = match name.parse::<usize>() {
                Ok(index) => QueryPath::Index(index, Box::new(current)),
                Err(_) => QueryPath::Property(name.to_string(), Box::new(current)),
            };
        }

        if let Some((field, operator, value)) = filter {
            current = QueryPath::Filter {
                field,
                operator,
                value,
                inner: Box::new(current),
            };
        }
    }

    Ok(current)
}

fn split_head(path: &str) -> Result<(&str, &str), ParseError> {
    if let Some(quoted) = path.strip_prefix('"') {
        let end = quoted.find('"').ok_or(ParseError::UnterminatedQuote)?;
        let rest = &quoted[end + 1..];
        // A quoted symbol must be followed by '/' or end the path
        if let Some(c) = rest.chars().next().filter(|&c| c != '/') {
            return Err(ParseError::InvalidCharacter(c, end + 2));
        }
        return Ok((&quoted[..end], rest));
    }

    Ok(match path.split_once('/') {
        Some((head, rest)) => (head, rest),
        None => (path, ""),
    })
}

type Filter = (String, FilterOperator, String);

// "units[kind=base]" -> ("units", Some(("kind", Equals, "base")))
fn split_filter(part: &str) -> Result<(&str, Option<Filter>), ParseError> {
    let Some(open) = part.find('[') else {
        return Ok((part, None));
    };

    let body = part[open + 1..]
        .strip_suffix(']')
        .ok_or_else(|| ParseError::InvalidFilter(part.to_string()))?;

    let (field, operator, value) = if let Some((field, value)) = body.split_once("!=") {
        (field, FilterOperator::NotEquals, value)
    } else if let Some((field, value)) = body.split_once('=') {
        (field, FilterOperator::Equals, value)
    } else {
        return Err(ParseError::InvalidFilter(part.to_string()));
    };

    let field = field.trim();
    if field.is_empty() {
        return Err(ParseError::InvalidFilter(part.to_string()));
    }

    Ok((
        &part[..open],
        Some((field.to_string(), operator, value.trim().to_string())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        let result = parse_query_path("cm").unwrap();
        assert!(matches!(result, QueryPath::Unit(symbol) if symbol == "cm"));
    }

    #[test]
    fn test_parse_dictionary() {
        assert_eq!(parse_query_path("dictionary").unwrap(), QueryPath::Dictionary);
    }

    #[test]
    fn test_parse_nested_property() {
        let result = parse_query_path("degF/coefficients/A").unwrap();
        match result {
            QueryPath::Property(a, inner) => {
                assert_eq!(a, "A");
                match *inner {
                    QueryPath::Property(coefficients, inner2) => {
                        assert_eq!(coefficients, "coefficients");
                        assert!(matches!(*inner2, QueryPath::Unit(s) if s == "degF"));
                    }
                    _ => panic!("Expected nested Property"),
                }
            }
            _ => panic!("Expected Property"),
        }
    }

    #[test]
    fn test_parse_index() {
        let result = parse_query_path("dictionary/units/3").unwrap();
        assert_eq!(
            result,
            QueryPath::Index(
                3,
                Box::new(QueryPath::Property(
                    "units".to_string(),
                    Box::new(QueryPath::Dictionary)
                ))
            )
        );
    }

    #[test]
    fn test_parse_quoted_symbol() {
        let result = parse_query_path("\"m/s\"/name").unwrap();
        assert_eq!(
            result,
            QueryPath::Property(
                "name".to_string(),
                Box::new(QueryPath::Unit("m/s".to_string()))
            )
        );
    }

    #[test]
    fn test_quoted_symbol_must_end_segment() {
        assert!(matches!(
            parse_query_path("\"m/s\"name"),
            Err(ParseError::InvalidCharacter('n', 5))
        ));
        assert_eq!(
            parse_query_path("\"m/s\"").unwrap(),
            QueryPath::Unit("m/s".to_string())
        );
    }

    #[test]
    fn test_parse_filter() {
        let result = parse_query_path("dictionary/units[kind != base]").unwrap();
        match result {
            QueryPath::Filter {
                field,
                operator,
                value,
                inner,
            } => {
                assert_eq!(field, "kind");
                assert_eq!(operator, FilterOperator::NotEquals);
                assert_eq!(value, "base");
                assert!(matches!(*inner, QueryPath::Property(ref p, _) if p == "units"));
            }
            _ => panic!("Expected Filter"),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_query_path(""), Err(ParseError::EmptyPath)));
        assert!(matches!(parse_query_path("   "), Err(ParseError::EmptyPath)));
        assert!(matches!(
            parse_query_path("\"m/s"),
            Err(ParseError::UnterminatedQuote)
        ));
        assert!(matches!(
            parse_query_path("dictionary/units[kind]"),
            Err(ParseError::InvalidFilter(_))
        ));
        assert!(matches!(
            parse_query_path("cm\t/name"),
            Err(ParseError::InvalidCharacter('\t', 2))
        ));
    }
}
