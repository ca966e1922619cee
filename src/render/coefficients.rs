use crate::catalog::models::ConversionToBaseUnit;
use serde::Serialize;

pub const DEFAULT_A: &str = "0";
pub const DEFAULT_C: &str = "1";
pub const DEFAULT_D: &str = "0";

/// Display values for the four coefficients of (A + B*x) / (C + D*x).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coefficients {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

/// Resolve each coefficient independently.
///
/// - A: Formula A when present and non-empty, else 0
/// - B: Factor, else Fraction numerator, else Formula B, else empty
/// - C: Fraction denominator when a Fraction exists, else Formula C when
///   present and non-empty, else 1
/// - D: Formula D when present (even if empty), else 0
pub fn resolve_coefficients(conversion: &ConversionToBaseUnit) -> Coefficients {
    let formula = conversion.formula.as_ref();
    let fraction = conversion.fraction.as_ref();

    let a = formula
        .and_then(|f| non_empty(f.a.as_deref()))
        .unwrap_or(DEFAULT_A);

    let b = conversion
        .factor
        .as_deref()
        .or_else(|| fraction.and_then(|f| f.numerator.as_deref()))
        .or_else(|| formula.and_then(|f| f.b.as_deref()))
        .unwrap_or_default();

    let c = match fraction {
        Some(fraction) => fraction.denominator.as_deref().unwrap_or_default(),
        None => formula
            .and_then(|f| non_empty(f.c.as_deref()))
            .unwrap_or(DEFAULT_C),
    };

    let d = formula.and_then(|f| f.d.as_deref()).unwrap_or(DEFAULT_D);

    Coefficients {
        a: a.to_string(),
        b: b.to_string(),
        c: c.to_string(),
        d: d.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{Formula, Fraction};

    fn formula(a: Option<&str>, b: Option<&str>, c: Option<&str>, d: Option<&str>) -> Formula {
        Formula {
            a: a.map(String::from),
            b: b.map(String::from),
            c: c.map(String::from),
            d: d.map(String::from),
        }
    }

    #[test]
    fn test_no_numerator_uses_defaults() {
        let coefficients = resolve_coefficients(&ConversionToBaseUnit::new("#m"));
        assert_eq!(coefficients.a, "0");
        assert_eq!(coefficients.b, "");
        assert_eq!(coefficients.c, "1");
        assert_eq!(coefficients.d, "0");
    }

    #[test]
    fn test_factor() {
        let mut conversion = ConversionToBaseUnit::new("#m");
        conversion.factor = Some("0.01".to_string());

        let coefficients = resolve_coefficients(&conversion);
        assert_eq!(
            coefficients,
            Coefficients {
                a: "0".to_string(),
                b: "0.01".to_string(),
                c: "1".to_string(),
                d: "0".to_string(),
            }
        );
    }

    #[test]
    fn test_fahrenheit_formula() {
        let mut conversion = ConversionToBaseUnit::new("#K");
        conversion.formula = Some(formula(Some("32"), Some("5"), Some("9"), Some("0")));

        let coefficients = resolve_coefficients(&conversion);
        assert_eq!(coefficients.a, "32");
        assert_eq!(coefficients.b, "5");
        assert_eq!(coefficients.c, "9");
        assert_eq!(coefficients.d, "0");
    }

    #[test]
    fn test_fraction_overrides_formula_c() {
        let mut conversion = ConversionToBaseUnit::new("#m");
        conversion.fraction = Some(Fraction {
            numerator: Some("1200".to_string()),
            denominator: Some("3937".to_string()),
        });
        conversion.formula = Some(formula(None, Some("7"), Some("2"), None));

        let coefficients = resolve_coefficients(&conversion);
        assert_eq!(coefficients.b, "1200");
        assert_eq!(coefficients.c, "3937");
    }

    #[test]
    fn test_factor_wins_over_fraction_numerator() {
        let mut conversion = ConversionToBaseUnit::new("#m");
        conversion.factor = Some("3".to_string());
        conversion.fraction = Some(Fraction {
            numerator: Some("1".to_string()),
            denominator: Some("4".to_string()),
        });

        let coefficients = resolve_coefficients(&conversion);
        assert_eq!(coefficients.b, "3");
        assert_eq!(coefficients.c, "4");
    }

    #[test]
    fn test_empty_formula_fields() {
        let mut conversion = ConversionToBaseUnit::new("#K");
        conversion.formula = Some(formula(Some(""), Some(""), Some(""), Some("")));

        let coefficients = resolve_coefficients(&conversion);
        assert_eq!(coefficients.a, "0");
        assert_eq!(coefficients.b, "");
        assert_eq!(coefficients.c, "1");
        // D only defaults when the element is absent
        assert_eq!(coefficients.d, "");
    }
}
