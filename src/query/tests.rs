#[cfg(test)]
mod tests {
    use super::super::executor::{QueryError, QueryExecutor};
    use super::super::formatter::format_query_result;
    use crate::catalog::models::*;
    use serde_json::json;

    fn create_test_dictionary() -> UnitDictionary {
        let mut metre = UnitDefinition::base("metre", "m", "SI length");
        metre.quantity_types = vec!["length".to_string()];
        metre.same_units = vec![SameUnit {
            naming_system: "RP66".to_string(),
            uom: "m".to_string(),
        }];

        let mut cm_conversion = ConversionToBaseUnit::new("#m");
        cm_conversion.factor = Some("0.01".to_string());
        let mut centimetre = UnitDefinition::conversion("centimetre", "cm", cm_conversion);
        centimetre.quantity_types = vec!["length".to_string()];
        centimetre.deprecated = true;

        let mut speed_conversion = ConversionToBaseUnit::new("m/s");
        speed_conversion.fraction = Some(Fraction {
            numerator: Some("1".to_string()),
            denominator: Some("3.6".to_string()),
        });
        let mut speed = UnitDefinition::conversion("kilometre per hour", "km/h", speed_conversion);
        speed.quantity_types = vec!["velocity".to_string()];

        UnitDictionary {
            document_name: "Test Units".to_string(),
            document_date: "2024-01-31".to_string(),
            disclaimer: "None".to_string(),
            units: vec![metre, centimetre, speed],
        }
    }

    #[test]
    fn test_query_unit_field() {
        let dictionary = create_test_dictionary();
        let executor = QueryExecutor::new(&dictionary);

        assert_eq!(executor.execute_str("cm/name").unwrap(), json!("centimetre"));
        assert_eq!(executor.execute_str("cm/deprecated").unwrap(), json!(true));
        assert_eq!(executor.execute_str("cm/base").unwrap(), json!("m"));
        assert_eq!(executor.execute_str("cm/baseUnit").unwrap(), json!("#m"));
        assert_eq!(executor.execute_str("m/rp66").unwrap(), json!("m"));
        assert_eq!(executor.execute_str("m/kind").unwrap(), json!("base"));
    }

    #[test]
    fn test_query_coefficients() {
        let dictionary = create_test_dictionary();
        let executor = QueryExecutor::new(&dictionary);

        assert_eq!(
            executor.execute_str("cm/coefficients").unwrap(),
            json!({"A": "0", "B": "0.01", "C": "1", "D": "0"})
        );
        assert_eq!(
            executor.execute_str("\"km/h\"/coefficients/C").unwrap(),
            json!("3.6")
        );
        // m/s is not defined here, so the raw reference is shown
        assert_eq!(executor.execute_str("\"km/h\"/base").unwrap(), json!("m/s"));
    }

    #[test]
    fn test_query_dictionary() {
        let dictionary = create_test_dictionary();
        let executor = QueryExecutor::new(&dictionary);

        assert_eq!(executor.execute_str("dictionary/count").unwrap(), json!(3));
        assert_eq!(executor.execute_str("dictionary/name").unwrap(), json!("Test Units"));
        assert_eq!(
            executor.execute_str("dictionary/units/2/catalogSymbol").unwrap(),
            json!("km/h")
        );
    }

    #[test]
    fn test_query_filter() {
        let dictionary = create_test_dictionary();
        let executor = QueryExecutor::new(&dictionary);

        let base = executor.execute_str("dictionary/units[kind=base]").unwrap();
        assert_eq!(base.as_array().unwrap().len(), 1);

        let lengths = executor
            .execute_str("dictionary/units[quantityTypes=length]")
            .unwrap();
        assert_eq!(lengths.as_array().unwrap().len(), 2);

        let current = executor
            .execute_str("dictionary/units[deprecated!=true]/1/name")
            .unwrap();
        assert_eq!(current, json!("kilometre per hour"));
    }

    #[test]
    fn test_query_errors() {
        let dictionary = create_test_dictionary();
        let executor = QueryExecutor::new(&dictionary);

        assert!(matches!(
            executor.execute_str("ft"),
            Err(QueryError::UnitNotFound(s)) if s == "ft"
        ));
        assert!(matches!(
            executor.execute_str("cm/colour"),
            Err(QueryError::PropertyNotFound(p)) if p == "colour"
        ));
        assert!(matches!(
            executor.execute_str("dictionary/units/9"),
            Err(QueryError::IndexOutOfRange(9, 3))
        ));
        assert!(matches!(
            executor.execute_str("cm/name/0"),
            Err(QueryError::InvalidType(_))
        ));
        assert!(matches!(
            executor.execute_str(""),
            Err(QueryError::ParseError(_))
        ));
    }

    #[test]
    fn test_format_query_result() {
        assert_eq!(format_query_result(&json!("m")), "m");
        assert_eq!(format_query_result(&json!(3)), "3");
        assert_eq!(
            format_query_result(&json!({"A": "0"})),
            "{\n  \"A\": \"0\"\n}"
        );
    }
}
