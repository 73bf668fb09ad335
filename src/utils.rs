use std::error::Error;

use boolparser::ExprError;

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Parse `A=1,B=false` into label/value pairs.
pub fn parse_assignments(s: &str) -> Result<Vec<(String, bool)>, Box<dyn Error>> {
    let mut assignments = vec![];

    for pair in s.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        let records: Vec<&str> = pair.split('=').collect();
        if records.len() != 2 {
            return Err(Box::new(ExprError::input(format!(
                "invalid assignment: {}",
                pair
            ))));
        }

        let label = records[0].trim();
        let value = match parse_bool(records[1].trim()) {
            Some(value) => value,
            None => {
                return Err(Box::new(ExprError::input(format!(
                    "invalid value for {}: {}",
                    label, records[1]
                ))))
            }
        };

        assignments.push((label.to_string(), value));
    }

    Ok(assignments)
}

#[cfg(test)]
mod test_utils {
    use super::*;

    #[test]
    fn test_parse_assignments() {
        assert_eq!(
            parse_assignments("A=1, b = false,C=T").unwrap(),
            vec![
                ("A".to_string(), true),
                ("b".to_string(), false),
                ("C".to_string(), true)
            ]
        );
        assert!(parse_assignments("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_assignments() {
        assert!(parse_assignments("A").is_err());
        assert!(parse_assignments("A=2").is_err());
        assert!(parse_assignments("A=1=0").is_err());
    }
}
