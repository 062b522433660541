//! Custom serde deserializers for flexible type handling
//!
//! The upstream APIs are loose about numeric identifiers: `ownerUin` and
//! the redemption status field arrive as either a JSON string or a JSON
//! number depending on the account. These helpers coerce both shapes to
//! `String` so the rest of the pipeline only deals with one type.

use serde::{Deserialize, Deserializer};

/// Intermediate shape for string-or-number wire fields
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// Deserialize a required field that may be a string or a number
pub fn deserialize_stringlike<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_string())
}

/// Deserialize an optional field that may be a string or a number
pub fn deserialize_opt_stringlike<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(StringOrNumber::into_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(deserialize_with = "deserialize_stringlike")]
        required: String,
        #[serde(default, deserialize_with = "deserialize_opt_stringlike")]
        optional: Option<String>,
    }

    #[test]
    fn test_deserialize_string_value() {
        let json = json!({"required": "200"});
        let result: TestStruct = serde_json::from_value(json).unwrap();
        assert_eq!(result.required, "200");
        assert_eq!(result.optional, None);
    }

    #[test]
    fn test_deserialize_number_value() {
        let json = json!({"required": 200});
        let result: TestStruct = serde_json::from_value(json).unwrap();
        assert_eq!(result.required, "200");
    }

    #[test]
    fn test_deserialize_optional_number() {
        let json = json!({"required": "x", "optional": 42});
        let result: TestStruct = serde_json::from_value(json).unwrap();
        assert_eq!(result.optional, Some("42".to_string()));
    }

    #[test]
    fn test_deserialize_optional_null() {
        let json = json!({"required": "x", "optional": null});
        let result: TestStruct = serde_json::from_value(json).unwrap();
        assert_eq!(result.optional, None);
    }

    #[test]
    fn test_deserialize_bool_rejected() {
        let json = json!({"required": true});
        let result: Result<TestStruct, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }
}
