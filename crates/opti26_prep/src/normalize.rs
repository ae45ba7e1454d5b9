//! JSON normalization of spreadsheet values.
//!
//! Every [`CellValue`] goes through this `Serialize` implementation when the
//! optimizer input is written, wherever it sits in the document:
//!
//! * NaN and infinite floats become `null`, other floats keep full precision
//! * integers stay integers
//! * arrays become nested sequences, each element normalized in turn
//! * times of day become `"HH:MM"`, date-times `"YYYY-MM-DD HH:MM:SS"`
//! * durations and formula errors have no JSON form and fail serialization

use serde::{Serialize, Serializer, ser::Error as _};

use crate::cell::CellValue;

pub const TIME_FORMAT: &str = "%H:%M";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Bool(value) => serializer.serialize_bool(*value),
            CellValue::Int(value) => serializer.serialize_i64(*value),
            CellValue::Float(value) if !value.is_finite() => serializer.serialize_none(),
            CellValue::Float(value) => serializer.serialize_f64(*value),
            CellValue::String(value) => serializer.serialize_str(value),
            CellValue::Time(value) => serializer.collect_str(&value.strftime(TIME_FORMAT)),
            CellValue::DateTime(value) => {
                serializer.collect_str(&value.strftime(DATETIME_FORMAT))
            }
            CellValue::Array(values) => serializer.collect_seq(values),
            CellValue::Duration(_) => Err(S::Error::custom(unsupported("Duration"))),
            CellValue::Error(value) => Err(S::Error::custom(unsupported(&format!(
                "CellError({value})"
            )))),
        }
    }
}

fn unsupported(type_name: &str) -> String {
    format!("Object of type {type_name} is not JSON serializable")
}

/// Normalizes a single value.
pub fn normalize(value: &CellValue) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(value)
}

#[cfg(test)]
mod tests {
    use jiff::{
        SignedDuration,
        civil::{date, time},
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn test_non_finite_floats_are_null() {
        assert_eq!(normalize(&CellValue::Float(f64::NAN)).unwrap(), json!(null));
        assert_eq!(
            normalize(&CellValue::Float(f64::INFINITY)).unwrap(),
            json!(null)
        );
        assert_eq!(
            normalize(&CellValue::Float(f64::NEG_INFINITY)).unwrap(),
            json!(null)
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(normalize(&CellValue::Float(12.9716)).unwrap(), json!(12.9716));
        assert_eq!(normalize(&CellValue::from(0.1_f32)).unwrap(), json!(f64::from(0.1_f32)));
        assert_eq!(normalize(&CellValue::from(7_u8)).unwrap(), json!(7));
        assert_eq!(normalize(&CellValue::from(-3_i16)).unwrap(), json!(-3));
        assert_eq!(normalize(&CellValue::from(i64::MAX)).unwrap(), json!(i64::MAX));
    }

    #[test]
    fn test_arrays() {
        let matrix = CellValue::from(vec![vec![0.0, 5000.5], vec![f64::NAN, 0.0]]);

        assert_eq!(
            normalize(&matrix).unwrap(),
            json!([[0.0, 5000.5], [null, 0.0]])
        );
        assert_eq!(
            normalize(&CellValue::from(vec![1, 2, 3])).unwrap(),
            json!([1, 2, 3])
        );
    }

    #[test]
    fn test_time_and_datetime() {
        assert_eq!(
            normalize(&CellValue::Time(time(9, 5, 0, 0))).unwrap(),
            json!("09:05")
        );
        assert_eq!(
            normalize(&CellValue::Time(time(17, 45, 59, 0))).unwrap(),
            json!("17:45")
        );
        assert_eq!(
            normalize(&CellValue::DateTime(date(2024, 1, 2).at(3, 4, 5, 0))).unwrap(),
            json!("2024-01-02 03:04:05")
        );
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize(&CellValue::from("high")).unwrap(), json!("high"));
        assert_eq!(normalize(&CellValue::Bool(true)).unwrap(), json!(true));
        assert_eq!(normalize(&CellValue::Empty).unwrap(), json!(null));
    }

    #[test]
    fn test_unsupported_types_fail() {
        let err = normalize(&CellValue::Duration(SignedDuration::from_secs(60))).unwrap_err();
        assert!(err.to_string().contains("not JSON serializable"));

        let err = normalize(&CellValue::Error("#REF!".to_owned())).unwrap_err();
        assert!(err.to_string().contains("not JSON serializable"));

        // nested leaves are checked too
        let nested = CellValue::Array(vec![
            CellValue::Int(1),
            CellValue::Duration(SignedDuration::ZERO),
        ]);
        assert!(normalize(&nested).is_err());
    }

    #[test]
    fn test_nested_in_documents() {
        let document = json!({ "row": { "start": normalize(&CellValue::Time(time(8, 0, 0, 0))).unwrap() } });

        assert_eq!(serde_json::to_string(&document).unwrap(), r#"{"row":{"start":"08:00"}}"#);
    }
}
