use std::fmt::Display;

use calamine::{Data, ExcelDateTime, ExcelDateTimeType};
use jiff::{
    SignedDuration,
    civil::{self, Date, DateTime, Time},
};

/// Day zero of the 1900 date system, serial 1.0 is 1899-12-31.
const EXCEL_EPOCH: Date = civil::date(1899, 12, 30);
/// Day zero of the 1904 date system used by older Mac workbooks.
const EXCEL_1904_EPOCH: Date = civil::date(1904, 1, 1);
const MILLIS_PER_DAY: f64 = 86_400_000.0;
const ONE_DAY: SignedDuration = SignedDuration::from_hours(24);
/// Integral floats above this can't be represented exactly as an i64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single value read from a spreadsheet, or built in memory.
///
/// The `Serialize` implementation lives in [`crate::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Time(Time),
    DateTime(DateTime),
    Duration(SignedDuration),
    Array(Vec<CellValue>),
    /// A formula error such as `#N/A`
    Error(String),
}

impl CellValue {
    /// Missing cells make a row incomplete.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Error(_) => true,
            CellValue::Float(value) => value.is_nan(),
            CellValue::String(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(value) => Some(*value as f64),
            CellValue::Float(value) => Some(*value),
            CellValue::String(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Renders the value as a JSON object key, `None` for values that can't be one.
    pub fn to_key(&self) -> Option<String> {
        match self {
            CellValue::String(value) => Some(value.clone()),
            CellValue::Int(value) => Some(value.to_string()),
            CellValue::Float(value) if value.is_finite() => Some(value.to_string()),
            CellValue::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Converts an Excel serial date in the 1900 date system. Values below one
    /// day are a time of day.
    pub fn from_excel_serial(serial: f64) -> Option<CellValue> {
        Self::from_serial_since(EXCEL_EPOCH, serial)
    }

    /// Same as [`CellValue::from_excel_serial`] for the 1904 date system.
    pub fn from_excel_1904_serial(serial: f64) -> Option<CellValue> {
        Self::from_serial_since(EXCEL_1904_EPOCH, serial)
    }

    fn from_serial_since(epoch: Date, serial: f64) -> Option<CellValue> {
        if !serial.is_finite() || serial < 0.0 {
            return None;
        }

        let elapsed = SignedDuration::from_millis((serial * MILLIS_PER_DAY).round() as i64);
        if serial < 1.0 {
            Time::midnight().checked_add(elapsed).ok().map(CellValue::Time)
        } else {
            epoch
                .to_datetime(Time::midnight())
                .checked_add(elapsed)
                .ok()
                .map(CellValue::DateTime)
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::String(value) => write!(f, "{value}"),
            CellValue::Time(value) => write!(f, "{}", value.strftime("%H:%M:%S")),
            CellValue::DateTime(value) => write!(f, "{}", value.strftime("%Y-%m-%d %H:%M:%S")),
            CellValue::Duration(value) => write!(f, "{value}"),
            CellValue::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            CellValue::Error(value) => write!(f, "{value}"),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Bool(value) => CellValue::Bool(*value),
            Data::Int(value) => CellValue::Int(*value),
            // xlsx stores every number as a float
            Data::Float(value) if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER => {
                CellValue::Int(*value as i64)
            }
            Data::Float(value) => CellValue::Float(*value),
            Data::String(value) => CellValue::String(value.clone()),
            Data::DateTime(value) => match date_system(value) {
                (ExcelDateTimeType::TimeDelta, _) => CellValue::Duration(
                    SignedDuration::from_millis((value.as_f64() * MILLIS_PER_DAY).round() as i64),
                ),
                (ExcelDateTimeType::DateTime, is_1904) => {
                    let converted = if is_1904 {
                        CellValue::from_excel_1904_serial(value.as_f64())
                    } else {
                        CellValue::from_excel_serial(value.as_f64())
                    };
                    converted.unwrap_or(CellValue::Float(value.as_f64()))
                }
            },
            Data::DateTimeIso(value) => value
                .parse::<DateTime>()
                .map(CellValue::DateTime)
                .or_else(|_| value.parse::<Time>().map(CellValue::Time))
                .unwrap_or_else(|_| CellValue::String(value.clone())),
            // OpenDocument stores times of day as durations
            Data::DurationIso(value) => match value.parse::<SignedDuration>() {
                Ok(duration) if duration >= SignedDuration::ZERO && duration < ONE_DAY => {
                    Time::midnight()
                        .checked_add(duration)
                        .map(CellValue::Time)
                        .unwrap_or(CellValue::Duration(duration))
                }
                Ok(duration) => CellValue::Duration(duration),
                Err(_) => CellValue::String(value.clone()),
            },
            Data::Error(error) => CellValue::Error(error.to_string()),
        }
    }
}

/// Recovers the cell format and whether the workbook uses the 1904 date
/// system. `ExcelDateTime` only exposes them with chrono enabled.
fn date_system(value: &ExcelDateTime) -> (ExcelDateTimeType, bool) {
    [
        (ExcelDateTimeType::TimeDelta, false),
        (ExcelDateTimeType::TimeDelta, true),
        (ExcelDateTimeType::DateTime, true),
    ]
    .into_iter()
    .find(|(kind, is_1904)| *value == ExcelDateTime::new(value.as_f64(), *kind, *is_1904))
    .unwrap_or((ExcelDateTimeType::DateTime, false))
}

macro_rules! impl_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for CellValue {
                fn from(value: $int) -> Self {
                    CellValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        CellValue::Float(f64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<Time> for CellValue {
    fn from(value: Time) -> Self {
        CellValue::Time(value)
    }
}

impl From<DateTime> for CellValue {
    fn from(value: DateTime) -> Self {
        CellValue::DateTime(value)
    }
}

impl<T> From<Vec<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(values: Vec<T>) -> Self {
        CellValue::Array(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn test_from_data() {
        assert_eq!(CellValue::from(&Data::Float(3.0)), CellValue::Int(3));
        assert_eq!(CellValue::from(&Data::Float(12.97)), CellValue::Float(12.97));
        assert_eq!(
            CellValue::from(&Data::String("E1".to_owned())),
            CellValue::from("E1")
        );
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
        assert!(CellValue::from(&Data::Error(CellErrorType::NA)).is_missing());
    }

    #[test]
    fn test_from_iso_data() {
        assert_eq!(
            CellValue::from(&Data::DateTimeIso("2024-01-02T03:04:05".to_owned())),
            CellValue::DateTime(date(2024, 1, 2).at(3, 4, 5, 0))
        );
        assert_eq!(
            CellValue::from(&Data::DateTimeIso("09:05:00".to_owned())),
            CellValue::Time(time(9, 5, 0, 0))
        );
    }

    #[test]
    fn test_from_excel_serial() {
        // 09:05 is 545 minutes into the day
        assert_eq!(
            CellValue::from_excel_serial(545.0 / 1440.0),
            Some(CellValue::Time(time(9, 5, 0, 0)))
        );
        assert_eq!(
            CellValue::from_excel_serial(45293.0 + (3.0 * 3600.0 + 4.0 * 60.0 + 5.0) / 86400.0),
            Some(CellValue::DateTime(date(2024, 1, 2).at(3, 4, 5, 0)))
        );
        assert_eq!(CellValue::from_excel_serial(-1.0), None);
    }

    #[test]
    fn test_from_1904_data() {
        let serial = 45293.0 + 7.5 / 24.0;

        assert_eq!(
            CellValue::from(&Data::DateTime(ExcelDateTime::new(
                serial,
                ExcelDateTimeType::DateTime,
                true
            ))),
            CellValue::DateTime(date(2028, 1, 3).at(7, 30, 0, 0))
        );
        assert_eq!(
            CellValue::from(&Data::DateTime(ExcelDateTime::new(
                serial,
                ExcelDateTimeType::DateTime,
                false
            ))),
            CellValue::DateTime(date(2024, 1, 2).at(7, 30, 0, 0))
        );
        // times of day don't depend on the date system
        assert_eq!(
            CellValue::from(&Data::DateTime(ExcelDateTime::new(
                0.375,
                ExcelDateTimeType::DateTime,
                true
            ))),
            CellValue::Time(time(9, 0, 0, 0))
        );
    }

    #[test]
    fn test_from_duration_data() {
        for is_1904 in [false, true] {
            assert_eq!(
                CellValue::from(&Data::DateTime(ExcelDateTime::new(
                    1.5,
                    ExcelDateTimeType::TimeDelta,
                    is_1904
                ))),
                CellValue::Duration(SignedDuration::from_hours(36))
            );
        }
    }

    #[test]
    fn test_from_duration_iso_data() {
        assert_eq!(
            CellValue::from(&Data::DurationIso("PT08H15M00S".to_owned())),
            CellValue::Time(time(8, 15, 0, 0))
        );
        assert_eq!(
            CellValue::from(&Data::DurationIso("PT36H".to_owned())),
            CellValue::Duration(SignedDuration::from_hours(36))
        );
    }

    #[test]
    fn test_is_missing() {
        assert!(CellValue::Empty.is_missing());
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert!(!CellValue::Float(0.0).is_missing());
        assert!(CellValue::from("").is_missing());
        assert!(CellValue::from("  ").is_missing());
        assert!(!CellValue::from("0").is_missing());
    }

    #[test]
    fn test_to_key() {
        assert_eq!(CellValue::from("E7").to_key(), Some("E7".to_owned()));
        assert_eq!(CellValue::Int(42).to_key(), Some("42".to_owned()));
        assert_eq!(CellValue::Float(4.5).to_key(), Some("4.5".to_owned()));
        assert_eq!(CellValue::Time(time(9, 0, 0, 0)).to_key(), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(CellValue::Int(12).as_f64(), Some(12.0));
        assert_eq!(CellValue::from(" 77.59 ").as_f64(), Some(77.59));
        assert_eq!(CellValue::from("north").as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
    }
}
