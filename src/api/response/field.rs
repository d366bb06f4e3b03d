use crate::api::error::SchemaValidationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Number, Value};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Unix timestamps beyond this magnitude are milliseconds rather than seconds.
const MS_WATERSHED: u64 = 20_000_000_000;

/// A validated response record.
pub trait Record: Sized {
    fn decode(reader: FieldReader) -> Result<Self, SchemaValidationError>;

    /// Decode a whole response body.
    fn from_value(value: Value) -> Result<Self, SchemaValidationError> {
        FieldReader::new("", value).and_then(Self::decode)
    }
}

/// Conversion of one raw wire value into a field's semantic type. `path` names the field in
/// errors.
pub trait FromWire: Sized {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError>;
}

/// Hands out the fields of one JSON object by wire name. Whatever is left when the record is
/// complete becomes the record's extra fields.
#[derive(Debug)]
pub struct FieldReader {
    path: String,
    fields: Map<String, Value>,
}

impl FieldReader {
    pub fn new(path: &str, value: Value) -> Result<Self, SchemaValidationError> {
        match value {
            Value::Object(fields) => Ok(FieldReader {
                path: path.to_owned(),
                fields,
            }),
            other => Err(SchemaValidationError::new(
                if path.is_empty() { "(body)" } else { path },
                other,
                "expected an object",
            )),
        }
    }

    fn path_of(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    /// Take the first of `names` present in the object; later names are historical aliases.
    pub fn take<T: FromWire>(&mut self, names: &[&str]) -> Result<T, SchemaValidationError> {
        for name in names {
            if let Some(value) = self.fields.remove(*name) {
                return T::from_wire(value, &self.path_of(name));
            }
        }

        let canonical = names.first().copied().unwrap_or_default();
        let mut error = SchemaValidationError::missing(&self.path_of(canonical));
        if names.len() > 1 {
            error.reason = format!("field required (also accepted as {:?})", &names[1..]);
        }
        Err(error)
    }

    pub fn finish(self, record: &str) -> Map<String, Value> {
        if !self.fields.is_empty() {
            log::debug!(
                "{}: extra fields detected: {:?}",
                record,
                self.fields.keys().collect::<Vec<_>>()
            );
        }
        self.fields
    }
}

fn finite(number: f64, path: &str, value: &Value) -> Result<f64, SchemaValidationError> {
    if number.is_finite() {
        Ok(number)
    } else {
        Err(SchemaValidationError::new(path, value.clone(), "expected a finite number"))
    }
}

impl FromWire for f64 {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        let number = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match number {
            Some(number) => finite(number, path, &value),
            None => Err(SchemaValidationError::new(path, value, "expected a number")),
        }
    }
}

impl FromWire for i64 {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        let number = match &value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        number.ok_or_else(|| SchemaValidationError::new(path, value, "expected an integer"))
    }
}

impl FromWire for String {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(SchemaValidationError::new(path, other, "expected a string")),
        }
    }
}

fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

fn from_unix(n: &Number) -> Option<NaiveDateTime> {
    let dt = match n.as_i64() {
        Some(ms) if ms.unsigned_abs() > MS_WATERSHED => {
            let nanos = (ms.rem_euclid(1000) * 1_000_000) as u32;
            DateTime::<Utc>::from_timestamp(ms.div_euclid(1000), nanos)
        }
        Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0),
        None => {
            let mut secs = n.as_f64().filter(|f| f.is_finite())?;
            if secs.abs() > MS_WATERSHED as f64 {
                secs /= 1000.0;
            }
            let whole = secs.floor();
            let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
            DateTime::<Utc>::from_timestamp(whole as i64, nanos)
        }
    };
    dt.map(|dt| dt.naive_utc())
}

/// Wall-clock time as the vendor reports it. Numbers are unix seconds (UTC), or milliseconds
/// when too large to be seconds.
impl FromWire for NaiveDateTime {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        let parsed = match &value {
            Value::String(s) => parse_date_time(s),
            Value::Number(n) => from_unix(n),
            _ => None,
        };

        parsed.ok_or_else(|| SchemaValidationError::new(path, value, "expected a date and time"))
    }
}

impl FromWire for NaiveDate {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        let parsed = match &value {
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        };

        parsed.ok_or_else(|| {
            SchemaValidationError::new(path, value, "expected a date (yyyy-MM-dd)")
        })
    }
}

impl FromWire for NaiveTime {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        let parsed = match &value {
            Value::String(s) => TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(s.trim(), format).ok()),
            _ => None,
        };

        parsed.ok_or_else(|| {
            SchemaValidationError::new(path, value, "expected a time of day (HH:mm)")
        })
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_wire(item, &format!("{}[{}]", path, i)))
                .collect(),
            other => Err(SchemaValidationError::new(path, other, "expected a list")),
        }
    }
}

/// `null` is accepted as "no payload"; an absent key is still an error.
impl<T: FromWire> FromWire for Option<T> {
    fn from_wire(value: Value, path: &str) -> Result<Self, SchemaValidationError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_wire(other, path).map(Some),
        }
    }
}
