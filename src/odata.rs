//! OData payload helpers.
//!
//! Project Server answers in OData JSON. In verbose mode entities arrive as
//! `{"d": {...}}` and collections as `{"d": {"results": [...], "__next": ...}}`;
//! the light formats use `{"value": [...]}`. Request payloads in verbose mode
//! must wrap collection-valued properties as `{"results": [...]}`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{ProjectError, Result};

/// Declares a fieldless enum that travels over the wire as its integer value.
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            /// The integer the server uses for this value.
            pub fn value(self) -> i32 {
                self as i32
            }

            /// Look up a value by its integer representation.
            pub fn from_value(value: i32) -> Option<Self> {
                match value {
                    $( v if v == $value => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_i32(self.value())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> ::core::result::Result<Self, D::Error> {
                let raw = <i32 as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_value(raw).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid {} value {}", stringify!($name), raw))
                })
            }
        }
    };
}

/// Deserialize an optional field, reading values this crate does not know
/// (e.g. an enum member added by a newer server) as `None`.
pub fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Unwrap a single-entity response body.
pub fn entity(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("d") => map.remove("d").unwrap_or(Value::Null),
        other => other,
    }
}

/// Unwrap a collection response body into its items and the next-page link.
///
/// # Errors
///
/// Returns [`ProjectError::UnexpectedResponse`] if no item array is present.
pub fn collection(value: Value) -> Result<(Vec<Value>, Option<String>)> {
    let unexpected = || ProjectError::UnexpectedResponse("expected an OData collection".to_string());

    match value {
        Value::Array(items) => Ok((items, None)),
        Value::Object(mut map) => {
            if let Some(d) = map.remove("d") {
                return match d {
                    Value::Array(items) => Ok((items, None)),
                    Value::Object(mut d) => {
                        let next = d.remove("__next").and_then(string_value);
                        match d.remove("results") {
                            Some(Value::Array(items)) => Ok((items, next)),
                            _ => Err(unexpected()),
                        }
                    }
                    _ => Err(unexpected()),
                };
            }

            let next = map
                .remove("odata.nextLink")
                .or_else(|| map.remove("@odata.nextLink"))
                .and_then(string_value);
            match map.remove("value") {
                Some(Value::Array(items)) => Ok((items, next)),
                _ => Err(unexpected()),
            }
        }
        _ => Err(unexpected()),
    }
}

fn string_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Copy a payload, turning every array-valued property into `{"results": [...]}`.
///
/// Nested objects are processed recursively; array elements are left as-is.
pub fn wrap_arrays(value: &Value) -> Value {
    let mut copy = value.clone();
    if let Value::Object(map) = &mut copy {
        wrap_object(map);
    }
    copy
}

fn wrap_object(map: &mut Map<String, Value>) {
    for property in map.values_mut() {
        match property {
            Value::Array(items) => {
                let items = std::mem::take(items);
                let mut wrapped = Map::new();
                wrapped.insert("results".to_string(), Value::Array(items));
                *property = Value::Object(wrapped);
            }
            Value::Object(inner) => wrap_object(inner),
            _ => {}
        }
    }
}

/// Render an OData string literal for a URL path, doubling embedded quotes.
///
/// The text between the quotes is percent-encoded so that `#`, `?`, `/` and
/// `%` stay part of the literal instead of ending the path.
pub fn quote(value: &str) -> String {
    format!("'{}'", urlencoding::encode(&value.replace('\'', "''")))
}

/// Render a date-time as an OData string literal.
pub fn date_literal(value: &DateTime<Utc>) -> String {
    quote(&value.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

/// An entity key as it appears in `Collection(key)` segments.
pub trait ODataKey: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// The literal placed between the parentheses.
    fn key_literal(&self) -> String;

    /// Read the key back from an entity's `Id` property.
    fn from_json(value: &Value) -> Option<Self>;
}

impl ODataKey for String {
    fn key_literal(&self) -> String {
        quote(self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl ODataKey for Uuid {
    fn key_literal(&self) -> String {
        quote(&self.to_string())
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| Uuid::parse_str(s).ok())
    }
}

impl ODataKey for i32 {
    fn key_literal(&self) -> String {
        self.to_string()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|n| i32::try_from(n).ok())
    }
}

impl ODataKey for u32 {
    fn key_literal(&self) -> String {
        self.to_string()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_u64().and_then(|n| u32::try_from(n).ok())
    }
}

/// Parse the date formats Project Server emits.
///
/// Accepts RFC 3339, offset-less ISO timestamps (taken as UTC) and the legacy
/// `/Date(milliseconds)/` form.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Some(ms) = raw
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        // "/Date(1514764800000+0000)/" carries an offset we can ignore for UTC
        let digits = ms.split(&['+', '-'][..]).find(|s| !s.is_empty())?;
        let millis: i64 = digits.parse().ok()?;
        let millis = if ms.starts_with('-') { -millis } else { millis };
        return Utc.timestamp_millis_opt(millis).single();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Serde helper for optional Project Server dates.
pub fn opt_datetime<'de, D>(deserializer: D) -> core::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_datetime(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date '{s}'"))),
    }
}
