//! Native state carried by built-in instances.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use talon_core::NativeError;

use super::Value;

/// Host-side state of an instance.
///
/// Script classes carry [`NativePayload::None`]. Each built-in class owns
/// exactly one variant and only its native methods read it.
#[derive(Debug, Clone, Default)]
pub enum NativePayload<'ast> {
    #[default]
    None,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    List(Vec<Value<'ast>>),
    /// Keys map to the original key value and the stored value.
    Map(BTreeMap<MapKey, (Value<'ast>, Value<'ast>)>),
    Date(NaiveDate),
    HttpRequest(HttpRequestState),
}

impl NativePayload<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            NativePayload::None => "none",
            NativePayload::Integer(_) => "Integer",
            NativePayload::Double(_) => "Double",
            NativePayload::Boolean(_) => "Boolean",
            NativePayload::String(_) => "String",
            NativePayload::List(_) => "List",
            NativePayload::Map(_) => "Map",
            NativePayload::Date(_) => "Date",
            NativePayload::HttpRequest(_) => "HttpRequest",
        }
    }
}

/// Outbound request under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequestState {
    pub headers: BTreeMap<String, String>,
    pub method: Option<String>,
    pub endpoint: Option<String>,
}

/// A hashable, ordered projection of a primitive value used as a map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(OrderedFloat<f64>),
    String(String),
}

impl MapKey {
    pub fn from_value(value: &Value<'_>) -> Result<Self, NativeError> {
        let Some(object) = value.as_object() else {
            return Ok(MapKey::Null);
        };
        match &*object.payload() {
            NativePayload::Integer(v) => Ok(MapKey::Integer(*v)),
            NativePayload::Double(v) => Ok(MapKey::Double(OrderedFloat(*v))),
            NativePayload::Boolean(v) => Ok(MapKey::Boolean(*v)),
            NativePayload::String(v) => Ok(MapKey::String(v.clone())),
            _ => Err(NativeError::UnsupportedKey {
                ty: object.class().name.clone(),
            }),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Null => f.write_str("null"),
            MapKey::Boolean(v) => write!(f, "{v}"),
            MapKey::Integer(v) => write!(f, "{v}"),
            MapKey::Double(v) => write!(f, "{:?}", v.0),
            MapKey::String(v) => f.write_str(v),
        }
    }
}
