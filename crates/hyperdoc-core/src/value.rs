use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

///
/// Value
///
/// Closed scalar vocabulary for document properties and key payloads.
/// One representation backs property emission, route placeholder
/// expansion, and query-string encoding, so a value renders the same
/// wherever it surfaces.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Enum(ValueEnum),
    Float(f64),
    Int(i64),
    Null,
    Text(String),
    Timestamp(DateTime<FixedOffset>),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Canonical textual form used in route paths and query strings.
    ///
    /// Returns `None` for `Null` (a null never expands into a URI) and for
    /// non-finite floats, which have no stable textual form.
    #[must_use]
    pub fn route_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Enum(e) => Some(e.render_text().to_string()),
            Self::Float(f) => f.is_finite().then(|| f.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Timestamp(ts) => Some(ts.to_rfc3339_opts(SecondsFormat::Millis, false)),
            Self::Uint(u) => Some(u.to_string()),
            Self::Ulid(u) => Some(u.to_string()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Ulid> for Value {
    fn from(v: Ulid) -> Self {
        Self::Ulid(v)
    }
}

impl From<ValueEnum> for Value {
    fn from(v: ValueEnum) -> Self {
        Self::Enum(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

///
/// ValueEnum
///
/// Enum-typed property value: the variant identifier plus an optional
/// explicit string mapping. Rendering uses the mapping when present and
/// falls back to the variant identifier.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValueEnum {
    variant: String,
    mapped: Option<String>,
}

impl ValueEnum {
    #[must_use]
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            mapped: None,
        }
    }

    /// Variant with an explicit wire mapping.
    #[must_use]
    pub fn mapped(variant: impl Into<String>, mapped: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            mapped: Some(mapped.into()),
        }
    }

    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }

    #[must_use]
    pub fn render_text(&self) -> &str {
        self.mapped.as_deref().unwrap_or(&self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn route_text_formats_scalars() {
        assert_eq!(Value::Int(-7).route_text().as_deref(), Some("-7"));
        assert_eq!(Value::Uint(42).route_text().as_deref(), Some("42"));
        assert_eq!(Value::Bool(true).route_text().as_deref(), Some("true"));
        assert_eq!(Value::from("abc").route_text().as_deref(), Some("abc"));
    }

    #[test]
    fn route_text_rejects_null_and_non_finite() {
        assert_eq!(Value::Null.route_text(), None);
        assert_eq!(Value::Float(f64::NAN).route_text(), None);
        assert_eq!(Value::Float(f64::INFINITY).route_text(), None);
    }

    #[test]
    fn timestamp_renders_iso8601_with_offset_millis() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let ts = tz
            .with_ymd_and_hms(2000, 11, 22, 18, 5, 32)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(999))
            .unwrap();
        assert_eq!(
            Value::Timestamp(ts).route_text().as_deref(),
            Some("2000-11-22T18:05:32.999+02:00")
        );
    }

    #[test]
    fn enum_rendering_prefers_explicit_mapping() {
        assert_eq!(ValueEnum::new("Active").render_text(), "Active");
        assert_eq!(ValueEnum::mapped("Active", "active").render_text(), "active");
    }

    #[test]
    fn option_lifts_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }
}
