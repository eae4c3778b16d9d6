/// Serde utility functions for common patterns
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Deserialize an optional integer leniently.
///
/// Tool calls frequently arrive with loosely-typed arguments, so this
/// accepts any JSON number and floors fractional values instead of
/// rejecting them:
///
/// - Missing field or `null` → `None`
/// - Integer → `Some(value)`
/// - Float → `Some(value.floor())`
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::lenient_int")]
///     first: Option<i64>,
/// }
/// ```
pub fn lenient_int<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientIntVisitor;

    impl<'de> serde::de::Visitor<'de> for LenientIntVisitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer, a float, or null")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.min(i64::MAX as u64) as i64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.floor() as i64))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientIntVisitor)
        }
    }

    de.deserialize_any(LenientIntVisitor)
}

/// Deserialize an optional cursor leniently.
///
/// Cursors are opaque strings, but callers sometimes send them as raw
/// scalars. Strings pass through unchanged; numbers and booleans are
/// stringified; `null` or a missing field becomes `None`.
pub fn lenient_cursor<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientCursorVisitor;

    impl<'de> serde::de::Visitor<'de> for LenientCursorVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a scalar, or null")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientCursorVisitor)
        }
    }

    de.deserialize_any(LenientCursorVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct IntHolder {
        #[serde(default, deserialize_with = "super::lenient_int")]
        value: Option<i64>,
    }

    #[derive(Deserialize)]
    struct CursorHolder {
        #[serde(default, deserialize_with = "super::lenient_cursor")]
        value: Option<String>,
    }

    #[test]
    fn test_lenient_int_integer() {
        let holder: IntHolder = serde_json::from_value(serde_json::json!({"value": 42})).unwrap();
        assert_eq!(holder.value, Some(42));
    }

    #[test]
    fn test_lenient_int_floors_floats() {
        let holder: IntHolder = serde_json::from_value(serde_json::json!({"value": 15.7})).unwrap();
        assert_eq!(holder.value, Some(15));

        let holder: IntHolder = serde_json::from_value(serde_json::json!({"value": -5.7})).unwrap();
        assert_eq!(holder.value, Some(-6));
    }

    #[test]
    fn test_lenient_int_null_and_missing() {
        let holder: IntHolder = serde_json::from_value(serde_json::json!({"value": null})).unwrap();
        assert_eq!(holder.value, None);

        let holder: IntHolder = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(holder.value, None);
    }

    #[test]
    fn test_lenient_cursor_string_passthrough() {
        let holder: CursorHolder =
            serde_json::from_value(serde_json::json!({"value": "cursor1"})).unwrap();
        assert_eq!(holder.value, Some("cursor1".to_string()));
    }

    #[test]
    fn test_lenient_cursor_stringifies_scalars() {
        let holder: CursorHolder =
            serde_json::from_value(serde_json::json!({"value": 42})).unwrap();
        assert_eq!(holder.value, Some("42".to_string()));

        let holder: CursorHolder =
            serde_json::from_value(serde_json::json!({"value": true})).unwrap();
        assert_eq!(holder.value, Some("true".to_string()));
    }

    #[test]
    fn test_lenient_cursor_null() {
        let holder: CursorHolder =
            serde_json::from_value(serde_json::json!({"value": null})).unwrap();
        assert_eq!(holder.value, None);
    }
}
