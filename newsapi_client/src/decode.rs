//! Schema-driven JSON decoding with path-qualified failure diagnostics.
//!
//! Bodies are parsed into a [`serde_json::Value`] tree and then fed to the
//! target type through a small deserializer that records where it is. Serde's
//! structured error hooks (`missing_field`, `invalid_type`, ...) map straight
//! onto [`DecodeFailure`] variants, so classification never inspects message
//! text. Dates follow whatever the target type declares; the news types use
//! `chrono::DateTime<Utc>`, i.e. ISO-8601 / RFC 3339.

use std::fmt;

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, Expected, MapAccess,
    SeqAccess, Unexpected, VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::Value;

/// The first structural failure hit while decoding a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// A value of the wrong JSON kind.
    TypeMismatch {
        expected: String,
        path: Vec<String>,
        detail: String,
    },
    /// `null` where a value was required.
    ValueNotFound {
        expected: String,
        path: Vec<String>,
        detail: String,
    },
    /// A required key is absent. `path` is the containing object.
    KeyNotFound {
        key: String,
        path: Vec<String>,
        detail: String,
    },
    /// Invalid JSON, out-of-range values, unknown variants, bad dates.
    DataCorrupted { path: Vec<String>, detail: String },
    Unknown(String),
}

impl DecodeFailure {
    fn data_corrupted(detail: impl Into<String>) -> Self {
        Self::DataCorrupted {
            path: Vec::new(),
            detail: detail.into(),
        }
    }

    /// Prefixes the coding path with `segment` as the failure bubbles up.
    fn at(mut self, segment: impl Into<String>) -> Self {
        match &mut self {
            Self::TypeMismatch { path, .. }
            | Self::ValueNotFound { path, .. }
            | Self::KeyNotFound { path, .. }
            | Self::DataCorrupted { path, .. } => path.insert(0, segment.into()),
            Self::Unknown(_) => {}
        }
        self
    }

    /// Coding path segments joined with `.`; empty at the document root.
    pub fn coding_path(&self) -> String {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::ValueNotFound { path, .. }
            | Self::KeyNotFound { path, .. }
            | Self::DataCorrupted { path, .. } => path.join("."),
            Self::Unknown(_) => String::new(),
        }
    }

    /// Path of the offending field. For a missing key this includes the key.
    pub fn field_path(&self) -> String {
        match self {
            Self::KeyNotFound { key, path, .. } => {
                let mut full = path.clone();
                full.push(key.clone());
                full.join(".")
            }
            _ => self.coding_path(),
        }
    }

    /// Human-readable, path-qualified description of the failure.
    pub fn reason(&self) -> String {
        let at = self.coding_path();
        match self {
            Self::TypeMismatch {
                expected, detail, ..
            } => format!("Type mismatch for type {} at {}: {}", expected, at, detail),
            Self::ValueNotFound {
                expected, detail, ..
            } => format!("Value not found for type {} at {}: {}", expected, at, detail),
            Self::KeyNotFound { key, detail, .. } => {
                format!("Key '{}' not found at {}: {}", key, at, detail)
            }
            Self::DataCorrupted { detail, .. } => format!("Data corrupted at {}: {}", at, detail),
            Self::Unknown(description) => format!("Unknown decoding error: {}", description),
        }
    }

    fn from_parse_error(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Eof
            | serde_json::error::Category::Data => {
                Self::data_corrupted(format!("The given data was not valid JSON. ({})", e))
            }
            serde_json::error::Category::Io => Self::Unknown(e.to_string()),
        }
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

impl std::error::Error for DecodeFailure {}

impl de::Error for DecodeFailure {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::data_corrupted(msg.to_string())
    }

    fn invalid_type(unexp: Unexpected, exp: &dyn Expected) -> Self {
        if unexp == Unexpected::Unit {
            Self::ValueNotFound {
                expected: exp.to_string(),
                path: Vec::new(),
                detail: format!("Expected {} value but found null instead.", exp),
            }
        } else {
            Self::TypeMismatch {
                expected: exp.to_string(),
                path: Vec::new(),
                detail: format!("Expected to decode {} but found {} instead.", exp, unexp),
            }
        }
    }

    fn invalid_value(unexp: Unexpected, exp: &dyn Expected) -> Self {
        Self::data_corrupted(format!("Invalid value {}, expected {}.", unexp, exp))
    }

    fn invalid_length(len: usize, exp: &dyn Expected) -> Self {
        Self::data_corrupted(format!("Invalid length {}, expected {}.", len, exp))
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        Self::data_corrupted(format!(
            "Cannot initialize from invalid value '{}', expected one of {:?}.",
            variant, expected
        ))
    }

    fn unknown_field(field: &str, expected: &'static [&'static str]) -> Self {
        Self::data_corrupted(format!(
            "Unknown key '{}', expected one of {:?}.",
            field, expected
        ))
    }

    fn missing_field(field: &'static str) -> Self {
        Self::KeyNotFound {
            key: field.to_string(),
            path: Vec::new(),
            detail: format!("No value associated with key '{}'.", field),
        }
    }

    fn duplicate_field(field: &'static str) -> Self {
        Self::data_corrupted(format!("Duplicate key '{}'.", field))
    }
}

/// Decodes a JSON body into `T`, reporting the first structural failure.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeFailure> {
    let value: Value = serde_json::from_slice(body).map_err(DecodeFailure::from_parse_error)?;
    T::deserialize(ValueDeserializer::new(&value))
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Unexpected::Unsigned(u)
            } else if let Some(i) = n.as_i64() {
                Unexpected::Signed(i)
            } else {
                Unexpected::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

struct ValueDeserializer<'de> {
    value: &'de Value,
}

impl<'de> ValueDeserializer<'de> {
    fn new(value: &'de Value) -> Self {
        Self { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = DecodeFailure;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeFailure> {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    visitor.visit_u64(u)
                } else if let Some(i) = n.as_i64() {
                    visitor.visit_i64(i)
                } else {
                    visitor.visit_f64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Array(items) => {
                let mut seq = SeqAccessor {
                    iter: items.iter(),
                    index: 0,
                };
                let out = visitor.visit_seq(&mut seq)?;
                if seq.iter.len() == 0 {
                    Ok(out)
                } else {
                    Err(de::Error::invalid_length(items.len(), &"fewer elements in array"))
                }
            }
            Value::Object(map) => visitor.visit_map(MapAccessor {
                iter: map.iter(),
                pending: None,
            }),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeFailure> {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeFailure> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeFailure> {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumAccessor {
                variant,
                value: None,
            }),
            Value::Object(map) if map.len() == 1 => {
                let (variant, value) = map
                    .iter()
                    .next()
                    .ok_or_else(|| DecodeFailure::data_corrupted("Empty enum object."))?;
                visitor.visit_enum(EnumAccessor {
                    variant,
                    value: Some(value),
                })
            }
            other => Err(de::Error::invalid_type(
                unexpected(other),
                &"a string or a single-key object",
            )),
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, DecodeFailure> {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct identifier
    }
}

struct SeqAccessor<'de> {
    iter: std::slice::Iter<'de, Value>,
    index: usize,
}

impl<'de> SeqAccess<'de> for SeqAccessor<'de> {
    type Error = DecodeFailure;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, DecodeFailure> {
        let Some(value) = self.iter.next() else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        seed.deserialize(ValueDeserializer::new(value))
            .map(Some)
            .map_err(|e| e.at(index.to_string()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapAccessor<'de> {
    iter: serde_json::map::Iter<'de>,
    pending: Option<(&'de String, &'de Value)>,
}

impl<'de> MapAccess<'de> for MapAccessor<'de> {
    type Error = DecodeFailure;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, DecodeFailure> {
        let Some((key, value)) = self.iter.next() else {
            return Ok(None);
        };
        self.pending = Some((key, value));
        seed.deserialize(BorrowedStrDeserializer::<DecodeFailure>::new(key))
            .map(Some)
            .map_err(|e| e.at(key.as_str()))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, DecodeFailure> {
        let (key, value) = self
            .pending
            .take()
            .ok_or_else(|| DecodeFailure::data_corrupted("Value requested before key."))?;
        seed.deserialize(ValueDeserializer::new(value))
            .map_err(|e| e.at(key.as_str()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumAccessor<'de> {
    variant: &'de str,
    value: Option<&'de Value>,
}

impl<'de> EnumAccess<'de> for EnumAccessor<'de> {
    type Error = DecodeFailure;
    type Variant = VariantAccessor<'de>;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant), DecodeFailure> {
        let tag = seed.deserialize(BorrowedStrDeserializer::<DecodeFailure>::new(self.variant))?;
        Ok((
            tag,
            VariantAccessor {
                variant: self.variant,
                value: self.value,
            },
        ))
    }
}

struct VariantAccessor<'de> {
    variant: &'de str,
    value: Option<&'de Value>,
}

impl<'de> VariantAccess<'de> for VariantAccessor<'de> {
    type Error = DecodeFailure;

    fn unit_variant(self) -> Result<(), DecodeFailure> {
        match self.value {
            None | Some(Value::Null) => Ok(()),
            Some(other) => Err(de::Error::invalid_type(unexpected(other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(
        self,
        seed: T,
    ) -> Result<T::Value, DecodeFailure> {
        match self.value {
            Some(value) => seed
                .deserialize(ValueDeserializer::new(value))
                .map_err(|e| e.at(self.variant)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, DecodeFailure> {
        match self.value {
            Some(value) => de::Deserializer::deserialize_seq(ValueDeserializer::new(value), visitor)
                .map_err(|e| e.at(self.variant)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeFailure> {
        match self.value {
            Some(value) => de::Deserializer::deserialize_map(ValueDeserializer::new(value), visitor)
                .map_err(|e| e.at(self.variant)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        name: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Story {
        title: Option<String>,
        published_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        items: Vec<Item>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Status {
        Ok,
        Error,
    }

    #[derive(Debug, Deserialize)]
    struct Envelope {
        status: Status,
    }

    #[test]
    fn decodes_matching_body() {
        let item: Item = decode(br#"{"id":1,"name":"Test Item"}"#).unwrap();
        assert_eq!(
            item,
            Item {
                id: 1,
                name: "Test Item".to_string()
            }
        );
    }

    #[test]
    fn ignores_unknown_keys() {
        let item: Item = decode(br#"{"id":2,"name":"x","extra":[1,{"a":null}]}"#).unwrap();
        assert_eq!(item.id, 2);
    }

    #[test]
    fn missing_key_names_the_key() {
        let err = decode::<Item>(br#"{"invalid_field":"Test"}"#).unwrap_err();
        assert!(matches!(err, DecodeFailure::KeyNotFound { ref key, .. } if key == "id"));
        assert_eq!(err.coding_path(), "");
        assert_eq!(err.field_path(), "id");
        insta::assert_snapshot!(
            err.reason(),
            @"Key 'id' not found at : No value associated with key 'id'."
        );
    }

    #[test]
    fn nested_missing_key_carries_index_path() {
        let err = decode::<Page>(br#"{"items":[{"id":1,"name":"a"},{"id":2}]}"#).unwrap_err();
        assert_eq!(err.coding_path(), "items.1");
        assert_eq!(err.field_path(), "items.1.name");
        assert!(err.reason().starts_with("Key 'name' not found at items.1:"));
    }

    #[test]
    fn wrong_kind_is_type_mismatch() {
        let err = decode::<Item>(br#"{"id":"one","name":"x"}"#).unwrap_err();
        match &err {
            DecodeFailure::TypeMismatch { expected, path, .. } => {
                assert_eq!(expected, "i64");
                assert_eq!(path, &vec!["id".to_string()]);
            }
            other => panic!("unexpected failure: {:?}", other),
        }
        insta::assert_snapshot!(
            err.reason(),
            @r#"Type mismatch for type i64 at id: Expected to decode i64 but found string "one" instead."#
        );
    }

    #[test]
    fn null_for_required_value_is_value_not_found() {
        let err = decode::<Item>(br#"{"id":1,"name":null}"#).unwrap_err();
        assert!(matches!(err, DecodeFailure::ValueNotFound { .. }));
        assert_eq!(err.coding_path(), "name");
        assert!(err.reason().starts_with("Value not found for type a string at name:"));
    }

    #[test]
    fn null_for_optional_value_is_none() {
        let story: Story = decode(br#"{"title":null,"publishedAt":null}"#).unwrap();
        assert_eq!(
            story,
            Story {
                title: None,
                published_at: None
            }
        );
    }

    #[test]
    fn iso8601_dates_decode() {
        let story: Story =
            decode(br#"{"title":"t","publishedAt":"2024-10-01T08:30:00Z"}"#).unwrap();
        assert_eq!(
            story.published_at,
            Some(Utc.with_ymd_and_hms(2024, 10, 1, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn malformed_date_is_data_corrupted_at_field() {
        let err = decode::<Story>(br#"{"publishedAt":"yesterday"}"#).unwrap_err();
        assert!(matches!(err, DecodeFailure::DataCorrupted { .. }));
        assert_eq!(err.coding_path(), "publishedAt");
        assert!(err.reason().starts_with("Data corrupted at publishedAt:"));
    }

    #[test]
    fn invalid_json_is_data_corrupted_at_root() {
        let err = decode::<Item>(b"{not valid json}").unwrap_err();
        assert!(matches!(err, DecodeFailure::DataCorrupted { .. }));
        assert_eq!(err.coding_path(), "");
        assert!(err
            .reason()
            .starts_with("Data corrupted at : The given data was not valid JSON."));
    }

    #[test]
    fn empty_body_is_data_corrupted() {
        let err = decode::<Item>(b"").unwrap_err();
        assert!(matches!(err, DecodeFailure::DataCorrupted { .. }));
    }

    #[test]
    fn out_of_range_number_is_data_corrupted() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Small {
            n: u8,
        }
        let err = decode::<Small>(br#"{"n":300}"#).unwrap_err();
        assert!(matches!(err, DecodeFailure::DataCorrupted { .. }));
        assert_eq!(err.coding_path(), "n");
    }

    #[test]
    fn unit_enum_variants() {
        let env: Envelope = decode(br#"{"status":"ok"}"#).unwrap();
        assert_eq!(env.status, Status::Ok);

        let err = decode::<Envelope>(br#"{"status":"maybe"}"#).unwrap_err();
        assert!(matches!(err, DecodeFailure::DataCorrupted { .. }));
        assert_eq!(err.coding_path(), "status");
    }

    #[test]
    fn wrong_container_kind_is_type_mismatch() {
        let err = decode::<Page>(br#"{"items":{"id":1}}"#).unwrap_err();
        assert!(matches!(err, DecodeFailure::TypeMismatch { .. }));
        assert_eq!(err.coding_path(), "items");
    }

    #[test]
    fn only_first_failure_is_reported() {
        let err = decode::<Page>(br#"{"items":[{"id":"x"},{"name":5}]}"#).unwrap_err();
        assert_eq!(err.coding_path(), "items.0.id");
    }

    #[test]
    fn unknown_fallback_reason() {
        let err = DecodeFailure::Unknown("stream closed".to_string());
        assert_eq!(err.reason(), "Unknown decoding error: stream closed");
        assert_eq!(err.field_path(), "");
    }
}
