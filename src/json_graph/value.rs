//! In-memory JSON document model.
//!
//! [`JsonValue`] is a plain tagged union. Objects keep their entries as an
//! ordered list rather than a map, so key order survives parsing and duplicate
//! keys from a lenient source each keep their own entry.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

/// A JSON value as read from the input document.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonValue {
	/// Ordered `(key, value)` entries. Keys may repeat.
	Object(Vec<(String, JsonValue)>),
	/// Elements in index order.
	Array(Vec<JsonValue>),
	String(String),
	Number(Number),
	Boolean(bool),
	Null,
}

impl JsonValue {
	/// Textual form of a scalar as shown in node labels.
	///
	/// Strings are returned verbatim (no quotes or escaping). Returns `None` for
	/// objects and arrays.
	pub fn scalar_text(&self) -> Option<String> {
		match self {
			JsonValue::String(s) => Some(s.clone()),
			JsonValue::Number(n) => Some(n.to_string()),
			JsonValue::Boolean(b) => Some(b.to_string()),
			JsonValue::Null => Some("null".to_string()),
			JsonValue::Object(_) | JsonValue::Array(_) => None,
		}
	}

	/// Total number of values in this document, the value itself included.
	pub fn count_values(&self) -> usize {
		let mut count = 0;
		let mut stack = vec![self];
		while let Some(value) = stack.pop() {
			count += 1;
			match value {
				JsonValue::Object(entries) => stack.extend(entries.iter().map(|(_, v)| v)),
				JsonValue::Array(items) => stack.extend(items.iter()),
				_ => {}
			}
		}
		count
	}
}

impl From<serde_json::Value> for JsonValue {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => JsonValue::Null,
			serde_json::Value::Bool(b) => JsonValue::Boolean(b),
			serde_json::Value::Number(n) => JsonValue::Number(n),
			serde_json::Value::String(s) => JsonValue::String(s),
			serde_json::Value::Array(items) => {
				JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
			}
			serde_json::Value::Object(map) => JsonValue::Object(
				map.into_iter()
					.map(|(k, v)| (k, JsonValue::from(v)))
					.collect(),
			),
		}
	}
}

/// Field name serde_json uses for numbers kept as their source literal.
const EXACT_NUMBER_KEY: &str = "$serde_json::private::Number";

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
	type Value = JsonValue;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("any JSON value")
	}

	fn visit_bool<E>(self, v: bool) -> Result<JsonValue, E> {
		Ok(JsonValue::Boolean(v))
	}

	fn visit_i64<E>(self, v: i64) -> Result<JsonValue, E> {
		Ok(JsonValue::Number(v.into()))
	}

	fn visit_u64<E>(self, v: u64) -> Result<JsonValue, E> {
		Ok(JsonValue::Number(v.into()))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonValue, E> {
		Number::from_f64(v)
			.map(JsonValue::Number)
			.ok_or_else(|| E::custom(format!("non-finite number {v}")))
	}

	fn visit_str<E>(self, v: &str) -> Result<JsonValue, E> {
		Ok(JsonValue::String(v.to_owned()))
	}

	fn visit_string<E>(self, v: String) -> Result<JsonValue, E> {
		Ok(JsonValue::String(v))
	}

	fn visit_unit<E>(self) -> Result<JsonValue, E> {
		Ok(JsonValue::Null)
	}

	fn visit_none<E>(self) -> Result<JsonValue, E> {
		Ok(JsonValue::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
		Deserialize::deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonValue, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(JsonValue::Array(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonValue, A::Error> {
		let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
		while let Some(key) = map.next_key::<String>()? {
			// serde_json passes exact numbers as a one-entry map holding the literal.
			if entries.is_empty() && key == EXACT_NUMBER_KEY {
				let literal: String = map.next_value()?;
				return literal
					.parse()
					.map(JsonValue::Number)
					.map_err(de::Error::custom);
			}
			entries.push((key, map.next_value()?));
		}
		Ok(JsonValue::Object(entries))
	}
}

impl<'de> Deserialize<'de> for JsonValue {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(JsonValueVisitor)
	}
}

impl Serialize for JsonValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			JsonValue::Null => serializer.serialize_unit(),
			JsonValue::Boolean(b) => serializer.serialize_bool(*b),
			JsonValue::Number(n) => n.serialize(serializer),
			JsonValue::String(s) => serializer.serialize_str(s),
			JsonValue::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			JsonValue::Object(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(text: &str) -> JsonValue {
		serde_json::from_str(text).unwrap()
	}

	#[test]
	fn keeps_object_key_order() {
		let value = parse(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#);
		let JsonValue::Object(entries) = value else {
			panic!("expected object");
		};
		let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
		assert_eq!(keys, ["zeta", "alpha", "mid"]);
	}

	#[test]
	fn keeps_duplicate_keys() {
		let value = parse(r#"{"a": 1, "a": 2}"#);
		let JsonValue::Object(entries) = value else {
			panic!("expected object");
		};
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].1, JsonValue::Number(1.into()));
		assert_eq!(entries[1].1, JsonValue::Number(2.into()));
	}

	#[test]
	fn scalar_text_forms() {
		assert_eq!(parse(r#""héllo""#).scalar_text().as_deref(), Some("héllo"));
		assert_eq!(parse("3.14").scalar_text().as_deref(), Some("3.14"));
		assert_eq!(parse("-7").scalar_text().as_deref(), Some("-7"));
		assert_eq!(parse("true").scalar_text().as_deref(), Some("true"));
		assert_eq!(parse("null").scalar_text().as_deref(), Some("null"));
		assert_eq!(parse("[]").scalar_text(), None);
		assert_eq!(parse("{}").scalar_text(), None);
	}

	#[test]
	fn wide_numbers_keep_their_digits() {
		let value = parse(r#"{"big": 100000000000000000000, "neg": -18446744073709551617}"#);
		let JsonValue::Object(entries) = value else {
			panic!("expected object");
		};
		assert_eq!(
			entries[0].1.scalar_text().as_deref(),
			Some("100000000000000000000")
		);
		assert_eq!(
			entries[1].1.scalar_text().as_deref(),
			Some("-18446744073709551617")
		);
	}

	#[test]
	fn counts_every_value() {
		assert_eq!(parse("null").count_values(), 1);
		assert_eq!(parse("{}").count_values(), 1);
		assert_eq!(parse(r#"{"a": 1, "b": [2, 3]}"#).count_values(), 5);
		assert_eq!(parse(r#"[[[]], {"k": null}]"#).count_values(), 5);
	}

	#[test]
	fn serializes_back_in_order() {
		let text = r#"{"b":[1,"x",null],"a":{"c":false},"b":2.5}"#;
		assert_eq!(serde_json::to_string(&parse(text)).unwrap(), text);
	}

	#[test]
	fn converts_from_serde_value() {
		let value = JsonValue::from(serde_json::json!({"a": [true, null]}));
		assert_eq!(
			value,
			JsonValue::Object(vec![(
				"a".into(),
				JsonValue::Array(vec![JsonValue::Boolean(true), JsonValue::Null])
			)])
		);
	}
}
