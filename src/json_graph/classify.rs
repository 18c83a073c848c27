//! Semantic categories for JSON values and their display colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::JsonValue;

/// Fallback color for categories outside the fixed table.
pub const DEFAULT_COLOR: &str = "#718096";

/// Coarse kind of a JSON value. Drives node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
	Object,
	Array,
	String,
	Number,
	Boolean,
	Null,
}

impl NodeCategory {
	/// All categories, in classification order.
	pub const ALL: [NodeCategory; 6] = [
		NodeCategory::Object,
		NodeCategory::Array,
		NodeCategory::String,
		NodeCategory::Number,
		NodeCategory::Boolean,
		NodeCategory::Null,
	];

	/// CSS hex color for nodes of this category.
	pub const fn color(self) -> &'static str {
		match self {
			NodeCategory::Object => "#2B6CB0",
			NodeCategory::Array => "#4C51BF",
			NodeCategory::String => "#48BB78",
			NodeCategory::Number => "#ED8936",
			NodeCategory::Boolean => "#9F7AEA",
			NodeCategory::Null => "#718096",
		}
	}

	/// Stable lowercase name, as used in serialized graphs.
	pub const fn as_str(self) -> &'static str {
		match self {
			NodeCategory::Object => "object",
			NodeCategory::Array => "array",
			NodeCategory::String => "string",
			NodeCategory::Number => "number",
			NodeCategory::Boolean => "boolean",
			NodeCategory::Null => "null",
		}
	}
}

impl fmt::Display for NodeCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a category name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown node category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for NodeCategory {
	type Err = UnknownCategory;

	/// Accepts both the canonical names and the short aliases
	/// (`dict`, `list`, `str`, `num`, `bool`).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"object" | "dict" => Ok(NodeCategory::Object),
			"array" | "list" => Ok(NodeCategory::Array),
			"string" | "str" => Ok(NodeCategory::String),
			"number" | "num" => Ok(NodeCategory::Number),
			"boolean" | "bool" => Ok(NodeCategory::Boolean),
			"null" => Ok(NodeCategory::Null),
			_ => Err(UnknownCategory(s.to_string())),
		}
	}
}

/// Map a JSON value to its category.
pub fn classify(value: &JsonValue) -> NodeCategory {
	match value {
		JsonValue::Object(_) => NodeCategory::Object,
		JsonValue::Array(_) => NodeCategory::Array,
		JsonValue::String(_) => NodeCategory::String,
		JsonValue::Number(_) => NodeCategory::Number,
		JsonValue::Boolean(_) => NodeCategory::Boolean,
		JsonValue::Null => NodeCategory::Null,
	}
}

/// Color for an externally supplied category name, gray when unrecognised.
pub fn category_color(name: &str) -> &'static str {
	name.parse::<NodeCategory>()
		.map(NodeCategory::color)
		.unwrap_or(DEFAULT_COLOR)
}
