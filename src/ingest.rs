//! Turning raw text and uploaded files into a [`JsonValue`].

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use log::{info, warn};
use serde_json::Number;

use crate::error::IngestError;
use crate::json_graph::JsonValue;

/// Sample document shown when nothing else has been loaded.
pub const EXAMPLE_JSON: &str = r#"{
  "name": "John Doe",
  "age": 30,
  "address": {
    "street": "123 Main St",
    "city": "New York"
  },
  "hobbies": [
    "reading",
    "gaming",
    "coding"
  ]
}"#;

/// Parse JSON text, keeping key order and duplicate keys.
pub fn parse_json_text(text: &str) -> Result<JsonValue, IngestError> {
	parse_json_bytes(text.as_bytes())
}

fn parse_json_bytes(bytes: &[u8]) -> Result<JsonValue, IngestError> {
	serde_json::from_slice(bytes).map_err(|e| {
		warn!("json-graph: rejected JSON input: {}", e);
		IngestError::InputFormat(e)
	})
}

/// Read CSV with a header row into an array of record objects.
///
/// Cells are typed the way a dataframe export would type them: empty cells
/// become `null`, numeric cells numbers, `true`/`false` booleans, and
/// everything else strings.
pub fn parse_csv_records(text: &str) -> Result<JsonValue, IngestError> {
	read_csv_records(text.as_bytes())
}

fn read_csv_records(bytes: &[u8]) -> Result<JsonValue, IngestError> {
	let mut reader = csv::ReaderBuilder::new()
		.trim(csv::Trim::Headers)
		.from_reader(bytes);
	let headers = reader.headers()?.clone();

	let mut rows = Vec::new();
	for record in reader.records() {
		let record = record?;
		let fields = headers
			.iter()
			.zip(record.iter())
			.map(|(header, cell)| (header.to_string(), infer_cell(cell)))
			.collect();
		rows.push(JsonValue::Object(fields));
	}
	Ok(JsonValue::Array(rows))
}

fn infer_cell(cell: &str) -> JsonValue {
	let trimmed = cell.trim();
	if trimmed.is_empty() {
		return JsonValue::Null;
	}
	if let Ok(n) = trimmed.parse::<i64>() {
		return JsonValue::Number(n.into());
	}
	if let Ok(n) = trimmed.parse::<Number>() {
		return JsonValue::Number(n);
	}
	if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
		// "inf" and "NaN" parse as f64 but are not JSON numbers; they stay text.
		return JsonValue::Number(n);
	}
	if trimmed.eq_ignore_ascii_case("true") {
		return JsonValue::Boolean(true);
	}
	if trimmed.eq_ignore_ascii_case("false") {
		return JsonValue::Boolean(false);
	}
	JsonValue::String(cell.to_string())
}

/// Read the first sheet of a workbook into an array of record objects.
///
/// The first row holds the column names. Text cells are typed like CSV cells;
/// whole-number floats become integers, since spreadsheets store every number
/// as a float.
pub fn parse_spreadsheet_records(bytes: &[u8]) -> Result<JsonValue, IngestError> {
	let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
	let range = workbook
		.worksheet_range_at(0)
		.ok_or(IngestError::EmptyWorkbook)??;

	let mut rows = range.rows();
	let Some(header_row) = rows.next() else {
		return Ok(JsonValue::Array(Vec::new()));
	};
	let headers: Vec<String> = header_row
		.iter()
		.enumerate()
		.map(|(i, cell)| match cell.to_string().trim() {
			"" => format!("Unnamed: {i}"),
			name => name.to_string(),
		})
		.collect();

	let records = rows
		.map(|row| {
			JsonValue::Object(
				headers
					.iter()
					.zip(row)
					.map(|(header, cell)| (header.clone(), infer_sheet_cell(cell)))
					.collect(),
			)
		})
		.collect();
	Ok(JsonValue::Array(records))
}

/// Largest float that still holds every integer below it exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn infer_sheet_cell(cell: &Data) -> JsonValue {
	match cell {
		Data::Empty | Data::Error(_) => JsonValue::Null,
		Data::Bool(b) => JsonValue::Boolean(*b),
		Data::Int(n) => JsonValue::Number((*n).into()),
		Data::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT => {
			JsonValue::Number((*f as i64).into())
		}
		Data::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
		Data::String(s) => infer_cell(s),
		other => JsonValue::String(other.to_string()),
	}
}

/// Load an uploaded file, choosing the parser from its extension.
pub fn load_file(file_name: &str, contents: &[u8]) -> Result<JsonValue, IngestError> {
	let extension = file_name
		.rsplit_once('.')
		.map(|(_, ext)| ext.to_ascii_lowercase())
		.unwrap_or_default();

	let value = match extension.as_str() {
		"json" => parse_json_bytes(contents)?,
		"csv" => read_csv_records(contents)?,
		"xlsx" | "xls" => parse_spreadsheet_records(contents)?,
		_ => {
			warn!("json-graph: unsupported file `{}`", file_name);
			return Err(IngestError::UnsupportedFormat(extension));
		}
	};
	info!(
		"json-graph: loaded `{}` ({} values)",
		file_name,
		value.count_values()
	);
	Ok(value)
}

/// Indented JSON for download or display.
pub fn to_pretty_json(value: &JsonValue) -> String {
	// Serializing a JsonValue into a String cannot fail: keys are strings and
	// numbers are always finite.
	serde_json::to_string_pretty(value).unwrap_or_default()
}
