//! Error types for ingestion and graph building.

use std::fmt;

use thiserror::Error;

/// Failure to turn raw input into a JSON document.
#[derive(Debug, Error)]
pub enum IngestError {
	/// The text is not valid JSON.
	#[error("invalid JSON: {0}")]
	InputFormat(#[from] serde_json::Error),

	/// The CSV could not be read (bad quoting, ragged rows, ...).
	#[error("invalid CSV: {0}")]
	Csv(#[from] csv::Error),

	/// The spreadsheet could not be opened or its first sheet read.
	#[error("invalid spreadsheet: {0}")]
	Spreadsheet(#[from] calamine::Error),

	/// The spreadsheet opened but contains no sheets.
	#[error("the workbook has no sheets")]
	EmptyWorkbook,

	/// The file extension is not one we can load.
	#[error("unsupported file type `{0}`: expected a .json, .csv or .xlsx file")]
	UnsupportedFormat(String),
}

/// Which guard a build tripped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeLimit {
	/// More nodes than allowed.
	Nodes(usize),
	/// Nesting deeper than allowed.
	Depth(usize),
}

impl fmt::Display for SizeLimit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SizeLimit::Nodes(max) => write!(f, "more than {max} values"),
			SizeLimit::Depth(max) => write!(f, "nesting deeper than {max} levels"),
		}
	}
}

/// Failure to build a graph from a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	/// The document exceeds the configured build limits.
	#[error("input too large: {0}")]
	InputTooLarge(SizeLimit),
}

/// Any error the explorer can surface to the user.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Ingest(#[from] IngestError),

	#[error(transparent)]
	Graph(#[from] GraphError),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_are_readable() {
		let err = Error::from(GraphError::InputTooLarge(SizeLimit::Nodes(10)));
		assert_eq!(err.to_string(), "input too large: more than 10 values");

		let err = Error::from(IngestError::UnsupportedFormat("txt".into()));
		assert_eq!(
			err.to_string(),
			"unsupported file type `txt`: expected a .json, .csv or .xlsx file"
		);

		let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err = Error::from(IngestError::from(json_err));
		assert!(err.to_string().starts_with("invalid JSON: "));
	}
}
