/// Output formatting: pretty JSON or fixed-column text tables.
use std::io::Write;

use comfy_table::{Cell, CellAlignment, ColumnConstraint, Table, Width, presets::ASCII_FULL};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::args::OutputType;
use super::tables::TableSchema;
use crate::types::ErrorOutput;

/// Errors from projecting a payload into a table.
///
/// A missing field means a schema no longer matches what its operation
/// returns; nothing at runtime can recover from that.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A field required by the column schema is absent.
    #[error("Response field '{field}' is missing")]
    MissingField { field: String },

    /// The rows path does not point at an array.
    #[error("Response field '{field}' is not a list")]
    UnexpectedShape { field: String },

    /// The payload could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output context passed to commands.
pub struct OutputCtx {
    pub output_type: OutputType,
    /// When true, emit timing events.
    pub debug: bool,
}

impl OutputCtx {
    #[must_use]
    pub fn new(output_type: OutputType, debug: bool) -> Self {
        Self { output_type, debug }
    }

    /// Start a named debug timer. Emits elapsed time on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

/// Render a payload in the requested output type.
///
/// `text` uses the schema when there is one and falls back to JSON otherwise.
///
/// # Errors
///
/// Returns `OutputError` when the payload does not fit the schema.
pub fn render(
    payload: &Value,
    output_type: OutputType,
    schema: Option<&TableSchema>,
) -> Result<String, OutputError> {
    match (output_type, schema) {
        (OutputType::Text, Some(schema)) => render_table(payload, schema),
        (OutputType::Text, None) | (OutputType::Json, _) => render_json(payload),
    }
}

/// Pretty-print with two-space indentation, unfiltered.
///
/// # Errors
///
/// Returns `OutputError::Json` if serialization fails.
pub fn render_json(payload: &Value) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(payload)?)
}

/// Fixed-width, centered table with a header row.
///
/// # Errors
///
/// Returns `OutputError` when a schema field is missing from the payload.
pub fn render_table(payload: &Value, schema: &TableSchema) -> Result<String, OutputError> {
    let rows = schema.project(payload)?;

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(schema.headers().map(Cell::new));
    table.set_constraints(
        schema
            .columns
            .iter()
            .map(|c| ColumnConstraint::Absolute(Width::Fixed(c.width))),
    );
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Center);
    }

    for row in rows {
        table.add_row(row);
    }

    Ok(table.to_string())
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, output_type: OutputType) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match output_type {
        OutputType::Json => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputType::Text => {
            let _ = writeln!(out, "ERROR: {}", err.error.message);
            if let Some(candidates) = &err.error.candidates {
                let _ = writeln!(out, "  Available sections:");
                for c in candidates {
                    let _ = writeln!(out, "    {c}");
                }
            }
        }
    }
}

// --- Debug timer ---

/// A RAII timer that emits elapsed milliseconds as a debug event on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            debug!(label = self.label, elapsed_ms = ms, "timing");
        }
    }
}
