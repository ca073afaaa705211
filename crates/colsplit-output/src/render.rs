//! Chunk rendering to CSV and JSON text.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use colsplit_model::{Chunk, OutputFormat, RecordRef};

use crate::error::{OutputError, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// CSV dialect options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvStyle {
    /// Prefix the document with a UTF-8 byte order mark so spreadsheet
    /// applications detect the encoding.
    pub byte_order_mark: bool,
    /// Quote every field, including the header.
    pub quote_all: bool,
}

impl Default for CsvStyle {
    fn default() -> Self {
        Self {
            byte_order_mark: true,
            quote_all: true,
        }
    }
}

impl CsvStyle {
    /// Same style without the byte order mark, for clipboard text.
    #[must_use]
    pub fn without_bom(self) -> Self {
        Self {
            byte_order_mark: false,
            ..self
        }
    }
}

/// Render one chunk as a complete document.
///
/// CSV: header line of the chunk's columns, then one line per row, CRLF
/// terminated; absent values are empty fields. JSON: a pretty-printed array
/// of objects keyed by column in column order; absent values are `null`.
pub fn render(chunk: &Chunk<'_>, format: OutputFormat, style: &CsvStyle) -> Result<String> {
    let text = match format {
        OutputFormat::Csv => render_csv(chunk, style)?,
        OutputFormat::Json => render_json(chunk)?,
    };
    tracing::debug!(
        part = chunk.part,
        rows = chunk.len(),
        format = %format,
        bytes = text.len(),
        "rendered chunk"
    );
    Ok(text)
}

fn render_csv(chunk: &Chunk<'_>, style: &CsvStyle) -> Result<String> {
    let quote_style = if style.quote_all {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };
    let mut writer = WriterBuilder::new()
        .quote_style(quote_style)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(chunk.columns)?;
    for row in chunk.rows {
        writer.write_record(row.iter().map(|value| value.as_deref().unwrap_or("")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| OutputError::Csv(err.into_error().into()))?;

    let mut text = String::with_capacity(bytes.len() + BYTE_ORDER_MARK.len_utf8());
    if style.byte_order_mark {
        text.push(BYTE_ORDER_MARK);
    }
    // Every field came from a `String`, so the buffer is valid UTF-8.
    text.push_str(&String::from_utf8_lossy(&bytes));
    Ok(text)
}

fn render_json(chunk: &Chunk<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonRecords(chunk))?)
}

/// Serializes records as objects without going through `serde_json::Map`,
/// which would reorder keys.
struct JsonRecords<'c, 'a>(&'c Chunk<'a>);

impl Serialize for JsonRecords<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for record in self.0.records() {
            seq.serialize_element(&JsonRecord(record))?;
        }
        seq.end()
    }
}

struct JsonRecord<'a>(RecordRef<'a>);

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}
