//! Packaging rendered chunks into a deliverable.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use colsplit_model::{Chunk, Deliverable, OutputFormat};

use crate::error::{OutputError, Result};
use crate::naming::ExportNaming;
use crate::render::{CsvStyle, render};

/// Render `chunks` and bundle them.
///
/// One chunk becomes a plain document named `<base>.<ext>`. Several chunks
/// are rendered independently into a deflated zip archive with one
/// `<base>_part<N>.<ext>` entry per chunk, in part order.
pub fn package(
    chunks: &[Chunk<'_>],
    format: OutputFormat,
    naming: &ExportNaming,
    style: &CsvStyle,
) -> Result<Deliverable> {
    if let [single] = chunks {
        let text = render(single, format, style)?;
        return Ok(Deliverable::Document {
            file_name: naming.document_name(format),
            mime_type: format.mime_type(),
            bytes: text.into_bytes(),
        });
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let name = naming.part_name(chunk.part, format);
        let text = render(chunk, format, style)?;
        zip.start_file(name.as_str(), options)?;
        zip.write_all(text.as_bytes())
            .map_err(|err| OutputError::io(&name, err))?;
        entries.push(name);
    }
    let bytes = zip.finish()?.into_inner();

    tracing::info!(
        entries = entries.len(),
        bytes = bytes.len(),
        archive = %naming.archive_name(),
        "packaged archive"
    );
    Ok(Deliverable::Archive {
        file_name: naming.archive_name(),
        entries,
        bytes,
    })
}
