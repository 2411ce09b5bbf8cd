//! Human-readable sidecar file written next to a generated PDF.
//!
//! The sidecar carries the raw field values, not the normalized record; only
//! the timestamp comes from the record. This mirrors the document's own
//! metadata dictionary rather than the QR payload.

use crate::error::Result;
use crate::metadata::FormFields;
use std::path::{Path, PathBuf};

/// Derives the sidecar path for a given PDF path: the extension is replaced
/// by the `_metadata.txt` suffix (`informe.pdf` -> `informe_metadata.txt`).
pub fn sidecar_path(pdf_path: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    pdf_path.with_file_name(format!("{stem}_metadata.txt"))
}

/// Renders the six-line label/value dump with its header line.
pub fn render(fields: &FormFields, created_at: &str) -> String {
    let mut out = String::new();
    out.push_str("METADATOS DEL PDF:\n\n");
    out.push_str(&format!("Título: {}\n", fields.title));
    out.push_str(&format!("Autor: {}\n", fields.author));
    out.push_str(&format!("Asunto: {}\n", fields.subject));
    out.push_str(&format!("Palabras clave: {}\n", fields.keywords));
    out.push_str(&format!("Creador: {}\n", fields.creator));
    out.push_str(&format!("Fecha de creación: {created_at}\n"));
    out
}

/// Writes the sidecar next to `pdf_path` and returns its path.
pub fn write(pdf_path: &Path, fields: &FormFields, created_at: &str) -> Result<PathBuf> {
    let path = sidecar_path(pdf_path);
    std::fs::write(&path, render(fields, created_at))?;
    Ok(path)
}
