//! # sello
//!
//! Metadata stamping and inspection for generated PDF documents.
//!
//! The pipeline takes raw form fields, normalizes them into a canonical
//! [`MetadataRecord`], serializes the record as fixed-order JSON, encodes the
//! JSON into a QR symbol, and assembles a single-page PDF carrying the QR,
//! the visible title and body, and the raw field values in the document's own
//! metadata dictionary. A sidecar text file with the raw values is rendered
//! alongside. The inverse direction reads the embedded metadata of an
//! existing PDF for display.
//!
//! ```rust,no_run
//! use sello::{create_document, CreateOptions, FormFields, SystemClock};
//!
//! # fn main() -> sello::Result<()> {
//! let fields = FormFields {
//!     title: "Informe".to_string(),
//!     author: "Ana".to_string(),
//!     keywords: "a, b".to_string(),
//!     body: "Hola".to_string(),
//!     ..FormFields::default()
//! };
//!
//! let output = create_document(&fields, &CreateOptions::default(), &SystemClock)?;
//! sello::write_outputs(&output, "informe.pdf".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod assembly;
pub mod codec;
pub mod error;
pub mod inspect;
pub mod metadata;
pub mod sidecar;

pub use assembly::CreateOptions;
pub use codec::EncodedMetadata;
pub use error::{Result, SelloError};
pub use inspect::read_embedded_metadata;
pub use metadata::{Clock, FixedClock, FormFields, MetadataRecord, SystemClock};

use std::path::{Path, PathBuf};

/// In-memory artifacts of one create action.
#[derive(Debug, Clone)]
pub struct CreateOutput {
    /// Complete PDF byte stream.
    pub pdf: Vec<u8>,
    /// Sidecar text, ready to be written next to the PDF.
    pub sidecar: String,
    /// Canonical JSON carried by the embedded QR, when QR embedding is on.
    pub qr_payload: Option<String>,
}

/// Runs the full create pipeline: normalize, encode, assemble, render.
///
/// Each call builds a fresh record from the current field values; nothing is
/// shared across actions.
pub fn create_document(
    fields: &FormFields,
    options: &CreateOptions,
    clock: &dyn Clock,
) -> Result<CreateOutput> {
    let record = MetadataRecord::from_form(fields, clock);
    tracing::debug!(title = %record.title, embed_qr = options.embed_qr, "creating document");

    let encoded = if options.embed_qr {
        Some(codec::encode(&record)?)
    } else {
        None
    };

    let pdf = assembly::assemble(
        fields,
        encoded.as_ref().map(|e| e.qr_png.as_slice()),
        clock.now(),
    )?;
    let sidecar = sidecar::render(fields, &record.created_at);

    Ok(CreateOutput {
        pdf,
        sidecar,
        qr_payload: encoded.map(|e| e.json),
    })
}

/// Writes the PDF to `pdf_path` and the sidecar next to it.
///
/// Returns the sidecar path. A failure may leave a partially written output
/// file behind; that is accepted and not masked.
pub fn write_outputs(output: &CreateOutput, pdf_path: &Path) -> Result<PathBuf> {
    std::fs::write(pdf_path, &output.pdf)?;
    let sidecar = sidecar::sidecar_path(pdf_path);
    std::fs::write(&sidecar, &output.sidecar)?;
    Ok(sidecar)
}
