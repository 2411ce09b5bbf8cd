//! Embedded-metadata inspection for existing PDF files.
//!
//! A thin pass-through over the document Info dictionary: entries are decoded
//! to text and presented in dictionary order, keys without their `/` prefix.
//! No normalization or validation happens on read.

use crate::error::Result;
use lopdf::{Document, Object};

/// Reads the embedded metadata dictionary from a PDF byte stream.
///
/// Returns `Ok(None)` when the document has no Info dictionary (or an empty
/// one); that is a normal outcome, not an error. Parse failures on the
/// document itself are errors.
pub fn read_embedded_metadata(document_bytes: &[u8]) -> Result<Option<Vec<(String, String)>>> {
    let doc = Document::load_mem(document_bytes)?;

    let info = match doc.trailer.get(b"Info") {
        Ok(object) => object,
        Err(_) => return Ok(None),
    };
    let info = match info {
        Object::Reference(id) => match doc.get_object(*id).ok().and_then(|o| o.as_dict().ok()) {
            Some(dict) => dict,
            None => return Ok(None),
        },
        Object::Dictionary(dict) => dict,
        _ => return Ok(None),
    };

    let mut entries = Vec::new();
    for (key, value) in info.iter() {
        let key = String::from_utf8_lossy(key)
            .trim_start_matches('/')
            .to_string();
        let value = match value {
            Object::Name(name) => String::from_utf8_lossy(name).into_owned(),
            other => match lopdf::decode_text_string(other) {
                Ok(text) => text,
                // Non-text entries carry no displayable metadata.
                Err(_) => continue,
            },
        };
        entries.push((key, value));
    }
    tracing::debug!(entries = entries.len(), "read embedded metadata");

    if entries.is_empty() {
        Ok(None)
    } else {
        Ok(Some(entries))
    }
}
