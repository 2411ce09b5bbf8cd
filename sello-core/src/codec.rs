//! Canonical serialization of a [`MetadataRecord`] and its QR encoding.
//!
//! The JSON text produced here is the single source of truth embedded in the
//! QR symbol: six keys in fixed order, 2-space indentation, and UTF-8
//! characters written literally so accented text survives a scan unchanged.

use crate::error::Result;
use crate::metadata::MetadataRecord;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use serde::Serialize;
use std::io::Cursor;

/// Side length of one QR module in pixels.
const MODULE_SIZE: u32 = 10;

/// Fixed-order QR payload. Field order here is the serialized key order.
#[derive(Serialize)]
struct QrPayload<'a> {
    #[serde(rename = "Titulo")]
    title: &'a str,
    #[serde(rename = "Autor")]
    author: &'a str,
    #[serde(rename = "Asunto")]
    subject: &'a str,
    #[serde(rename = "Palabras_clave")]
    keywords: &'a [String],
    #[serde(rename = "Creador")]
    creator: &'a str,
    #[serde(rename = "Fecha_creacion")]
    created_at: &'a str,
}

impl<'a> From<&'a MetadataRecord> for QrPayload<'a> {
    fn from(record: &'a MetadataRecord) -> Self {
        Self {
            title: &record.title,
            author: &record.author,
            subject: &record.subject,
            keywords: &record.keywords,
            creator: &record.creator,
            created_at: &record.created_at,
        }
    }
}

/// Result of the encode direction: the canonical JSON text and the QR symbol
/// rasterized as an in-memory PNG.
#[derive(Debug, Clone)]
pub struct EncodedMetadata {
    pub json: String,
    pub qr_png: Vec<u8>,
}

/// Serializes a record to the canonical JSON text.
pub fn canonical_json(record: &MetadataRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(&QrPayload::from(record))?)
}

/// Encodes a record as canonical JSON and renders it into a QR symbol.
///
/// The symbol uses error-correction level Q (~25% damage tolerance) and the
/// smallest version that fits the payload; a payload too large for any
/// version is a fatal [`SelloError::Qr`](crate::SelloError::Qr). The raster
/// is black-on-white with a 4-module quiet zone.
pub fn encode(record: &MetadataRecord) -> Result<EncodedMetadata> {
    let json = canonical_json(record)?;

    let code = QrCode::with_error_correction_level(json.as_bytes(), EcLevel::Q)?;
    tracing::debug!(
        version = ?code.version(),
        payload_bytes = json.len(),
        "encoded metadata payload"
    );

    let raster = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .quiet_zone(true)
        .build();

    let mut qr_png = Vec::new();
    DynamicImage::ImageLuma8(raster).write_to(&mut Cursor::new(&mut qr_png), ImageFormat::Png)?;

    Ok(EncodedMetadata { json, qr_png })
}
