//! Single-page PDF assembly on top of `lopdf`.
//!
//! The page carries, top to bottom: the optional QR symbol, the title in
//! Helvetica-Bold, and the free-text body in Helvetica with naive greedy
//! wrapping. The Info dictionary is written from the *raw* field values;
//! the QR payload is the only place the normalized record appears. That
//! asymmetry is deliberate and covered by tests.

use crate::error::Result;
use crate::metadata::FormFields;
use chrono::{DateTime, Local, Offset};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

// US letter, 1in margins, QR at 2in like the original layout.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const QR_SIZE: f32 = 144.0;
const BLOCK_GAP: f32 = 20.0;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LEADING: f32 = 14.0;
const WRAP_COLUMNS: usize = 80;

/// Producer string stamped into the Info dictionary.
const PRODUCER: &str = concat!("sello v", env!("CARGO_PKG_VERSION"));

/// Options for the single unified assembly path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOptions {
    /// Embed the metadata QR symbol at the top of the page.
    pub embed_qr: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self { embed_qr: true }
    }
}

/// Builds the complete document byte stream.
///
/// `qr_png` is the rasterized QR symbol from the codec, or `None` for the
/// QR-less variant. `created_at` feeds the Info CreationDate entry.
pub fn assemble(
    fields: &FormFields,
    qr_png: Option<&[u8]>,
    created_at: DateTime<Local>,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut resources = dictionary! {
        "Font" => dictionary! {
            "F1" => body_font_id,
            "F2" => title_font_id,
        },
    };

    let mut operations = Vec::new();
    let mut cursor = PAGE_HEIGHT - MARGIN;

    if let Some(png) = qr_png {
        let gray = image::load_from_memory(png)?.to_luma8();
        let (width, height) = gray.dimensions();
        let qr_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            gray.into_raw(),
        ));
        resources.set("XObject", dictionary! { "Qr" => qr_id });

        cursor -= QR_SIZE;
        let x = (PAGE_WIDTH - QR_SIZE) / 2.0;
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![
                QR_SIZE.into(),
                0.into(),
                0.into(),
                QR_SIZE.into(),
                x.into(),
                cursor.into(),
            ],
        ));
        operations.push(Operation::new("Do", vec!["Qr".into()]));
        operations.push(Operation::new("Q", vec![]));
        cursor -= BLOCK_GAP;
    }

    if !fields.title.is_empty() {
        cursor -= TITLE_SIZE;
        let x = title_x(&fields.title);
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F2".into(), TITLE_SIZE.into()]));
        operations.push(Operation::new("Td", vec![x.into(), cursor.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&fields.title),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
        cursor -= BLOCK_GAP;
    }

    if !fields.body.is_empty() {
        cursor -= BODY_SIZE;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), BODY_SIZE.into()]));
        operations.push(Operation::new("TL", vec![BODY_LEADING.into()]));
        operations.push(Operation::new("Td", vec![MARGIN.into(), cursor.into()]));
        let mut first = true;
        for line in wrap_body(&fields.body, WRAP_COLUMNS) {
            if !first {
                operations.push(Operation::new("T*", vec![]));
            }
            first = false;
            if !line.is_empty() {
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(&line), StringFormat::Literal)],
                ));
            }
        }
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let resources_id = doc.add_object(resources);

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    // Raw values here, by contract: the normalized record only feeds the QR.
    let info_id = doc.add_object(dictionary! {
        "Title" => info_string(&fields.title),
        "Author" => info_string(&fields.author),
        "Subject" => info_string(&fields.subject),
        "Keywords" => info_string(&fields.keywords),
        "Creator" => info_string(&fields.creator),
        "Producer" => info_string(PRODUCER),
        "CreationDate" => Object::String(
            format_pdf_date(created_at).into_bytes(),
            StringFormat::Literal,
        ),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    tracing::debug!(bytes = bytes.len(), qr = qr_png.is_some(), "assembled document");
    Ok(bytes)
}

/// Rough centering for the title line, assuming the Helvetica average glyph
/// width of about half the font size.
fn title_x(title: &str) -> f32 {
    let estimated = title.chars().count() as f32 * TITLE_SIZE * 0.5;
    ((PAGE_WIDTH - estimated) / 2.0).max(MARGIN)
}

/// Greedy word wrap at `columns` characters; explicit newlines are kept.
fn wrap_body(body: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in body.split('\n') {
        let paragraph = paragraph.trim_end();
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line = word.to_string();
            } else if line.chars().count() + 1 + word.chars().count() <= columns {
                line.push(' ');
                line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Encodes visible text for the WinAnsi-encoded standard fonts. Characters
/// outside the encoding degrade to `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            0x20AC => 0x80,
            0x2018 => 0x91,
            0x2019 => 0x92,
            0x201C => 0x93,
            0x201D => 0x94,
            0x2013 => 0x96,
            0x2014 => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Info dictionary text: plain literal for ASCII, UTF-16BE with BOM
/// otherwise, per the PDF text string rules.
fn info_string(value: &str) -> Object {
    if value.is_ascii() {
        Object::String(value.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in value.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

/// PDF date string (`D:YYYYMMDDHHmmSS+HH'mm'`) in the local offset.
fn format_pdf_date(date: DateTime<Local>) -> String {
    let offset = date.offset().fix().local_minus_utc();
    let (sign, offset) = if offset < 0 { ('-', -offset) } else { ('+', offset) };
    format!(
        "D:{}{}{:02}'{:02}'",
        date.format("%Y%m%d%H%M%S"),
        sign,
        offset / 3600,
        (offset % 3600) / 60
    )
}
