//! Form field capture and metadata normalization.
//!
//! [`FormFields`] is the raw data-transfer structure handed over by whatever
//! front end collects user input; [`MetadataRecord`] is the normalized,
//! immutable record derived from it. Normalization keeps accented characters
//! and "ñ" intact, collapses newlines, and derives the keyword list from the
//! raw comma-separated string.

use chrono::{DateTime, Local};

/// Format used for the record timestamp, the sidecar, and the QR payload.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creator reported when the form leaves the field empty.
pub const DEFAULT_CREATOR: &str = concat!("sello v", env!("CARGO_PKG_VERSION"));

/// Source of "now" for timestamp capture.
///
/// Injected so tests can pin the clock and assert exact sidecar and QR
/// payload content.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at a given instant. Intended for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Raw field values as supplied by the form boundary.
///
/// Values are passed through untouched: normalization happens only when a
/// [`MetadataRecord`] is built. The raw values themselves are what ends up in
/// the document's own metadata dictionary and in the sidecar file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub author: String,
    pub subject: String,
    /// Comma-separated keyword list, exactly as typed.
    pub keywords: String,
    pub creator: String,
    /// Free-text document body, possibly multi-line.
    pub body: String,
    /// Optional pre-formatted timestamp overriding clock capture.
    pub timestamp: Option<String>,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            subject: String::new(),
            keywords: String::new(),
            creator: DEFAULT_CREATOR.to_string(),
            body: String::new(),
            timestamp: None,
        }
    }
}

/// The canonical descriptive record for a generated document.
///
/// Constructed once per create action and immutable thereafter; it is only
/// ever persisted as the QR payload JSON and the sidecar timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: Vec<String>,
    pub creator: String,
    pub created_at: String,
}

impl MetadataRecord {
    /// Normalizes raw form fields into a record.
    ///
    /// Never fails: empty strings are valid everywhere. The only side effect
    /// is the implicit timestamp capture through `clock` when no override is
    /// supplied.
    pub fn from_form(fields: &FormFields, clock: &dyn Clock) -> Self {
        let creator = normalize_text(&fields.creator);
        let creator = if creator.is_empty() {
            DEFAULT_CREATOR.to_string()
        } else {
            creator
        };

        let created_at = match fields.timestamp.as_deref().map(normalize_text) {
            Some(ts) if !ts.is_empty() => ts,
            _ => clock.now().format(TIMESTAMP_FORMAT).to_string(),
        };

        Self {
            title: normalize_text(&fields.title),
            author: normalize_text(&fields.author),
            subject: normalize_text(&fields.subject),
            keywords: split_keywords(&fields.keywords),
            creator,
            created_at,
        }
    }
}

/// Replaces newlines with spaces and trims the ends.
///
/// Non-ASCII letters pass through unchanged: no transliteration, no case
/// folding.
pub fn normalize_text(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}

/// Splits a raw comma-separated keyword string into the keyword list.
///
/// Each piece is trimmed; pieces that end up empty are dropped. Order is
/// preserved and duplicates are kept.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|keyword| normalize_text(keyword))
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn fixed_clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
    }

    #[test]
    fn test_normalize_text_collapses_newlines_and_trims() {
        assert_eq!(normalize_text("  hola\nmundo \n"), "hola mundo");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n "), "");
    }

    #[test]
    fn test_normalize_text_preserves_accents() {
        assert_eq!(normalize_text("José Ñáñez"), "José Ñáñez");
        assert_eq!(normalize_text("  canción\nespañola  "), "canción española");
    }

    #[test]
    fn test_split_keywords_trims_and_drops_empties() {
        assert_eq!(split_keywords(" uno, ,dos ,, tres"), vec!["uno", "dos", "tres"]);
    }

    #[test]
    fn test_split_keywords_preserves_order_and_duplicates() {
        assert_eq!(split_keywords("b, a, b"), vec!["b", "a", "b"]);
        assert!(split_keywords("").is_empty());
        assert!(split_keywords(" , ,, ").is_empty());
    }

    #[test]
    fn test_split_keywords_idempotent() {
        let first = split_keywords(" uno, ,dos ,, tres");
        let second = split_keywords(&first.join(", "));
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_form_normalizes_all_fields() {
        let fields = FormFields {
            title: "  Informe\nAnual ".to_string(),
            author: "Ana".to_string(),
            subject: String::new(),
            keywords: "a, b".to_string(),
            body: "Hola".to_string(),
            ..FormFields::default()
        };
        let record = MetadataRecord::from_form(&fields, &fixed_clock());

        assert_eq!(record.title, "Informe Anual");
        assert_eq!(record.author, "Ana");
        assert_eq!(record.subject, "");
        assert_eq!(record.keywords, vec!["a", "b"]);
        assert_eq!(record.creator, DEFAULT_CREATOR);
        assert_eq!(record.created_at, "2024-03-15 10:30:00");
    }

    #[test]
    fn test_from_form_empty_creator_falls_back_to_default() {
        let fields = FormFields {
            creator: " \n ".to_string(),
            ..FormFields::default()
        };
        let record = MetadataRecord::from_form(&fields, &fixed_clock());
        assert_eq!(record.creator, DEFAULT_CREATOR);
    }

    #[test]
    fn test_from_form_timestamp_override() {
        let fields = FormFields {
            timestamp: Some(" 2020-01-01 00:00:00\n".to_string()),
            ..FormFields::default()
        };
        let record = MetadataRecord::from_form(&fields, &fixed_clock());
        assert_eq!(record.created_at, "2020-01-01 00:00:00");
    }

    #[test]
    fn test_from_form_blank_timestamp_override_uses_clock() {
        let fields = FormFields {
            timestamp: Some("  ".to_string()),
            ..FormFields::default()
        };
        let record = MetadataRecord::from_form(&fields, &fixed_clock());
        assert_eq!(record.created_at, "2024-03-15 10:30:00");
    }

    proptest! {
        /// Re-normalizing the comma-joined output of a previous
        /// normalization yields the same keyword sequence.
        #[test]
        fn prop_split_keywords_idempotent(raw in "[a-zA-Záéíóúñ ,]{0,64}") {
            let first = split_keywords(&raw);
            let second = split_keywords(&first.join(", "));
            prop_assert_eq!(first, second);
        }
    }
}
