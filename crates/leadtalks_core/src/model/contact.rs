//! Contact model and phone input mask.
//!
//! # Invariants
//! - `entry_date` is stamped with the creation day and kept on edits.
//! - `format_phone` is a pure display mask; it never validates length.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub type ContactId = String;

const SHORT_MASK_MAX_DIGITS: usize = 10;
const SHORT_MASK_MAX_CHARS: usize = 14;
const LONG_MASK_MAX_CHARS: usize = 15;

static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("valid non-digit regex"));
static AREA_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})([0-9])").expect("valid area code regex"));
static SHORT_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})([0-9])").expect("valid short split regex"));
static LONG_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{5})([0-9])").expect("valid long split regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "segmento")]
    pub segment: String,
    #[serde(rename = "dataEntrada")]
    pub entry_date: NaiveDate,
    #[serde(rename = "criadoEm", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        rename = "atualizadoEm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

/// Input of the contact modal. All three text fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub id: Option<ContactId>,
    pub name: String,
    pub phone: String,
    pub segment: String,
}

/// Applies the Brazilian phone mask while the user types.
///
/// - Up to 10 digits: `(67) 9999-9999`.
/// - 11 or more digits: `(67) 99999-9999`, extra digits dropped.
/// - Only ASCII digits count; other numerals are stripped like any symbol.
pub fn format_phone(input: &str) -> String {
    let digits = NON_DIGIT_RE.replace_all(input, "");
    let with_area = AREA_CODE_RE.replace(&digits, "($1) $2");
    let (masked, max_chars) = if digits.len() <= SHORT_MASK_MAX_DIGITS {
        (
            SHORT_SPLIT_RE.replace(&with_area, "$1-$2").into_owned(),
            SHORT_MASK_MAX_CHARS,
        )
    } else {
        (
            LONG_SPLIT_RE.replace(&with_area, "$1-$2").into_owned(),
            LONG_MASK_MAX_CHARS,
        )
    };
    masked.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::format_phone;

    #[test]
    fn masks_landline_and_mobile_numbers() {
        assert_eq!(format_phone("6799999999"), "(67) 9999-9999");
        assert_eq!(format_phone("67 99142-6269"), "(67) 99142-6269");
    }

    #[test]
    fn partial_input_is_masked_progressively() {
        assert_eq!(format_phone("6"), "6");
        assert_eq!(format_phone("67"), "67");
        assert_eq!(format_phone("679"), "(67) 9");
        assert_eq!(format_phone("6799999"), "(67) 9999-9");
    }

    #[test]
    fn extra_digits_are_dropped() {
        assert_eq!(format_phone("679914262691234"), "(67) 99142-6269");
    }

    #[test]
    fn non_ascii_numerals_are_stripped() {
        assert_eq!(format_phone("٦٧٩٩٩٩"), "");
        assert_eq!(format_phone("67٩9999"), "(67) 9999");
        assert_eq!(format_phone("67٠9999-9999"), "(67) 9999-9999");
    }
}
