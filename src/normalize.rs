//! Unicode normalization and `\uXXXX`/`\UXXXXXXXX` escape decoding. Escape
//! decoding always runs first; normalization (when requested) runs on the
//! decoded string.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Normalization standard to apply to rule fields and conversion input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NormalizationForm {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "NFC")]
    Nfc,
    #[serde(rename = "NFD")]
    Nfd,
    #[serde(rename = "NFKC")]
    Nfkc,
    #[serde(rename = "NFKD")]
    Nfkd,
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NormalizationForm::None => "none",
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
            NormalizationForm::Nfkc => "NFKC",
            NormalizationForm::Nfkd => "NFKD",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for NormalizationForm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" | "" => Ok(NormalizationForm::None),
            "NFC" => Ok(NormalizationForm::Nfc),
            "NFD" => Ok(NormalizationForm::Nfd),
            "NFKC" => Ok(NormalizationForm::Nfkc),
            "NFKD" => Ok(NormalizationForm::Nfkd),
            other => Err(Error::InvalidNormalization {
                form: other.to_string(),
            }),
        }
    }
}

static ESCAPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u([0-9A-Fa-f]{4})|\\U([0-9A-Fa-f]{6,8})").unwrap());

/// Replaces `\uXXXX` (exactly 4 hex digits) and `\UXXXXXX`/`\UXXXXXXXX`
/// (6-8 hex digits) escapes with the code point they denote.
pub fn decode_escapes(s: &str) -> String {
    ESCAPE_PATTERN
        .replace_all(s, |caps: &regex::Captures| {
            let hex = caps.get(1).or_else(|| caps.get(2)).unwrap().as_str();
            match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                Some(c) => c.to_string(),
                // Not a valid scalar value (e.g. an unpaired surrogate): leave the
                // escape untouched rather than silently drop input.
                None => caps.get(0).unwrap().as_str().to_string(),
            }
        })
        .into_owned()
}

/// Decodes escapes, then applies the requested normalization form. When
/// `form` is [`NormalizationForm::None`] only escape decoding happens.
pub fn normalize(s: &str, form: NormalizationForm) -> String {
    let decoded = decode_escapes(s);
    match form {
        NormalizationForm::None => decoded,
        NormalizationForm::Nfc => decoded.nfc().collect(),
        NormalizationForm::Nfd => decoded.nfd().collect(),
        NormalizationForm::Nfkc => decoded.nfkc().collect(),
        NormalizationForm::Nfkd => decoded.nfkd().collect(),
    }
}
