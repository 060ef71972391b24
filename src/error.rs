//! Error taxonomy for the transduction engine.
//!
//! Compile-time errors (`MalformedMapping`, `IncorrectFileType`,
//! `InvalidNormalization`) are raised while building a [`crate::mapping::Mapping`]
//! or [`crate::registry::Registry`] and should abort startup. Runtime errors
//! (`MappingMissing`, `NoPath`, `InvalidLanguageCode`) are returned from the
//! conversion path and are meant to be translated by the caller into
//! domain-appropriate codes (HTTP status, CLI exit code).

use thiserror::Error;

/// Coordinates identifying which rule in a [`crate::mapping::Mapping`] a
/// [`Error::MalformedMapping`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleCoordinates {
    pub rule_index: usize,
}

impl std::fmt::Display for RuleCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rule #{}", self.rule_index)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed mapping at {coordinates}: {reason}")]
    MalformedMapping {
        coordinates: RuleCoordinates,
        reason: String,
    },

    #[error("no mapping exists between \"{in_lang}\" and \"{out_lang}\"")]
    MappingMissing { in_lang: String, out_lang: String },

    #[error("no path exists from \"{from}\" to \"{to}\" in the language graph")]
    NoPath { from: String, to: String },

    #[error("\"{lang}\" is not a known inventory in the language graph")]
    InvalidLanguageCode { lang: String },

    #[error(
        "\"{form}\" is not a valid normalization form (expected none, NFC, NFD, NFKC, or NFKD)"
    )]
    InvalidNormalization { form: String },

    #[error("\"{path}\" is not a supported mapping file type")]
    IncorrectFileType { path: String },
}

impl Error {
    pub fn malformed_mapping(rule_index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedMapping {
            coordinates: RuleCoordinates { rule_index },
            reason: reason.into(),
        }
    }

    /// Exit code this error would map to on the `convert` CLI.
    pub fn cli_exit_code(&self) -> i32 {
        match self {
            Error::MappingMissing { .. } | Error::NoPath { .. } => 2,
            Error::InvalidLanguageCode { .. } => 3,
            Error::MalformedMapping { .. }
            | Error::InvalidNormalization { .. }
            | Error::IncorrectFileType { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_cli_contract() {
        assert_eq!(
            Error::MappingMissing {
                in_lang: "fra".into(),
                out_lang: "eng".into()
            }
            .cli_exit_code(),
            2
        );
        assert_eq!(
            Error::NoPath {
                from: "fra".into(),
                to: "jpn".into()
            }
            .cli_exit_code(),
            2
        );
        assert_eq!(
            Error::InvalidLanguageCode { lang: "xyz".into() }.cli_exit_code(),
            3
        );
        assert_eq!(Error::malformed_mapping(0, "missing in").cli_exit_code(), 1);
    }
}
