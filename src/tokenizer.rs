//! Splits input text into word / non-word segments using a mapping's
//! input inventory, falling back to Unicode Letter/Number/Mark categories.

use crate::mapping::Mapping;
use regex::Regex;
use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// One segment of tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_word: bool,
}

/// Splits text into word/non-word segments.
///
/// The default tokenizer (no inventory) treats Unicode Letter, Number,
/// and Mark characters as word characters; an inventory-backed
/// tokenizer additionally recognizes every entry of a mapping's input
/// inventory (and its input delimiter, if any) as a single word token
/// even when it spans multiple characters, by trying longer inventory
/// entries first.
pub struct Tokenizer {
    regex: Regex,
    inventory: Vec<String>,
    delimiter: Option<String>,
    case_sensitive: bool,
    /// A single character (e.g. `.`) that counts as a word character only
    /// when immediately followed by another word-tagged segment.
    word_if_followed_by_word: Option<char>,
}

impl Tokenizer {
    /// The default Unicode-category tokenizer, used when no mapping
    /// applies.
    pub fn default_tokenizer() -> Tokenizer {
        Tokenizer {
            regex: Regex::new(r"(?s).").unwrap(),
            inventory: Vec::new(),
            delimiter: None,
            case_sensitive: true,
            word_if_followed_by_word: None,
        }
    }

    /// Builds a tokenizer from one or more input inventories; callers
    /// union the inventories of the first one or two hops before calling
    /// this.
    pub fn from_inventory(
        inventory: impl IntoIterator<Item = String>,
        delimiter: Option<String>,
        case_sensitive: bool,
    ) -> Tokenizer {
        let mut inventory: Vec<String> = inventory.into_iter().filter(|s| !s.is_empty()).collect();
        if !case_sensitive {
            inventory = inventory.iter().map(|s| s.to_lowercase()).collect();
        }
        // Sort by descending length so the longest inventory entry wins
        // at each position.
        inventory.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));

        let mut pieces: Vec<String> = inventory.iter().map(|s| regex::escape(s)).collect();
        if let Some(d) = &delimiter {
            if !d.is_empty() {
                pieces.push(regex::escape(d));
            }
        }
        pieces.push(".".to_string());
        let pattern = format!("(?s){}", pieces.join("|"));
        let regex = if case_sensitive {
            Regex::new(&pattern).expect("tokenizer pattern is built from escaped literals")
        } else {
            regex::RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .expect("tokenizer pattern is built from escaped literals")
        };

        Tokenizer {
            regex,
            inventory,
            delimiter,
            case_sensitive,
            word_if_followed_by_word: None,
        }
    }

    /// Builds a one-hop tokenizer from a single mapping's input
    /// inventory.
    pub fn from_mapping(mapping: &Mapping) -> Tokenizer {
        Tokenizer::from_inventory(
            mapping.input_inventory(),
            None,
            mapping.case_sensitive(),
        )
    }

    /// Builds a tokenizer unioning the input inventories of several
    /// mappings along a path.
    pub fn from_mappings(mappings: &[&Mapping]) -> Tokenizer {
        let case_sensitive = mappings.first().map_or(true, |m| m.case_sensitive());
        let inventory = mappings.iter().flat_map(|m| m.input_inventory());
        Tokenizer::from_inventory(inventory, None, case_sensitive)
    }

    /// Applies a language-specific override: a character that is treated
    /// as a word character only when immediately followed by a word
    /// segment. The canonical use is Tlingit treating `.` as a letter
    /// when not word-final.
    pub fn with_word_if_followed_by_word(mut self, c: char) -> Tokenizer {
        self.word_if_followed_by_word = Some(c);
        self
    }

    fn is_word_character(&self, c: &str) -> bool {
        let lowered;
        let c_cmp = if self.case_sensitive {
            c
        } else {
            lowered = c.to_lowercase();
            &lowered
        };
        if self.inventory.iter().any(|entry| entry == c_cmp) {
            return true;
        }
        if let Some(d) = &self.delimiter {
            if d == c {
                return true;
            }
        }
        let Some(ch) = c.chars().next() else {
            return false;
        };
        // Letter, Number, or Mark (diacritic).
        let group = ch.general_category_group();
        group == GeneralCategoryGroup::Letter
            || group == GeneralCategoryGroup::Number
            || matches!(
                ch.general_category(),
                GeneralCategory::NonspacingMark
                    | GeneralCategory::SpacingMark
                    | GeneralCategory::EnclosingMark
            )
    }

    /// Splits `text` into tagged segments, greedily matching the
    /// inventory-alternation regex and merging adjacent same-tag
    /// segments.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut units: Vec<Token> = self
            .regex
            .find_iter(text)
            .map(|m| {
                let t = m.as_str().to_string();
                let is_word = self.is_word_character(&t);
                Token { text: t, is_word }
            })
            .collect();

        if let Some(special) = self.word_if_followed_by_word {
            for i in 0..units.len() {
                if units[i].text.chars().eq(std::iter::once(special)) {
                    if let Some(next) = units.get(i + 1) {
                        if next.is_word {
                            units[i].is_word = true;
                        }
                    }
                }
            }
        }

        merge_adjacent(units)
    }
}

fn merge_adjacent(units: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::new();
    for unit in units {
        match merged.last_mut() {
            Some(last) if last.is_word == unit.is_word => last.text.push_str(&unit.text),
            _ => merged.push(unit),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingConfig;
    use crate::rule::RuleRecord;

    #[test]
    fn default_tokenizer_splits_on_unicode_categories() {
        let tok = Tokenizer::default_tokenizer();
        let units = tok.tokenize("hi, bob!");
        assert_eq!(
            units,
            vec![
                Token { text: "hi".into(), is_word: true },
                Token { text: ", ".into(), is_word: false },
                Token { text: "bob".into(), is_word: true },
                Token { text: "!".into(), is_word: false },
            ]
        );
    }

    #[test]
    fn french_sentence_tokenization_into_alternating_segments() {
        let mapping = Mapping::compile(
            vec![RuleRecord::new("c", "k")],
            MappingConfig::new("fra", "fra-ipa"),
        )
        .unwrap();
        let tok = Tokenizer::from_mapping(&mapping);
        let units = tok.tokenize("ceci était 'un' test.");
        assert_eq!(units.len(), 8);
        assert_eq!(units[0], Token { text: "ceci".into(), is_word: true });
        assert!(units[0].is_word);
    }

    #[test]
    fn multi_character_inventory_entry_wins_over_single_chars() {
        let mapping = Mapping::compile(
            vec![RuleRecord::new("ch", "x")],
            MappingConfig::new("fra", "fra-ipa"),
        )
        .unwrap();
        let tok = Tokenizer::from_mapping(&mapping);
        let units = tok.tokenize("chat");
        // "ch" must be matched as one token by the alternation, not "c"+"h".
        assert_eq!(units, vec![Token { text: "chat".into(), is_word: true }]);
    }

    #[test]
    fn word_if_followed_by_word_override() {
        let tok = Tokenizer::default_tokenizer().with_word_if_followed_by_word('.');
        let units = tok.tokenize("a.b");
        assert_eq!(units, vec![Token { text: "a.b".into(), is_word: true }]);
    }

    #[test]
    fn word_final_dot_is_not_overridden() {
        let tok = Tokenizer::default_tokenizer().with_word_if_followed_by_word('.');
        let units = tok.tokenize("a.");
        assert_eq!(
            units,
            vec![
                Token { text: "a".into(), is_word: true },
                Token { text: ".".into(), is_word: false },
            ]
        );
    }
}
