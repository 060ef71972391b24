//! Bridges character-index positions (the unit every alignment edge in this
//! crate is expressed in) to the byte offsets `regex::Regex` operates on.
//!
//! `regex` has no notion of "the 5th Unicode scalar value"; it only knows
//! byte offsets into a `&str`. Every place the engine needs to slice a
//! string at a character boundary (rule matching, context lookup) goes
//! through this type instead of re-deriving byte offsets ad hoc.
pub struct CharMap<'s> {
    text: &'s str,
    byte_offsets: Vec<usize>,
}

impl<'s> CharMap<'s> {
    pub fn new(text: &'s str) -> Self {
        let mut byte_offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        byte_offsets.push(text.len());
        Self { text, byte_offsets }
    }

    /// Number of Unicode scalar values in the mapped text.
    pub fn len_chars(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    /// Byte offset of the `i`th character (or the byte length of the text
    /// when `i == len_chars()`).
    pub fn byte(&self, i: usize) -> usize {
        self.byte_offsets[i]
    }

    /// The substring consisting of characters `[i, len_chars())`.
    pub fn suffix(&self, i: usize) -> &'s str {
        &self.text[self.byte(i)..]
    }

    /// The substring consisting of characters `[0, i)`.
    pub fn prefix(&self, i: usize) -> &'s str {
        &self.text[..self.byte(i)]
    }

    /// The substring consisting of characters `[i, j)`.
    pub fn slice(&self, i: usize, j: usize) -> &'s str {
        &self.text[self.byte(i)..self.byte(j)]
    }

    /// Converts a byte length (as returned by a `regex` match anchored at
    /// character index `i`) into a character count.
    pub fn byte_len_to_char_len(&self, i: usize, byte_len: usize) -> usize {
        self.slice_from_byte_len(i, byte_len).chars().count()
    }

    fn slice_from_byte_len(&self, i: usize, byte_len: usize) -> &'s str {
        let start = self.byte(i);
        &self.text[start..start + byte_len]
    }
}
