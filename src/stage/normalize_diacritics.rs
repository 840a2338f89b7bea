//! Diacritic canonicalization run before segmentation.
//!
//! Three rewrites in one left-to-right pass:
//! * breve vowels become the caron vowel Unihan uses for the third tone (`ă` → `ǎ`)
//! * a bare vowel followed by U+0300 merges into the precomposed grave vowel;
//!   any other U+0300 is dropped
//! * acute, grave and caron on `m`/`n` are stripped
//!
//! [`normalize_with_offsets`] also records where every output character came
//! from, so tokens over the normalized text can be mapped back to the raw input.

use crate::{
    context::Context,
    stage::{Stage, StageError, map_cow},
    unicode::{COMBINING_GRAVE, breve_to_caron, grave_vowel, strip_nasal_mark},
};
use std::borrow::Cow;
use std::iter::{FusedIterator, Peekable};
use std::str::CharIndices;

/// Zero-sized, stateless.
pub struct NormalizeDiacritics;

#[inline(always)]
fn is_rewritten(c: char) -> bool {
    c == COMBINING_GRAVE || breve_to_caron(c).is_some() || strip_nasal_mark(c).is_some()
}

/// Yields `(source byte offset, normalized char)`.
struct NormalizeIter<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> NormalizeIter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
        }
    }
}

impl Iterator for NormalizeIter<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (i, c) = self.chars.next()?;
            if c == COMBINING_GRAVE {
                continue;
            }
            if let Some(caron) = breve_to_caron(c) {
                return Some((i, caron));
            }
            if let Some(bare) = strip_nasal_mark(c) {
                return Some((i, bare));
            }
            if let Some(grave) = grave_vowel(c)
                && self.chars.next_if(|&(_, n)| n == COMBINING_GRAVE).is_some()
            {
                return Some((i, grave));
            }
            return Some((i, c));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.chars.size_hint();
        (lower / 2, upper)
    }
}

impl FusedIterator for NormalizeIter<'_> {}

/// Canonicalize tone diacritics. Borrowed when `text` is already canonical.
pub fn normalize_diacritics(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_rewritten) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(NormalizeIter::new(text).map(|(_, c)| c).collect())
}

/// Normalized text plus a map from normalized to source byte offsets.
#[derive(Debug, Clone)]
pub struct NormalizedText<'a> {
    text: Cow<'a, str>,
    /// `(normalized offset, source offset)` per output char, then a final
    /// `(text.len(), source.len())`. Empty when the text is unchanged.
    offsets: Vec<(usize, usize)>,
}

/// [`normalize_diacritics`], keeping a source offset for every emitted char.
///
/// A dropped U+0300 is absorbed by the character before it (or by the first
/// character when the text starts with one).
pub fn normalize_with_offsets(text: &str) -> NormalizedText<'_> {
    if !text.chars().any(is_rewritten) {
        return NormalizedText::unchanged(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for (src, c) in NormalizeIter::new(text) {
        let src = if offsets.is_empty() { 0 } else { src };
        offsets.push((out.len(), src));
        out.push(c);
    }
    offsets.push((out.len(), text.len()));
    NormalizedText {
        text: Cow::Owned(out),
        offsets,
    }
}

impl<'a> NormalizedText<'a> {
    /// Identity mapping over text that needs no rewriting.
    pub fn unchanged(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            offsets: Vec::new(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The source text itself, when normalization changed nothing.
    #[inline]
    pub fn borrowed(&self) -> Option<&'a str> {
        match self.text {
            Cow::Borrowed(s) => Some(s),
            Cow::Owned(_) => None,
        }
    }

    /// Source byte offset of the normalized byte offset `offset`.
    ///
    /// `offset` should fall on a char boundary of the normalized text; anything
    /// else maps to the start of the char containing it.
    pub fn source_offset(&self, offset: usize) -> usize {
        if self.offsets.is_empty() {
            return offset;
        }
        let i = self.offsets.partition_point(|&(norm, _)| norm <= offset);
        self.offsets[i.saturating_sub(1)].1
    }
}

impl Stage for NormalizeDiacritics {
    fn name(&self) -> &'static str {
        "normalize_diacritics"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context<'_>) -> Result<bool, StageError> {
        Ok(text.chars().any(is_rewritten))
    }

    fn apply<'a>(
        &self,
        text: Cow<'a, str>,
        _ctx: &Context<'_>,
    ) -> Result<Cow<'a, str>, StageError> {
        Ok(map_cow(text, normalize_diacritics))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use unicode_normalization::UnicodeNormalization;

    #[test]
    fn breve_to_caron_every_vowel() {
        assert_eq!(normalize_diacritics("ăĕĭŏŭĂĔĬŎŬ"), "ǎěǐǒǔǍĚǏǑǓ");
    }

    #[test]
    fn grave_merge_matches_nfc() {
        for base in ['a', 'e', 'i', 'o', 'u', 'ü', 'A', 'U', 'Ü'] {
            let decomposed = format!("{base}\u{0300}");
            let nfc: String = decomposed.nfc().collect();
            assert_eq!(normalize_diacritics(&decomposed), nfc, "{base}");
        }
    }

    #[test]
    fn stray_grave_is_dropped() {
        assert_eq!(normalize_diacritics("\u{0300}ma\u{0300}\u{0300}"), "mà");
        assert_eq!(normalize_diacritics("ǎ\u{0300}"), "ǎ");
    }

    #[test]
    fn unchanged_text_is_borrowed() {
        let input = "Zhōngguó rén";
        assert!(matches!(normalize_diacritics(input), Cow::Borrowed(s) if std::ptr::eq(s, input)));
        let nt = normalize_with_offsets(input);
        assert_eq!(nt.borrowed(), Some(input));
        assert_eq!(nt.source_offset(3), 3);
    }

    #[test]
    fn offsets_track_dropped_marks() {
        // "a" U+0300 "b": the merged à covers both source chars
        let nt = normalize_with_offsets("a\u{0300}b");
        assert_eq!(nt.as_str(), "àb");
        assert_eq!(nt.source_offset(0), 0);
        assert_eq!(nt.source_offset("à".len()), 3);
        assert_eq!(nt.source_offset("àb".len()), 4);
    }

    #[test]
    fn leading_stray_mark_belongs_to_first_char() {
        let nt = normalize_with_offsets("\u{0300}ma");
        assert_eq!(nt.as_str(), "ma");
        assert_eq!(nt.source_offset(0), 0);
        assert_eq!(nt.source_offset(1), 3);
        assert_eq!(nt.source_offset(2), 4);
    }

    #[test]
    fn idempotent() {
        for input in ["nĭ hăo", "a\u{0300}\u{0300}", "ň", "ŭ\u{0300}"] {
            let once = normalize_diacritics(input);
            assert_eq!(normalize_diacritics(&once), once);
        }
    }
}
