//! Greedy longest-match syllable segmentation with n/g backoff.
//!
//! The segmenter walks the inventory trie from the current position and keeps
//! every end offset at which the walk forms a complete syllable. The longest one
//! wins unless it ends in `n`/`g` with a vowel right after it: that consonant is
//! probably the onset of the next syllable (`chang|an` → `chan|gan`), so the
//! next-longest match is tried under the same rule. When every match is
//! rejected the longest is kept.

use crate::{
    inventory::{MAX_SYLLABLE_LEN, SyllableInventory},
    unicode::{fold, is_syllable_char, is_syllable_final, is_syllable_separator, is_vowel},
};
use smallvec::SmallVec;
use std::{borrow::Cow, iter::FusedIterator};
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A complete syllable from the inventory.
    Word,
    /// A single character that starts no syllable: punctuation, whitespace,
    /// separators, stray letters and digits.
    NonWord,
}

/// One segment of the input. `start..end` are UTF-8 byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: Cow<'a, str>,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl Token<'_> {
    #[inline]
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn into_owned(self) -> Token<'static> {
        Token {
            text: Cow::Owned(self.text.into_owned()),
            start: self.start,
            end: self.end,
            kind: self.kind,
        }
    }
}

/// Forward-only token iterator over one input. Create a new one to start over.
#[derive(Debug, Clone)]
pub struct Segmenter<'t, 'i> {
    text: &'t str,
    pos: usize,
    inventory: &'i SyllableInventory,
    max_len: usize,
}

/// Segment `text` against `inventory`.
#[inline]
pub fn segment<'t, 'i>(text: &'t str, inventory: &'i SyllableInventory) -> Segmenter<'t, 'i> {
    Segmenter::new(text, inventory)
}

/// Only the syllables of `text`, as slices of it.
pub fn segment_words<'t>(text: &'t str, inventory: &SyllableInventory) -> Vec<&'t str> {
    segment(text, inventory)
        .filter(Token::is_word)
        .map(|t| &text[t.start..t.end])
        .collect()
}

impl<'t, 'i> Segmenter<'t, 'i> {
    pub fn new(text: &'t str, inventory: &'i SyllableInventory) -> Self {
        Self {
            text,
            pos: 0,
            inventory,
            max_len: MAX_SYLLABLE_LEN,
        }
    }

    /// Lower the per-candidate character bound (never above [`MAX_SYLLABLE_LEN`]).
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len.clamp(1, MAX_SYLLABLE_LEN);
        self
    }

    /// Byte offset of the next unconsumed character.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn match_syllable(&self, start: usize) -> Option<usize> {
        let mut cursor = self.inventory.cursor();
        let mut ends: SmallVec<[usize; 8]> = SmallVec::new();
        let mut walked = 0;

        for (i, c) in self.text[start..].char_indices() {
            if walked == self.max_len {
                if is_syllable_char(c) && cursor.has_continuation() {
                    warn!(
                        offset = start,
                        limit = self.max_len,
                        "syllable candidate hit the length bound, flushing"
                    );
                }
                break;
            }
            if is_syllable_separator(c) || !is_syllable_char(c) || !cursor.advance(c) {
                break;
            }
            walked += 1;
            if cursor.is_complete() {
                ends.push(start + i + c.len_utf8());
            }
        }

        let longest = *ends.last()?;
        let end = ends
            .iter()
            .rev()
            .copied()
            .find(|&end| !self.steals_onset(end))
            .unwrap_or(longest);
        if end != longest {
            trace!(
                candidate = &self.text[start..longest],
                kept = &self.text[start..end],
                "n/g backoff"
            );
        }
        Some(end)
    }

    /// The match ending at `end` closes on `n`/`g` and a vowel follows.
    fn steals_onset(&self, end: usize) -> bool {
        let (head, tail) = self.text.split_at(end);
        head.chars()
            .next_back()
            .is_some_and(|c| is_syllable_final(fold(c)))
            && tail.chars().next().is_some_and(is_vowel)
    }
}

impl<'t> Iterator for Segmenter<'t, '_> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let first = self.text[start..].chars().next()?;
        let starts_word = is_syllable_char(first) && !is_syllable_separator(first);
        let (end, kind) = match starts_word.then(|| self.match_syllable(start)).flatten() {
            Some(end) => (end, TokenKind::Word),
            None => (start + first.len_utf8(), TokenKind::NonWord),
        };
        self.pos = end;
        Some(Token {
            text: Cow::Borrowed(&self.text[start..end]),
            start,
            end,
            kind,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.text.len() - self.pos;
        (rest.min(1), Some(rest))
    }
}

impl FusedIterator for Segmenter<'_, '_> {}

/// Apply `f` to every word of `text`, leaving non-words untouched.
///
/// Borrowed when `f` hands every word back as the same slice.
pub fn rewrite_words<'t, F>(text: &'t str, inventory: &SyllableInventory, f: F) -> Cow<'t, str>
where
    F: Fn(&str) -> Cow<'_, str>,
{
    let mut out: Option<String> = None;
    for token in segment(text, inventory) {
        let piece = &text[token.start..token.end];
        let rewritten = if token.is_word() {
            f(piece)
        } else {
            Cow::Borrowed(piece)
        };
        let same = matches!(&rewritten, Cow::Borrowed(s) if std::ptr::eq(*s, piece));
        if let Some(buf) = out.as_mut() {
            buf.push_str(&rewritten);
        } else if !same {
            let mut buf = String::with_capacity(text.len() + 8);
            buf.push_str(&text[..token.start]);
            buf.push_str(&rewritten);
            out = Some(buf);
        }
    }
    match out {
        Some(buf) => Cow::Owned(buf),
        None => Cow::Borrowed(text),
    }
}

/// `rewrite_words` would change `text`.
pub fn any_word_changes<F>(text: &str, inventory: &SyllableInventory, f: F) -> bool
where
    F: Fn(&str) -> Cow<'_, str>,
{
    segment(text, inventory).filter(Token::is_word).any(|token| {
        let piece = &text[token.start..token.end];
        f(piece) != piece
    })
}
