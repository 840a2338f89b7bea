//! Immutable prefix trie of every accepted syllable spelling.
//!
//! Each base syllable is inserted bare, with the four tone digits appended and
//! in the four marked forms. Bases containing `ü` are inserted a second time
//! spelled with `v`. Keys are folded to lower case on insertion and lookup.

pub mod data;

use crate::{
    tone::numbered_to_marked,
    unicode::{fold, is_marked_vowel, is_syllable_char, is_tone_digit},
};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, error};

/// Safety bound on a single candidate syllable, in characters.
pub const MAX_SYLLABLE_LEN: usize = 255;

const ROOT: usize = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("syllable table is empty")]
    EmptyTable,

    #[error("invalid syllable `{syllable}`: {reason}")]
    InvalidSyllable { syllable: String, reason: &'static str },
}

#[derive(Debug, Default, Clone)]
struct Node {
    /// Sorted by char.
    children: SmallVec<[(char, usize); 4]>,
    terminal: bool,
}

impl Node {
    #[inline(always)]
    fn child(&self, c: char) -> Option<usize> {
        self.children
            .binary_search_by_key(&c, |&(k, _)| k)
            .ok()
            .map(|i| self.children[i].1)
    }
}

/// The set of syllables the segmenter may emit as words.
#[derive(Debug, Clone)]
pub struct SyllableInventory {
    nodes: Vec<Node>,
    len: usize,
    max_len: usize,
}

impl SyllableInventory {
    /// Inventory over the standard table in [`data::BASE_SYLLABLES`].
    pub fn standard() -> Self {
        Self::expand(data::BASE_SYLLABLES.iter().copied())
    }

    /// Build an inventory from lower-case base syllables (no tone digits, no marks).
    ///
    /// Fails on an empty table or on an entry that is blank, contains a character
    /// outside the Pinyin alphabet, or is longer than [`MAX_SYLLABLE_LEN`].
    pub fn build<I, S>(syllables: I) -> Result<Self, InventoryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bases = Vec::new();
        for s in syllables {
            let s = s.as_ref();
            validate(s).inspect_err(|e| error!(error = %e, "rejecting syllable table"))?;
            bases.push(s.chars().map(fold).collect::<String>());
        }
        if bases.is_empty() {
            let e = InventoryError::EmptyTable;
            error!(error = %e, "rejecting syllable table");
            return Err(e);
        }
        Ok(Self::expand(bases.iter().map(String::as_str)))
    }

    fn expand<'s>(bases: impl Iterator<Item = &'s str>) -> Self {
        let mut inv = Self {
            nodes: vec![Node::default()],
            len: 0,
            max_len: 0,
        };
        let mut count = 0usize;
        for base in bases {
            count += 1;
            inv.insert_with_tones(base);
            if base.contains('ü') {
                inv.insert_with_tones(&base.replace('ü', "v"));
            }
        }
        debug!(
            bases = count,
            entries = inv.len,
            nodes = inv.nodes.len(),
            "syllable inventory built"
        );
        inv
    }

    fn insert_with_tones(&mut self, base: &str) {
        self.insert(base);
        let mut numbered = String::with_capacity(base.len() + 1);
        for digit in ['1', '2', '3', '4'] {
            numbered.clear();
            numbered.push_str(base);
            numbered.push(digit);
            let marked = numbered_to_marked(&numbered).into_owned();
            self.insert(&numbered);
            self.insert(&marked);
        }
    }

    fn insert(&mut self, key: &str) {
        let mut node = ROOT;
        let mut chars = 0;
        for c in key.chars().map(fold) {
            chars += 1;
            let children = &self.nodes[node].children;
            node = match children.binary_search_by_key(&c, |&(k, _)| k) {
                Ok(i) => children[i].1,
                Err(i) => {
                    let id = self.nodes.len();
                    self.nodes[node].children.insert(i, (c, id));
                    self.nodes.push(Node::default());
                    id
                }
            };
        }
        let terminal = &mut self.nodes[node].terminal;
        if !*terminal {
            *terminal = true;
            self.len += 1;
            self.max_len = self.max_len.max(chars);
        }
    }

    /// The built-in base table.
    #[inline]
    pub fn base_syllables() -> &'static [&'static str] {
        data::BASE_SYLLABLES
    }

    /// Number of distinct accepted spellings.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length in characters of the longest accepted spelling.
    #[inline]
    pub fn max_syllable_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn cursor(&self) -> TrieCursor<'_> {
        TrieCursor {
            inventory: self,
            node: ROOT,
        }
    }

    fn walk(&self, s: &str) -> Option<TrieCursor<'_>> {
        let mut cursor = self.cursor();
        s.chars().all(|c| cursor.advance(c)).then_some(cursor)
    }

    /// `s` is exactly one accepted spelling, compared case-insensitively.
    pub fn is_complete_syllable(&self, s: &str) -> bool {
        self.walk(s).is_some_and(|c| c.is_complete())
    }

    /// Some strictly longer accepted spelling starts with `prefix`.
    pub fn has_continuation(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some_and(|c| c.has_continuation())
    }
}

fn validate(s: &str) -> Result<(), InventoryError> {
    let reason = if s.trim().is_empty() {
        "blank entry"
    } else if s.chars().count() >= MAX_SYLLABLE_LEN {
        "longer than the syllable length bound"
    } else if s.chars().any(|c| !is_syllable_char(c) || is_tone_digit(c)) {
        "character outside the Pinyin alphabet"
    } else if s.chars().any(is_marked_vowel) {
        "tone-marked vowel in a base syllable"
    } else {
        return Ok(());
    };
    Err(InventoryError::InvalidSyllable {
        syllable: s.to_owned(),
        reason,
    })
}

/// Stepwise walk down the trie, one character at a time.
#[derive(Debug, Clone, Copy)]
pub struct TrieCursor<'i> {
    inventory: &'i SyllableInventory,
    node: usize,
}

impl TrieCursor<'_> {
    /// Follow the edge for `c` (case-insensitive). On `false` the cursor is left
    /// where it was.
    #[inline]
    pub fn advance(&mut self, c: char) -> bool {
        match self.inventory.nodes[self.node].child(fold(c)) {
            Some(next) => {
                self.node = next;
                true
            }
            None => false,
        }
    }

    /// The path walked so far is an accepted spelling.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.inventory.nodes[self.node].terminal
    }

    #[inline]
    pub fn has_continuation(&self) -> bool {
        !self.inventory.nodes[self.node].children.is_empty()
    }
}
