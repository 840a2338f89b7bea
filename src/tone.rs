//! Tone codec: numbered ↔ marked ↔ lazy conversion of a single syllable.
//!
//! Every conversion is zero-copy when nothing changes: the input slice (or a
//! prefix of it) comes back as `Cow::Borrowed`.

use crate::unicode::{COMBINING_GRAVE, fold, is_tone_bearing_vowel};
use phf::{Map, phf_map};
use std::borrow::Cow;

/// One glyph per tone 1–4, rows ordered as [`VowelRow`].
pub const TONE_MARKS: [[char; 4]; 6] = [
    ['ā', 'á', 'ǎ', 'à'],
    ['ē', 'é', 'ě', 'è'],
    ['ī', 'í', 'ǐ', 'ì'],
    ['ō', 'ó', 'ǒ', 'ò'],
    ['ū', 'ú', 'ǔ', 'ù'],
    ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
];

pub const TONE_MARKS_UPPER: [[char; 4]; 6] = [
    ['Ā', 'Á', 'Ǎ', 'À'],
    ['Ē', 'É', 'Ě', 'È'],
    ['Ī', 'Í', 'Ǐ', 'Ì'],
    ['Ō', 'Ó', 'Ǒ', 'Ò'],
    ['Ū', 'Ú', 'Ǔ', 'Ù'],
    ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ'],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    /// Digit `0` or `5`; never marked.
    Neutral,
}

impl Tone {
    #[inline(always)]
    pub const fn from_digit(c: char) -> Option<Self> {
        Some(match c {
            '1' => Tone::First,
            '2' => Tone::Second,
            '3' => Tone::Third,
            '4' => Tone::Fourth,
            '0' | '5' => Tone::Neutral,
            _ => return None,
        })
    }

    /// Canonical digit; the neutral tone is written `5`.
    #[inline(always)]
    pub const fn digit(self) -> char {
        match self {
            Tone::First => '1',
            Tone::Second => '2',
            Tone::Third => '3',
            Tone::Fourth => '4',
            Tone::Neutral => '5',
        }
    }

    /// Column in [`TONE_MARKS`], `None` for the neutral tone.
    #[inline(always)]
    pub const fn mark_index(self) -> Option<usize> {
        match self {
            Tone::First => Some(0),
            Tone::Second => Some(1),
            Tone::Third => Some(2),
            Tone::Fourth => Some(3),
            Tone::Neutral => None,
        }
    }

    /// Tone carried by a marked vowel glyph.
    #[inline]
    pub fn of_marked(c: char) -> Option<Self> {
        MARKED.get(&c).map(|m| m.tone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VowelRow {
    A,
    E,
    I,
    O,
    U,
    /// `ü`, typed `v` on keyboards without it.
    V,
}

impl VowelRow {
    /// Row of a bare vowel, case-insensitive. `v` and `ü` share a row.
    #[inline]
    pub fn of(c: char) -> Option<Self> {
        Some(match fold(c) {
            'a' => VowelRow::A,
            'e' => VowelRow::E,
            'i' => VowelRow::I,
            'o' => VowelRow::O,
            'u' => VowelRow::U,
            'v' | 'ü' => VowelRow::V,
            _ => return None,
        })
    }

    #[inline(always)]
    const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn marked(self, tone: Tone, upper: bool) -> Option<char> {
        let Some(col) = tone.mark_index() else {
            return None;
        };
        let table = if upper { &TONE_MARKS_UPPER } else { &TONE_MARKS };
        Some(table[self.index()][col])
    }

    /// The unmarked vowel; the ü row keeps its diaeresis.
    #[inline(always)]
    pub const fn bare(self, upper: bool) -> char {
        const LOWER: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'ü'];
        const UPPER: [char; 6] = ['A', 'E', 'I', 'O', 'U', 'Ü'];
        if upper { UPPER[self.index()] } else { LOWER[self.index()] }
    }

    /// ASCII form used by lazy Pinyin; the ü row collapses onto `u`.
    #[inline(always)]
    const fn lazy(self, upper: bool) -> &'static str {
        const LOWER: [&str; 6] = ["a", "e", "i", "o", "u", "u"];
        const UPPER: [&str; 6] = ["A", "E", "I", "O", "U", "U"];
        if upper { UPPER[self.index()] } else { LOWER[self.index()] }
    }
}

#[derive(Debug, Clone, Copy)]
struct MarkedVowel {
    row: VowelRow,
    tone: Tone,
    upper: bool,
}

macro_rules! mv {
    ($row:ident, $tone:ident) => {
        MarkedVowel { row: VowelRow::$row, tone: Tone::$tone, upper: false }
    };
    ($row:ident, $tone:ident, upper) => {
        MarkedVowel { row: VowelRow::$row, tone: Tone::$tone, upper: true }
    };
}

static MARKED: Map<char, MarkedVowel> = phf_map! {
    'ā' => mv!(A, First), 'á' => mv!(A, Second), 'ǎ' => mv!(A, Third), 'à' => mv!(A, Fourth),
    'ē' => mv!(E, First), 'é' => mv!(E, Second), 'ě' => mv!(E, Third), 'è' => mv!(E, Fourth),
    'ī' => mv!(I, First), 'í' => mv!(I, Second), 'ǐ' => mv!(I, Third), 'ì' => mv!(I, Fourth),
    'ō' => mv!(O, First), 'ó' => mv!(O, Second), 'ǒ' => mv!(O, Third), 'ò' => mv!(O, Fourth),
    'ū' => mv!(U, First), 'ú' => mv!(U, Second), 'ǔ' => mv!(U, Third), 'ù' => mv!(U, Fourth),
    'ǖ' => mv!(V, First), 'ǘ' => mv!(V, Second), 'ǚ' => mv!(V, Third), 'ǜ' => mv!(V, Fourth),
    'Ā' => mv!(A, First, upper), 'Á' => mv!(A, Second, upper), 'Ǎ' => mv!(A, Third, upper), 'À' => mv!(A, Fourth, upper),
    'Ē' => mv!(E, First, upper), 'É' => mv!(E, Second, upper), 'Ě' => mv!(E, Third, upper), 'È' => mv!(E, Fourth, upper),
    'Ī' => mv!(I, First, upper), 'Í' => mv!(I, Second, upper), 'Ǐ' => mv!(I, Third, upper), 'Ì' => mv!(I, Fourth, upper),
    'Ō' => mv!(O, First, upper), 'Ó' => mv!(O, Second, upper), 'Ǒ' => mv!(O, Third, upper), 'Ò' => mv!(O, Fourth, upper),
    'Ū' => mv!(U, First, upper), 'Ú' => mv!(U, Second, upper), 'Ǔ' => mv!(U, Third, upper), 'Ù' => mv!(U, Fourth, upper),
    'Ǖ' => mv!(V, First, upper), 'Ǘ' => mv!(V, Second, upper), 'Ǚ' => mv!(V, Third, upper), 'Ǜ' => mv!(V, Fourth, upper),
};

/// Convert a numbered syllable (`miao1`) to its marked form (`miāo`).
///
/// The mark goes on the first `a`, else the first `e`, else the `o` of `ou`,
/// else the rightmost of `i o u v ü`; `v` is written `ü` once marked.
/// A neutral digit (`0`/`5`) is dropped without marking anything.
///
/// Returned unchanged when the last character is not a tone digit or when
/// there is no vowel to carry the mark.
pub fn numbered_to_marked(syllable: &str) -> Cow<'_, str> {
    let Some(last) = syllable.chars().next_back() else {
        return Cow::Borrowed(syllable);
    };
    let Some(tone) = Tone::from_digit(last) else {
        return Cow::Borrowed(syllable);
    };
    let body = &syllable[..syllable.len() - last.len_utf8()];
    if !body.chars().any(|c| is_tone_bearing_vowel(fold(c))) {
        return Cow::Borrowed(syllable);
    }
    if tone == Tone::Neutral {
        return Cow::Borrowed(body);
    }

    let Some((at, vowel)) = vowel_to_mark(body) else {
        return Cow::Borrowed(syllable);
    };
    let Some(glyph) = VowelRow::of(vowel).and_then(|row| row.marked(tone, vowel.is_uppercase()))
    else {
        return Cow::Borrowed(syllable);
    };

    let mut out = String::with_capacity(body.len() + 1);
    out.push_str(&body[..at]);
    out.push(glyph);
    out.push_str(&body[at + vowel.len_utf8()..]);
    Cow::Owned(out)
}

fn vowel_to_mark(body: &str) -> Option<(usize, char)> {
    let first = |target: char| body.char_indices().find(|&(_, c)| fold(c) == target);
    if let Some(hit) = first('a').or_else(|| first('e')) {
        return Some(hit);
    }

    let mut prev: Option<(usize, char)> = None;
    for (i, c) in body.char_indices() {
        if let Some((at, o)) = prev
            && fold(o) == 'o'
            && fold(c) == 'u'
        {
            return Some((at, o));
        }
        prev = Some((i, c));
    }

    body.char_indices()
        .rev()
        .find(|&(_, c)| matches!(fold(c), 'i' | 'o' | 'u' | 'v' | 'ü'))
}

/// Lazy form of one character: `None` keeps it, `Some("")` deletes it.
#[inline]
fn lazy_form(c: char) -> Option<&'static str> {
    if let Some(m) = MARKED.get(&c) {
        return Some(m.row.lazy(m.upper));
    }
    match c {
        'ü' => Some("u"),
        'Ü' => Some("U"),
        'ḿ' => Some("m"),
        'Ḿ' => Some("M"),
        'ń' | 'ǹ' | 'ň' => Some("n"),
        'Ń' | 'Ǹ' | 'Ň' => Some("N"),
        COMBINING_GRAVE => Some(""),
        _ => None,
    }
}

/// Strip all tone information: marked vowels (and `ü`) become ASCII vowels,
/// stray marks on `m`/`n` are removed, and a trailing tone digit is dropped.
pub fn marked_to_lazy(syllable: &str) -> Cow<'_, str> {
    let stripped = if syllable.is_ascii() || !syllable.chars().any(|c| lazy_form(c).is_some()) {
        Cow::Borrowed(syllable)
    } else {
        let mut out = String::with_capacity(syllable.len());
        for c in syllable.chars() {
            match lazy_form(c) {
                Some(bare) => out.push_str(bare),
                None => out.push(c),
            }
        }
        Cow::Owned(out)
    };
    drop_tone_digit(stripped)
}

fn drop_tone_digit(text: Cow<'_, str>) -> Cow<'_, str> {
    if !matches!(text.as_bytes(), [.., _, b'0'..=b'5']) {
        return text;
    }
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(&s[..s.len() - 1]),
        Cow::Owned(mut s) => {
            s.pop();
            Cow::Owned(s)
        }
    }
}

/// Convert a marked syllable (`lǜ`) to its numbered form (`lü4`).
///
/// Every marked vowel is replaced by its bare vowel and the tone of the first
/// one is appended as a digit. Unchanged when nothing is marked.
pub fn marked_to_numbered(syllable: &str) -> Cow<'_, str> {
    if syllable.is_ascii() {
        return Cow::Borrowed(syllable);
    }
    let Some(tone) = syllable.chars().find_map(Tone::of_marked) else {
        return Cow::Borrowed(syllable);
    };
    let mut out: String = syllable
        .chars()
        .map(|c| MARKED.get(&c).map_or(c, |m| m.row.bare(m.upper)))
        .collect();
    out.push(tone.digit());
    Cow::Owned(out)
}
