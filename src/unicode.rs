//! Character classes shared by the normalizer, the tone codec and the segmenter.
//!
//! Everything here is a `const fn` or a tiny `match`; no tables, no allocation.

/// U+0300 COMBINING GRAVE ACCENT, found detached from its vowel in Unihan data.
pub const COMBINING_GRAVE: char = '\u{0300}';

/// Lower-case `c` when that yields exactly one scalar value, otherwise return `c`.
///
/// Pinyin never needs the multi-char lowercase expansions (`İ` → `i̇`), so a
/// character that expands is simply not a Pinyin character and stays as-is.
#[inline(always)]
pub fn fold(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Tone digits: `1`–`4` for the marked tones, `0` and `5` for the neutral tone.
#[inline(always)]
pub const fn is_tone_digit(c: char) -> bool {
    matches!(c, '0'..='5')
}

/// Vowels that can carry a tone mark, lower case. `v` is the ASCII stand-in for `ü`.
#[inline(always)]
pub const fn is_tone_bearing_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'v' | 'ü')
}

/// Precomposed vowels carrying one of the four tone marks, either case.
#[inline(always)]
pub const fn is_marked_vowel(c: char) -> bool {
    matches!(
        c,
        'ā' | 'á' | 'ǎ' | 'à' | 'Ā' | 'Á' | 'Ǎ' | 'À'
            | 'ē' | 'é' | 'ě' | 'è' | 'Ē' | 'É' | 'Ě' | 'È'
            | 'ī' | 'í' | 'ǐ' | 'ì' | 'Ī' | 'Í' | 'Ǐ' | 'Ì'
            | 'ō' | 'ó' | 'ǒ' | 'ò' | 'Ō' | 'Ó' | 'Ǒ' | 'Ò'
            | 'ū' | 'ú' | 'ǔ' | 'ù' | 'Ū' | 'Ú' | 'Ǔ' | 'Ù'
            | 'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' | 'Ǖ' | 'Ǘ' | 'Ǚ' | 'Ǜ'
    )
}

/// Any vowel, bare or marked, either case. A syllable ending in `n`/`g` that is
/// directly followed by one of these may have stolen the next syllable's onset.
#[inline(always)]
pub fn is_vowel(c: char) -> bool {
    let l = fold(c);
    is_tone_bearing_vowel(l) || l == 'ê' || is_marked_vowel(c)
}

/// The only consonants a Pinyin syllable may end with.
#[inline(always)]
pub const fn is_syllable_final(c: char) -> bool {
    matches!(c, 'n' | 'g')
}

/// Explicit syllable separators: ASCII apostrophe and hyphen plus their
/// typographic look-alikes.
#[inline(always)]
pub const fn is_syllable_separator(c: char) -> bool {
    matches!(
        c,
        '\'' | '-' | '\u{2018}' | '\u{2019}' | '\u{2010}' | '\u{2011}'
    )
}

/// Characters that may appear inside a syllable: Latin letters, `ü`, `ê`, the
/// marked vowels and the tone digits.
#[inline(always)]
pub const fn is_syllable_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || is_tone_digit(c)
        || matches!(c, 'ü' | 'Ü' | 'ê' | 'Ê')
        || is_marked_vowel(c)
}

/// Breve vowels seen in the wild, mapped to the caron vowel Unihan uses for the
/// third tone. There is no ü + breve.
#[inline(always)]
pub const fn breve_to_caron(c: char) -> Option<char> {
    Some(match c {
        'ă' => 'ǎ',
        'Ă' => 'Ǎ',
        'ĕ' => 'ě',
        'Ĕ' => 'Ě',
        'ĭ' => 'ǐ',
        'Ĭ' => 'Ǐ',
        'ŏ' => 'ǒ',
        'Ŏ' => 'Ǒ',
        'ŭ' => 'ǔ',
        'Ŭ' => 'Ǔ',
        _ => return None,
    })
}

/// Precomposed grave vowel for a bare vowel, used to absorb a following U+0300.
#[inline(always)]
pub const fn grave_vowel(c: char) -> Option<char> {
    Some(match c {
        'a' => 'à',
        'A' => 'À',
        'e' => 'è',
        'E' => 'È',
        'i' => 'ì',
        'I' => 'Ì',
        'o' => 'ò',
        'O' => 'Ò',
        'u' => 'ù',
        'U' => 'Ù',
        'ü' => 'ǜ',
        'Ü' => 'Ǜ',
        _ => return None,
    })
}

/// Acute, grave and caron on `m`/`n` are not part of the tone system.
#[inline(always)]
pub const fn strip_nasal_mark(c: char) -> Option<char> {
    Some(match c {
        'ḿ' => 'm',
        'Ḿ' => 'M',
        'ń' | 'ǹ' | 'ň' => 'n',
        'Ń' | 'Ǹ' | 'Ň' => 'N',
        _ => return None,
    })
}
