use crate::{
    LowerCase, MarkedToLazy, MarkedToNumbered, NormalizeDiacritics, NumberedToMarked,
    process::Process, profile::Profile,
};

/// Search-index keys: canonical diacritics, no tones, lower case.
/// `Nǐ hǎo` and `ni3 hao3` both become `ni hao`.
pub fn indexing() -> Profile<impl Process> {
    Profile::builder("indexing")
        .add_stage(NormalizeDiacritics)
        .add_stage(MarkedToLazy)
        .add_stage(LowerCase)
        .build()
}

/// Human-readable marked Pinyin from numbered or mixed input.
pub fn display() -> Profile<impl Process> {
    Profile::builder("display")
        .add_stage(NormalizeDiacritics)
        .add_stage(NumberedToMarked)
        .build()
}

/// ASCII-friendly numbered Pinyin from marked or mixed input.
pub fn numbered() -> Profile<impl Process> {
    Profile::builder("numbered")
        .add_stage(NormalizeDiacritics)
        .add_stage(MarkedToNumbered)
        .build()
}
