pub mod context;
pub mod inventory;
pub mod pipeline;
pub mod process;
pub mod profile;
pub mod segment;
pub mod stage;
pub mod tone;
pub mod unicode;

#[cfg(test)]
pub(crate) mod testing;

pub use context::Context;
pub use inventory::{InventoryError, MAX_SYLLABLE_LEN, SyllableInventory, TrieCursor};
pub use pipeline::{Encoding, Pipeline, PipelineBuilder, PipelineConfig, PinyinError, ToneStep};
pub use profile::{Profile, ProfileError, preset};
pub use segment::{Segmenter, Token, TokenKind, segment, segment_words};
pub use stage::lower_case::LowerCase;
pub use stage::marked_to_lazy::MarkedToLazy;
pub use stage::marked_to_numbered::MarkedToNumbered;
pub use stage::normalize_diacritics::{
    NormalizeDiacritics, NormalizedText, normalize_diacritics, normalize_with_offsets,
};
pub use stage::numbered_to_marked::NumberedToMarked;
pub use stage::{Stage, StageError};
pub use tone::{Tone, VowelRow, marked_to_lazy, marked_to_numbered, numbered_to_marked};
