//! Normalizer → segmenter → per-token tone step, chosen by encoding.

use crate::{
    MarkedToLazy, MarkedToNumbered, NormalizeDiacritics, NumberedToMarked,
    context::Context,
    inventory::{InventoryError, SyllableInventory},
    process::DynamicProcess,
    profile::{Profile, ProfileError},
    segment::{Token, segment},
    stage::{
        StageError,
        lower_case::{LowerCase, lowercase},
        map_cow,
        normalize_diacritics::{NormalizedText, normalize_with_offsets},
    },
    tone::{marked_to_lazy, marked_to_numbered, numbered_to_marked},
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

/// How tones are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Trailing tone digit: `zhong1guo2`.
    Numbered,
    /// Diacritic on the vowel: `zhōngguó`.
    Marked,
    /// No tone information: `zhongguo`.
    Lazy,
    /// Unknown or a blend of the above.
    #[default]
    Mixed,
}

impl Encoding {
    /// Raw text in this encoding may carry diacritics worth canonicalizing.
    #[inline]
    pub fn carries_diacritics(self) -> bool {
        matches!(self, Encoding::Marked | Encoding::Mixed)
    }
}

/// The per-syllable conversion a pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneStep {
    None,
    ToMarked,
    ToLazy,
    ToNumbered,
}

impl ToneStep {
    pub fn select(source: Encoding, target: Encoding) -> Self {
        if source == target {
            return ToneStep::None;
        }
        match target {
            Encoding::Marked => ToneStep::ToMarked,
            Encoding::Lazy => ToneStep::ToLazy,
            Encoding::Numbered => ToneStep::ToNumbered,
            Encoding::Mixed => ToneStep::None,
        }
    }

    /// Convert one syllable.
    pub fn apply<'a>(self, syllable: Cow<'a, str>) -> Cow<'a, str> {
        match self {
            ToneStep::None => syllable,
            ToneStep::ToMarked => map_cow(syllable, numbered_to_marked),
            ToneStep::ToLazy => map_cow(syllable, marked_to_lazy),
            ToneStep::ToNumbered => map_cow(syllable, marked_to_numbered),
        }
    }
}

#[derive(Debug, Error)]
pub enum PinyinError {
    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Serializable pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: Encoding,
    pub target: Encoding,
    /// Lower-case every token.
    pub lowercase: bool,
    /// Keep whitespace/punctuation tokens in [`Pipeline::tokens`].
    pub keep_non_words: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: Encoding::Mixed,
            target: Encoding::Mixed,
            lowercase: false,
            keep_non_words: true,
        }
    }
}

/// A straight composition of the normalizer, the segmenter and a tone step.
pub struct Pipeline<'i> {
    inventory: &'i SyllableInventory,
    config: PipelineConfig,
    tone: ToneStep,
    profile: Profile<DynamicProcess>,
}

impl<'i> Pipeline<'i> {
    pub fn builder(inventory: &'i SyllableInventory) -> PipelineBuilder<'i> {
        PipelineBuilder {
            inventory,
            config: PipelineConfig::default(),
        }
    }

    pub fn from_config(inventory: &'i SyllableInventory, config: PipelineConfig) -> Self {
        PipelineBuilder { inventory, config }.build()
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[inline]
    pub fn tone_step(&self) -> ToneStep {
        self.tone
    }

    /// Stage names `convert` runs, in order.
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profile.stage_names()
    }

    /// Segment and convert `text`. Offsets point into `text` itself, before
    /// normalization.
    pub fn tokens<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        let normalized = if self.config.source.carries_diacritics() {
            normalize_with_offsets(text)
        } else {
            NormalizedText::unchanged(text)
        };
        if let Some(raw) = normalized.borrowed() {
            return self.finish(raw).collect();
        }
        self.finish(normalized.as_str())
            .map(|token| {
                let start = normalized.source_offset(token.start);
                let end = normalized.source_offset(token.end);
                Token {
                    start,
                    end,
                    ..token.into_owned()
                }
            })
            .collect()
    }

    fn finish<'s>(&self, text: &'s str) -> impl Iterator<Item = Token<'s>> {
        segment(text, self.inventory)
            .filter(|t| self.config.keep_non_words || t.is_word())
            .map(|mut token| {
                if token.is_word() {
                    token.text = self.tone.apply(token.text);
                }
                if self.config.lowercase {
                    token.text = map_cow(token.text, lowercase);
                }
                token
            })
    }

    /// The whole text converted, borrowed when nothing changed.
    ///
    /// Equal to the concatenation of [`Pipeline::tokens`] with non-words kept.
    pub fn convert<'a>(&self, text: &'a str) -> Result<Cow<'a, str>, PinyinError> {
        let ctx = Context::new(self.inventory);
        Ok(self.profile.run(Cow::Borrowed(text), &ctx)?)
    }
}

pub struct PipelineBuilder<'i> {
    inventory: &'i SyllableInventory,
    config: PipelineConfig,
}

impl<'i> PipelineBuilder<'i> {
    pub fn source(mut self, source: Encoding) -> Self {
        self.config.source = source;
        self
    }

    pub fn target(mut self, target: Encoding) -> Self {
        self.config.target = target;
        self
    }

    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.config.lowercase = lowercase;
        self
    }

    pub fn keep_non_words(mut self, keep: bool) -> Self {
        self.config.keep_non_words = keep;
        self
    }

    pub fn build(self) -> Pipeline<'i> {
        let config = self.config;
        let tone = ToneStep::select(config.source, config.target);

        let mut builder = Profile::plugin_builder("pipeline");
        if config.source.carries_diacritics() {
            builder = builder.add_stage(NormalizeDiacritics);
        }
        builder = match tone {
            ToneStep::None => builder,
            ToneStep::ToMarked => builder.add_stage(NumberedToMarked),
            ToneStep::ToLazy => builder.add_stage(MarkedToLazy),
            ToneStep::ToNumbered => builder.add_stage(MarkedToNumbered),
        };
        if config.lowercase {
            builder = builder.add_stage(LowerCase);
        }
        let profile = builder.build();

        debug!(
            source = ?config.source,
            target = ?config.target,
            tone = ?tone,
            lowercase = config.lowercase,
            "pipeline built"
        );
        Pipeline {
            inventory: self.inventory,
            config,
            tone,
            profile,
        }
    }
}
