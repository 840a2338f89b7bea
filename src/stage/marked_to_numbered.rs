use crate::{
    context::Context,
    segment::{any_word_changes, rewrite_words},
    stage::{Stage, StageError, map_cow},
    tone::marked_to_numbered,
};
use std::borrow::Cow;

/// Rewrite every marked syllable (`zhōngguó`) into numbered form (`zhong1guo2`).
pub struct MarkedToNumbered;

impl Stage for MarkedToNumbered {
    fn name(&self) -> &'static str {
        "marked_to_numbered"
    }

    fn needs_apply(&self, text: &str, ctx: &Context<'_>) -> Result<bool, StageError> {
        if text.is_ascii() {
            return Ok(false);
        }
        Ok(any_word_changes(text, ctx.inventory, marked_to_numbered))
    }

    fn apply<'a>(
        &self,
        text: Cow<'a, str>,
        ctx: &Context<'_>,
    ) -> Result<Cow<'a, str>, StageError> {
        Ok(map_cow(text, |s| {
            rewrite_words(s, ctx.inventory, marked_to_numbered)
        }))
    }
}
