use crate::{
    context::Context,
    segment::{any_word_changes, rewrite_words},
    stage::{Stage, StageError, map_cow},
    tone::numbered_to_marked,
};
use std::borrow::Cow;

/// Rewrite every numbered syllable (`zhong1guo2`) into marked form (`zhōngguó`).
///
/// The text is segmented against the context's inventory; only word tokens
/// are converted.
pub struct NumberedToMarked;

impl Stage for NumberedToMarked {
    fn name(&self) -> &'static str {
        "numbered_to_marked"
    }

    fn needs_apply(&self, text: &str, ctx: &Context<'_>) -> Result<bool, StageError> {
        // words only ever carry tone digits 1–4
        if !text.bytes().any(|b| matches!(b, b'1'..=b'4')) {
            return Ok(false);
        }
        Ok(any_word_changes(text, ctx.inventory, numbered_to_marked))
    }

    fn apply<'a>(
        &self,
        text: Cow<'a, str>,
        ctx: &Context<'_>,
    ) -> Result<Cow<'a, str>, StageError> {
        Ok(map_cow(text, |s| {
            rewrite_words(s, ctx.inventory, numbered_to_marked)
        }))
    }
}
