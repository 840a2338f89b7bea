use crate::{
    context::Context,
    stage::{CharMapper, Stage, StageError},
    unicode::fold,
};
use std::borrow::Cow;
use std::iter::FusedIterator;

/// Lower-case every character that has a single-character lower-case form.
///
/// `Ǚ` → `ǚ`, `Ê` → `ê`; characters whose lower case expands (`İ`) are kept.
/// This is a pure 1→1 mapping, so the stage also fuses as a [`CharMapper`].
pub struct LowerCase;

/// Lower-case `text`, borrowed when it has nothing to fold.
pub fn lowercase(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| fold(c) != c) {
        return Cow::Borrowed(text);
    }
    if text.is_ascii() {
        return Cow::Owned(text.to_ascii_lowercase());
    }
    Cow::Owned(text.chars().map(fold).collect())
}

impl Stage for LowerCase {
    fn name(&self) -> &'static str {
        "lowercase"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str, _ctx: &Context<'_>) -> Result<bool, StageError> {
        Ok(text.chars().any(|c| fold(c) != c))
    }

    fn apply<'a>(
        &self,
        text: Cow<'a, str>,
        _ctx: &Context<'_>,
    ) -> Result<Cow<'a, str>, StageError> {
        if !text.chars().any(|c| fold(c) != c) {
            return Ok(text);
        }
        Ok(Cow::Owned(lowercase(&text).into_owned()))
    }

    #[inline]
    fn as_char_mapper(&self) -> Option<&dyn CharMapper> {
        Some(self)
    }
}

impl CharMapper for LowerCase {
    #[inline(always)]
    fn map(&self, c: char) -> Option<char> {
        Some(fold(c))
    }

    fn bind<'a>(&self, text: &'a str) -> Box<dyn FusedIterator<Item = char> + 'a> {
        Box::new(text.chars().map(fold))
    }
}
