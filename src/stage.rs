//! Text-level transformation stages.
//!
//! A stage is a single rewrite of a whole string. `needs_apply` is an exact
//! pre-check: when it returns `false`, `apply` would hand the text back
//! unchanged, so the process skips the stage and keeps the borrow.
//!
//! Stages that map one character to at most one character may also expose a
//! [`CharMapper`]; a monomorphised [`ChainedProcess`](crate::process::ChainedProcess)
//! then streams the text through it instead of calling `apply`.

pub mod lower_case;
pub mod marked_to_lazy;
pub mod marked_to_numbered;
pub mod normalize_diacritics;
pub mod numbered_to_marked;

use crate::context::Context;
use std::borrow::Cow;
use std::iter::FusedIterator;
use thiserror::Error;

/// Public error type for every stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("stage `{0}` failed: {1}")]
    Failed(&'static str, String),
}

/// A single normalisation step.
pub trait Stage: Send + Sync {
    /// Human-readable name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Exact pre-check. `Ok(false)` means `apply` would change nothing.
    fn needs_apply(&self, text: &str, ctx: &Context<'_>) -> Result<bool, StageError>;

    /// Allocation-aware transformation. Returns the input untouched when
    /// nothing changes.
    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context<'_>)
    -> Result<Cow<'a, str>, StageError>;

    /// A trait-object reference to `self` iff the stage is a pure per-character
    /// mapping.
    #[inline]
    fn as_char_mapper(&self) -> Option<&dyn CharMapper> {
        None
    }
}

/// One-to-one (or one-to-zero) character mapping.
pub trait CharMapper: Send + Sync {
    /// Map a single Unicode scalar value; `None` removes it.
    fn map(&self, c: char) -> Option<char>;

    /// Bind the mapper to a concrete `&str`.
    fn bind<'a>(&self, text: &'a str) -> Box<dyn FusedIterator<Item = char> + 'a>;
}

/// Run a borrowing rewrite over a `Cow`, keeping the owned buffer when
/// `f` hands its argument back untouched.
pub(crate) fn map_cow<'a, F>(text: Cow<'a, str>, f: F) -> Cow<'a, str>
where
    F: FnOnce(&str) -> Cow<'_, str>,
{
    match text {
        Cow::Borrowed(s) => f(s),
        Cow::Owned(s) => {
            let changed = match f(&s) {
                Cow::Borrowed(out) if std::ptr::eq(out, s.as_str()) => None,
                other => Some(other.into_owned()),
            };
            Cow::Owned(changed.unwrap_or(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_word(s: &str) -> Cow<'_, str> {
        Cow::Borrowed(s.split(' ').next().unwrap_or(s))
    }

    #[test]
    fn map_cow_keeps_owned_buffer_when_unchanged() {
        let owned = String::from("zhong");
        let ptr = owned.as_ptr();
        let out = map_cow(Cow::Owned(owned), first_word);
        assert!(matches!(&out, Cow::Owned(s) if s.as_ptr() == ptr));
    }

    #[test]
    fn map_cow_detects_borrowed_prefix() {
        let out = map_cow(Cow::Owned(String::from("ni hao")), first_word);
        assert_eq!(out, "ni");
        let input = "ni hao";
        let out = map_cow(Cow::Borrowed(input), first_word);
        assert_eq!(out, "ni");
    }
}
