use crate::stage::Stage;

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// General test samples (may or may not trigger changes).
    fn samples() -> &'static [&'static str] {
        &["Ni3 Hao3", " nǐ-hǎo ", "TEST", ""]
    }

    /// Samples that should pass through unchanged and borrowed.
    fn should_pass_through() -> &'static [&'static str] {
        &["hello", "world", "test123", "abc def", ""]
    }

    /// Input/output pairs that verify correct transformations.
    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Assert that a stage satisfies the universal stage contracts:
///
/// 1. `zero_copy_when_no_changes`: no allocation when input == output
/// 2. `char_mapper_equivalent_to_apply`: the fused path, if any, agrees with `apply`
/// 3. `stage_is_idempotent`: applying twice yields the same result as once
/// 4. `needs_apply_is_accurate`: predicts exactly whether `apply` changes the text
/// 5. `handles_empty_string_and_ascii`
/// 6. `no_panic_on_mixed_scripts`
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {
        $crate::testing::stage_contract::zero_copy_when_no_changes($stage);
        $crate::testing::stage_contract::char_mapper_equivalent_to_apply($stage);
        $crate::testing::stage_contract::stage_is_idempotent($stage);
        $crate::testing::stage_contract::needs_apply_is_accurate($stage);
        $crate::testing::stage_contract::handles_empty_string_and_ascii($stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts($stage);
    };
}

// ============================================================================
// Universal contract tests
// ============================================================================

use crate::{context::Context, testing::STANDARD};
use std::borrow::Cow;

pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: S) {
    let ctx = Context::new(&STANDARD);

    for &input in S::samples() {
        let mut text = Cow::Borrowed(input);

        // First pass, respecting needs_apply
        if stage.needs_apply(&text, &ctx).unwrap() {
            let old_ptr = text.as_ref() as *const str;
            text = stage.apply(text, &ctx).unwrap();
            assert_ne!(old_ptr, text.as_ref() as *const str);
        } else {
            assert_eq!(input as *const str, text.as_ref() as *const str);
        }

        // Second pass must never allocate again
        let old_ptr = text.as_ref() as *const str;
        if stage.needs_apply(&text, &ctx).unwrap() {
            text = stage.apply(text, &ctx).unwrap();
        }
        assert_eq!(
            old_ptr,
            text.as_ref() as *const str,
            "zero-copy violated on second pass (stage: {}, input: `{input}`)",
            stage.name()
        );
    }

    for &pass_through in S::should_pass_through() {
        let mut text = Cow::Borrowed(pass_through);
        let input_ptr = pass_through as *const str;

        if stage.needs_apply(&text, &ctx).unwrap() {
            text = stage.apply(text, &ctx).unwrap();
        }

        assert_eq!(text.as_ref(), pass_through);
        assert_eq!(
            input_ptr,
            text.as_ref() as *const str,
            "zero-copy violated on pass-through sample (stage: {}, input: `{pass_through}`)",
            stage.name()
        );
    }

    for &(input, expected) in S::should_transform() {
        let mut text = Cow::Borrowed(input);
        if stage.needs_apply(&text, &ctx).unwrap() {
            text = stage.apply(text, &ctx).unwrap();
        }
        assert_eq!(text.as_ref(), expected, "stage: {}", stage.name());
    }
}

pub fn char_mapper_equivalent_to_apply<S: StageTestConfig>(stage: S) {
    let ctx = Context::new(&STANDARD);
    let Some(mapper) = stage.as_char_mapper() else {
        return;
    };
    for &input in S::samples().iter().chain(["ZhōngGUÓ nǐ-HǍO 123 ÀÉÎÖÜ テスト"].iter()) {
        let via_apply = stage.apply(Cow::Borrowed(input), &ctx).unwrap();
        let via_mapper: String = mapper.bind(input).collect();
        assert_eq!(via_apply.as_ref(), via_mapper, "char mapper ≠ apply() on `{input}`");
        let per_char: String = input.chars().filter_map(|c| mapper.map(c)).collect();
        assert_eq!(via_mapper, per_char);
    }
}

pub fn stage_is_idempotent<S: StageTestConfig>(stage: S) {
    let ctx = Context::new(&STANDARD);
    for &input in S::samples() {
        let once = stage.apply(Cow::Borrowed(input), &ctx).unwrap();
        let twice = stage.apply(once.clone(), &ctx).unwrap();
        assert_eq!(
            once,
            twice,
            "apply() not idempotent for `{}` on `{input}`",
            stage.name()
        );
    }
}

pub fn needs_apply_is_accurate<S: StageTestConfig>(stage: S) {
    let ctx = Context::new(&STANDARD);
    for &sample in S::samples() {
        check_accuracy(&stage, sample, &ctx);
    }
    // plain ASCII that no stage touches
    for clean in ["", "hello", "world123", " !@#"] {
        check_accuracy(&stage, clean, &ctx);
    }
}

#[inline(always)]
fn check_accuracy<S: Stage>(stage: &S, input: &str, ctx: &Context<'_>) {
    let predicted = stage.needs_apply(input, ctx).expect("needs_apply errored");
    // Owned input, so stages that always allocate are not penalised
    let output = stage
        .apply(Cow::Owned(input.to_owned()), ctx)
        .expect("apply errored");
    let actually_changes = output != input;
    assert_eq!(
        predicted,
        actually_changes,
        "needs_apply() mismatch for stage `{}` on `{input}`\n\
         predicted: {predicted}\n\
         actual   : {actually_changes} (output = {output:?})",
        stage.name(),
    );
}

pub fn handles_empty_string_and_ascii<S: StageTestConfig>(stage: S) {
    let ctx = Context::new(&STANDARD);
    let empty: &str = "";
    let result_empty = if stage.needs_apply(empty, &ctx).unwrap() {
        stage.apply(Cow::Borrowed(empty), &ctx).unwrap()
    } else {
        Cow::Borrowed(empty)
    };
    assert_eq!(result_empty.as_ref(), "");
    // lower-case ASCII with no tone digit glued to a syllable
    let ascii = "hello world 123 !@#";
    let result_ascii = stage.apply(Cow::Borrowed(ascii), &ctx).unwrap();
    assert_eq!(result_ascii.as_ref(), ascii);
}

pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: S) {
    let ctx = Context::new(&STANDARD);
    let _ = stage.apply(
        Cow::Borrowed("Nǐ hǎo 世界 русский Türkçe ni3hao3 العربية a\u{0300}ḿ’"),
        &ctx,
    );
}
