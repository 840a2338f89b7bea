use crate::{
    context::Context,
    segment::{any_word_changes, rewrite_words},
    stage::{Stage, StageError, map_cow},
    tone::marked_to_lazy,
};
use std::borrow::Cow;

/// Strip tone marks and tone digits from every syllable, leaving lazy Pinyin.
pub struct MarkedToLazy;

impl Stage for MarkedToLazy {
    fn name(&self) -> &'static str {
        "marked_to_lazy"
    }

    fn needs_apply(&self, text: &str, ctx: &Context<'_>) -> Result<bool, StageError> {
        if text.is_ascii() && !text.bytes().any(|b| matches!(b, b'1'..=b'4')) {
            return Ok(false);
        }
        Ok(any_word_changes(text, ctx.inventory, marked_to_lazy))
    }

    fn apply<'a>(
        &self,
        text: Cow<'a, str>,
        ctx: &Context<'_>,
    ) -> Result<Cow<'a, str>, StageError> {
        Ok(map_cow(text, |s| rewrite_words(s, ctx.inventory, marked_to_lazy)))
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;
    use crate::testing::stage_contract::StageTestConfig;

    impl StageTestConfig for MarkedToLazy {
        fn samples() -> &'static [&'static str] {
            &["nǐ hǎo", "Lǚ", "zhong1guo2", "lü", "ḿ", "ê2", ""]
        }

        fn should_pass_through() -> &'static [&'static str] {
            &["ni hao", "test123", "r3", "ḿ", "über", ""]
        }

        fn should_transform() -> &'static [(&'static str, &'static str)] {
            &[
                ("nǐ hǎo", "ni hao"),
                ("Lǚ", "Lu"),
                ("lü nǚ", "lu nu"),
                ("zhong1guo2", "zhongguo"),
                ("ê2", "ê"),
                ("ŌuĀnhuì", "OuAnhui"),
            ]
        }
    }

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(MarkedToLazy);
    }
}
