#[cfg(test)]
mod integration_tests {

    use crate::testing::STANDARD;
    use crate::{
        Context, Encoding, LowerCase, MarkedToLazy, NormalizeDiacritics, Pipeline, PinyinError,
        Profile, ProfileError, Stage, StageError, preset,
    };
    use std::borrow::Cow;

    #[test]
    fn indexing_preset_unifies_encodings() {
        let ctx = Context::new(&STANDARD);
        let profile = preset::indexing();
        for input in ["Nǐ hǎo", "ni3 hao3", "NI HAO", "nĭ ha\u{0300}o"] {
            assert_eq!(profile.run(Cow::Borrowed(input), &ctx).unwrap(), "ni hao", "{input}");
        }
    }

    #[test]
    fn display_and_numbered_presets() {
        let ctx = Context::new(&STANDARD);
        let display = preset::display();
        assert_eq!(
            display.run(Cow::Borrowed("Zhong1guo2 ren2"), &ctx).unwrap(),
            "Zhōngguó rén"
        );
        let numbered = preset::numbered();
        assert_eq!(
            numbered.run(Cow::Borrowed("Zhōngguó rén"), &ctx).unwrap(),
            "Zhong1guo2 ren2"
        );
        assert_eq!(numbered.name(), "numbered");
    }

    #[test]
    fn presets_are_zero_copy_on_clean_input() {
        let ctx = Context::new(&STANDARD);
        let input = "ni hao";
        let out = preset::indexing().run(Cow::Borrowed(input), &ctx).unwrap();
        assert!(matches!(out, Cow::Borrowed(s) if std::ptr::eq(s, input)));
    }

    #[test]
    fn static_and_dynamic_profiles_agree() {
        let ctx = Context::new(&STANDARD);
        let fixed = Profile::builder("fixed")
            .add_stage(NormalizeDiacritics)
            .add_stage(MarkedToLazy)
            .add_stage(LowerCase)
            .build();
        let dynamic = Profile::plugin_builder("dynamic")
            .add_stage(NormalizeDiacritics)
            .add_stage(MarkedToLazy)
            .add_stage(LowerCase)
            .build();
        let input = "Běijīng HUĀN yíng nǐ, Lǚ Xiān1sheng";
        assert_eq!(
            fixed.run(Cow::Borrowed(input), &ctx).unwrap(),
            dynamic.run(Cow::Borrowed(input), &ctx).unwrap()
        );
    }

    struct Reject;

    impl Stage for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn needs_apply(&self, text: &str, _ctx: &Context<'_>) -> Result<bool, StageError> {
            Ok(!text.is_empty())
        }

        fn apply<'a>(
            &self,
            _text: Cow<'a, str>,
            _ctx: &Context<'_>,
        ) -> Result<Cow<'a, str>, StageError> {
            Err(StageError::Failed("reject", "always fails".into()))
        }
    }

    #[test]
    fn stage_errors_carry_profile_name() {
        let ctx = Context::new(&STANDARD);
        let profile = Profile::plugin_builder("strict").add_stage(Reject).build();
        let err = profile.run(Cow::Borrowed("ma"), &ctx).unwrap_err();
        assert!(matches!(err, ProfileError::Failed("strict", StageError::Failed("reject", _))));
        let top: PinyinError = err.into();
        assert!(top.to_string().contains("strict"));
        // empty text skips the stage entirely
        assert_eq!(profile.run(Cow::Borrowed(""), &ctx).unwrap(), "");
    }

    #[test]
    fn inventory_errors_convert() {
        let err: PinyinError = crate::SyllableInventory::build(Vec::<String>::new())
            .unwrap_err()
            .into();
        assert!(matches!(err, PinyinError::Inventory(_)));
    }

    #[test]
    fn pipeline_end_to_end() {
        let p = Pipeline::builder(&STANDARD)
            .source(Encoding::Mixed)
            .target(Encoding::Numbered)
            .build();
        assert_eq!(p.convert("Wǒ ài Běijīng!").unwrap(), "Wo3 ai4 Bei3jing1!");

        let lazy = Pipeline::builder(&STANDARD)
            .target(Encoding::Lazy)
            .keep_non_words(false)
            .lowercase(true)
            .build();
        let words: Vec<_> = lazy
            .tokens("Wǒ ài Běijīng!")
            .into_iter()
            .map(|t| t.text.into_owned())
            .collect();
        assert_eq!(words, ["wo", "ai", "bei", "jing"]);
    }

    #[test]
    fn pipeline_borrows_when_nothing_to_do() {
        let p = Pipeline::builder(&STANDARD)
            .source(Encoding::Numbered)
            .target(Encoding::Marked)
            .build();
        let input = "no tone digits here";
        assert!(matches!(p.convert(input).unwrap(), Cow::Borrowed(s) if std::ptr::eq(s, input)));
    }
}
