use proptest::prelude::*;
use question_formatters::annotation::split_annotations;

proptest! {
    // Any chain of simple modifiers strips back to the field, with tokens
    // discovered rightmost-suffix first.
    #[test]
    fn simple_chains_round_trip(
        field in "[a-z_]{1,12}",
        mods in proptest::collection::vec("[a-z_]{1,8}", 0..4),
    ) {
        let mut header = field.clone();
        for m in &mods {
            header.push(':');
            header.push_str(m);
        }
        let (bare, tokens) = split_annotations(&header);
        prop_assert_eq!(bare, field);
        let mut expected = mods.clone();
        expected.reverse();
        prop_assert_eq!(tokens, expected);
    }

    #[test]
    fn parametrized_suffix_round_trips(
        field in "[a-z_]{1,12}",
        name in "[a-z_]{1,8}",
        param in "[a-z_]{1,8}",
    ) {
        let header = format!("{field}:{name}({param})");
        let (bare, tokens) = split_annotations(&header);
        prop_assert_eq!(bare, field);
        prop_assert_eq!(tokens, vec![format!("{name}({param})")]);
    }

    // Headers without a colon never produce tokens.
    #[test]
    fn colonless_headers_pass_through(header in "[a-zA-Z0-9_ ()]{0,20}") {
        prop_assume!(!header.contains(':'));
        let (bare, tokens) = split_annotations(&header);
        prop_assert_eq!(bare, header);
        prop_assert!(tokens.is_empty());
    }
}
