// Property tests for first-sentence extraction
// WHY: Descriptions are untrusted encyclopedic text, so the contract must hold for any input

use lede::first_sentence;
use proptest::prelude::*;

/// Fragments that exercise every atom kind and terminator rule
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Mr. ".to_string()),
        Just("e.g. ".to_string()),
        Just("U.S. ".to_string()),
        Just("A.B.C. ".to_string()),
        Just("... ".to_string()),
        Just("?! ".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("\"".to_string()),
        Just(". ".to_string()),
        Just("  ".to_string()),
        Just("\n".to_string()),
        "[A-Za-z0-9]{1,8}",
        "[ .!?a-zA-Z]{1,4}",
        "\\PC{1,3}",
    ]
}

fn paragraph() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_result_is_prefix(text in paragraph()) {
        let sentence = first_sentence(&text);
        prop_assert!(text.starts_with(sentence));
    }

    #[test]
    fn prop_result_is_prefix_of_arbitrary_strings(text in any::<String>()) {
        let sentence = first_sentence(&text);
        prop_assert!(text.starts_with(sentence));
        prop_assert_eq!(sentence.is_empty(), text.is_empty());
    }

    #[test]
    fn prop_non_empty_iff_input_non_empty(text in paragraph()) {
        prop_assert_eq!(first_sentence(&text).is_empty(), text.is_empty());
    }

    #[test]
    fn prop_idempotent(text in paragraph()) {
        let once = first_sentence(&text);
        prop_assert_eq!(first_sentence(once), once);
    }

    #[test]
    fn prop_no_terminators_returns_whole_input(text in "[^.!?]{0,80}") {
        prop_assert_eq!(first_sentence(&text), text.as_str());
    }

    #[test]
    fn prop_confirmed_sentence_ends_with_terminator(text in paragraph()) {
        let sentence = first_sentence(&text);
        if sentence.len() < text.len() {
            prop_assert!(sentence.ends_with(['.', '!', '?']), "cut at {:?}", sentence);
        }
    }
}
