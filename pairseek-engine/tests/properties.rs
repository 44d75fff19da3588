//! Property tests over arbitrary bracket soup.

use pairseek_engine::{
    CompositeClass, DelimiterClass, Offsets, PairRequest, SurroundingPairFinder, TextDocument,
};
use proptest::prelude::*;

fn bracket_soup() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r"[a-z(){}\[\] \n]{0,80}").expect("valid generator regex")
}

proptest! {
    /// Any pair reported for a cursor position surrounds that position and
    /// consists of matching spellings of one class.
    #[test]
    fn found_pair_surrounds_the_selection(text in bracket_soup(), pos in 0usize..=80) {
        let document = TextDocument::new(&text);
        let offset = pos.min(text.len());
        let selection = Offsets::new(offset, offset);
        let request = PairRequest::new(CompositeClass::CollectionBoundary);

        let found = SurroundingPairFinder::new()
            .find(&document, selection, &request)
            .expect("valid selection");
        if let Some(pair) = found {
            let left = pair.offsets.left_delimiter;
            let right = pair.offsets.right_delimiter;
            prop_assert!(left.start <= offset);
            prop_assert!(right.end >= offset);
            prop_assert!(left.end <= right.start);

            let spellings = (document.slice(left), document.slice(right));
            prop_assert!(
                [("(", ")"), ("[", "]"), ("{", "}")].contains(&spellings),
                "unexpected pair {spellings:?}"
            );
        }
    }

    /// Running the same search twice gives the same answer.
    #[test]
    fn search_is_deterministic(text in bracket_soup(), pos in 0usize..=80) {
        let document = TextDocument::new(&text);
        let offset = pos.min(text.len());
        let selection = Offsets::new(offset, offset);
        let request = PairRequest::new(CompositeClass::Any);

        let finder = SurroundingPairFinder::new();
        let first = finder.find(&document, selection, &request).expect("valid selection");
        let second = finder.find(&document, selection, &request).expect("valid selection");
        prop_assert_eq!(first, second);
    }

    /// In perfectly nested parens the innermost pair always wins.
    #[test]
    fn innermost_pair_in_nested_parens(depth in 1usize..12) {
        let text = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        let document = TextDocument::new(&text);
        let selection = Offsets::new(depth, depth + 1);

        let pair = SurroundingPairFinder::new()
            .find(&document, selection, &PairRequest::new(DelimiterClass::Parentheses))
            .expect("valid selection")
            .expect("surrounded selection");
        prop_assert_eq!(pair.offsets.left_delimiter, Offsets::new(depth - 1, depth));
        prop_assert_eq!(pair.offsets.right_delimiter, Offsets::new(depth + 1, depth + 2));
    }
}
