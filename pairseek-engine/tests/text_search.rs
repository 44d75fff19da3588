//! End-to-end tests for the text-based search path.

use pairseek_engine::{
    CompositeClass, DelimiterClass, DelimiterTarget, EngineError, FinderConfig, Offsets,
    PairRequest, SurroundingPair, SurroundingPairFinder, TextDocument,
};
use rstest::rstest;

fn find(
    text: &str,
    selection: (usize, usize),
    target: impl Into<DelimiterTarget>,
) -> Option<SurroundingPair> {
    find_with(text, selection, PairRequest::new(target))
}

fn find_with(text: &str, selection: (usize, usize), request: PairRequest) -> Option<SurroundingPair> {
    let finder = SurroundingPairFinder::new();
    let document = TextDocument::new(text);
    finder
        .find(&document, Offsets::new(selection.0, selection.1), &request)
        .expect("search should not error")
}

fn delimiters(pair: &SurroundingPair) -> (Offsets, Offsets) {
    (pair.offsets.left_delimiter, pair.offsets.right_delimiter)
}

#[test]
fn innermost_parens_around_selection() {
    let pair = find("foo(bar(baz)qux)", (8, 11), DelimiterClass::Parentheses).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(7, 8), Offsets::new(11, 12)));
}

#[test]
fn quotes_around_string_content() {
    let pair = find("\"hello\"", (1, 6), DelimiterClass::DoubleQuotes).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(0, 1), Offsets::new(6, 7)));
}

#[rstest]
#[case("a(b)c", (3, 4), (1, 2), (3, 4))] // on the closing paren
#[case("a(b)c", (1, 2), (1, 2), (3, 4))] // on the opening paren
#[case("a(b)c", (2, 2), (1, 2), (3, 4))] // empty selection inside
fn selection_touching_a_delimiter(
    #[case] text: &str,
    #[case] selection: (usize, usize),
    #[case] left: (usize, usize),
    #[case] right: (usize, usize),
) {
    let pair = find(text, selection, DelimiterClass::Parentheses).unwrap();
    assert_eq!(
        delimiters(&pair),
        (
            Offsets::new(left.0, left.1),
            Offsets::new(right.0, right.1)
        )
    );
}

#[test]
fn strong_containment_accepts_interior() {
    let request = PairRequest {
        require_strong_containment: true,
        ..PairRequest::new(DelimiterClass::Parentheses)
    };
    let pair = find_with("(x)", (1, 2), request).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(0, 1), Offsets::new(2, 3)));
}

#[test]
fn strong_containment_rejects_whole_pair_selection() {
    let request = PairRequest {
        require_strong_containment: true,
        ..PairRequest::new(DelimiterClass::Parentheses)
    };
    assert!(find_with("(x)", (0, 3), request).is_none());
}

#[test]
fn escaped_paren_is_not_a_delimiter() {
    // The backslash-escaped `)` must not close the pair early.
    let pair = find(r"(a\)b)", (4, 5), DelimiterClass::Parentheses).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(0, 1), Offsets::new(5, 6)));
}

#[test]
fn escaped_parentheses_class_matches_escaped_spellings() {
    let pair = find(r"\(x\)", (2, 3), DelimiterClass::EscapedParentheses).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(0, 2), Offsets::new(3, 5)));
}

#[test]
fn quote_between_two_strings_stays_in_the_first() {
    // The quote heuristic must not pair the closing quote of string one
    // with the opening quote of string two.
    let pair = find(r#""a" + "b""#, (1, 2), DelimiterClass::DoubleQuotes).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(0, 1), Offsets::new(2, 3)));
}

#[test]
fn quote_inference_resets_at_line_break() {
    let pair = find("\"a\n\"b\"", (4, 5), DelimiterClass::DoubleQuotes).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(3, 4), Offsets::new(5, 6)));
}

#[test]
fn composite_any_finds_nearest_class() {
    let pair = find("{[x]}", (2, 3), CompositeClass::Any).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(1, 2), Offsets::new(3, 4)));
}

#[test]
fn composite_string_finds_quotes() {
    let pair = find("'x'", (1, 2), CompositeClass::String).unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(0, 1), Offsets::new(2, 3)));
}

#[test]
fn pair_outside_initial_window_is_still_found() {
    // Both delimiters lie well outside the default 200-byte window around
    // the selection; the driver must regrow until they fit.
    let text = format!("({}x{})", "a".repeat(300), "b".repeat(300));
    let selection = (301, 302);
    let pair = find(&text, selection, DelimiterClass::Parentheses).unwrap();
    assert_eq!(
        delimiters(&pair),
        (Offsets::new(0, 1), Offsets::new(602, 603))
    );
}

#[test]
fn window_growth_matches_whole_document_scan() {
    let text = format!("({}x{})", "a".repeat(300), "b".repeat(300));
    let document = TextDocument::new(&text);
    let selection = Offsets::new(301, 302);
    let request = PairRequest::new(DelimiterClass::Parentheses);

    let grown = SurroundingPairFinder::new()
        .find(&document, selection, &request)
        .unwrap();
    let whole = SurroundingPairFinder::with_config(FinderConfig {
        initial_scan_length: text.len() * 2,
        max_scan_length: text.len() * 4,
        expansion_factor: 3,
    })
    .unwrap()
    .find(&document, selection, &request)
    .unwrap();

    assert_eq!(grown, whole);
}

#[test]
fn none_when_no_pair_surrounds_selection() {
    assert!(find("a(b)c", (0, 1), DelimiterClass::Parentheses).is_none());
    assert!(find("no delimiters", (3, 5), CompositeClass::Any).is_none());
}

#[test]
fn unsupported_delimiter_for_language_without_spellings() {
    let finder = SurroundingPairFinder::new();
    let document = TextDocument::new("\"\"\"x\"\"\"");
    let request = PairRequest::new(DelimiterClass::TripleDoubleQuotes);
    let result = finder.find(&document, Offsets::new(4, 5), &request);
    assert!(matches!(
        result,
        Err(EngineError::UnsupportedDelimiter { .. })
    ));
}

#[test]
fn python_triple_quotes_resolve_through_language_override() {
    let finder = SurroundingPairFinder::new();
    let document = TextDocument::with_language("\"\"\"doc\"\"\"", "python");
    let request = PairRequest::new(DelimiterClass::TripleDoubleQuotes);
    let pair = finder
        .find(&document, Offsets::new(4, 6), &request)
        .unwrap()
        .unwrap();
    assert_eq!(delimiters(&pair), (Offsets::new(0, 3), Offsets::new(6, 9)));
}

#[test]
fn repeated_searches_agree() {
    let text = "foo(bar(baz)qux)";
    let first = find(text, (8, 11), DelimiterClass::Parentheses);
    let second = find(text, (8, 11), DelimiterClass::Parentheses);
    assert_eq!(first, second);
}

#[test]
fn reported_ranges_cover_the_delimiters() {
    let document = TextDocument::new("ab\ncd(ef)g");
    let pair = SurroundingPairFinder::new()
        .find(
            &document,
            Offsets::new(6, 8),
            &PairRequest::new(DelimiterClass::Parentheses),
        )
        .unwrap()
        .unwrap();

    assert_eq!(document.slice(pair.offsets.left_delimiter), "(");
    assert_eq!(document.slice(pair.offsets.right_delimiter), ")");
    assert_eq!(pair.left_delimiter.start.line, 1);
    assert_eq!(pair.left_delimiter.start.character, 2);
    assert_eq!(pair.interior.start.character, 3);
    assert_eq!(pair.interior.end.character, 5);
}
