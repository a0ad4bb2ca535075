use mdscan_engine::{BlockKind, TokenKind, tokenize, verify_token_stream};
use pretty_assertions::assert_eq;
use rstest::rstest;

const DOCUMENTS: &[&str] = &[
    "",
    "\n\n\n",
    "# Title\n\nSome *text* here.\n",
    "Setext\n======\n\nAnother\n---\n",
    "> quote\n> > nested\n> back\nlazy\n",
    "- a\n- b\n\n  continued\n- c\n",
    "1. one\n2. two\n10. ten\n",
    "* a\n  * b\n    * c\n  * d\n* e\n",
    "- a\n\n\n- b\n",
    "-\n  foo\n-\n\n  bar\n",
    "```\ncode\n```\n\n~~~~ info string\n~~~\n~~~~\n",
    "- ```\n  in list\n  ```\n- after\n",
    "> ```\n> quoted fence\n\noutside\n",
    "    indented\n\t tab\n\n      more\n",
    "<!-- comment\nstill\n-->\n<div>\n\n<custom-tag>\n",
    "a\n***\nb\n___\n",
    "\tfoo\tbaz\t\tbim\n",
    " - foo\n   - bar\n\t - baz\n",
    ">\t\tfoo\n",
    "-\t\tfoo\n",
    "1.  A paragraph\n    with two lines.\n\n        indented code\n\n    > A block quote.\n",
    "> - a\n>\n> - b\n",
    "- a\n  > b\n  ```\n  c\n  ```\n- d\n",
    "line one  \nline two\\\nline three\n",
    "# heading #\n#5 bolt\n####### seven\n",
    "Foo\n    ---\n",
    "   > indented quote\n    > code\n",
    "no trailing newline",
    "trailing spaces   \n   \n",
    "émoji 🚀 `code` ünïcode\n> ñ\n",
    "[foo]: /url \"title\"  \n[Bar]:\n  <b c>\n  'd'\ntext [foo]\n",
    "> [q]: /q\n> ===\n- [r]: /r\n  ---\n",
];

#[test]
fn every_document_regenerates_exactly() {
    for source in DOCUMENTS {
        let doc = tokenize(source).unwrap();
        assert_eq!(doc.to_markdown(), *source, "source: {source:?}");
        assert_eq!(doc.line_count(), source.lines().count(), "source: {source:?}");
    }
}

#[test]
fn tokenizing_is_idempotent() {
    for source in DOCUMENTS {
        let first = tokenize(source).unwrap();
        let second = tokenize(&first.to_markdown()).unwrap();
        assert_eq!(first, second, "source: {source:?}");
    }
}

#[test]
fn every_stream_is_balanced() {
    for source in DOCUMENTS {
        let doc = tokenize(source).unwrap();
        assert_eq!(verify_token_stream(&doc.tokens), Ok(()), "source: {source:?}");

        let opens = doc
            .tokens
            .iter()
            .filter(|t| t.kind.opens_block().is_some_and(BlockKind::is_container))
            .count();
        let ends = doc
            .tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::End { block, .. } if block.is_container()))
            .count();
        assert_eq!(opens, ends, "source: {source:?}");
    }
}

#[rstest]
#[case("   x", "para")]
#[case("    x", "icode-block")]
#[case("   # x", "atx")]
#[case("    # x", "icode-block")]
#[case("   ```", "fcode-block")]
#[case("   ---", "tbreak")]
#[case("   > x", "block-quote")]
#[case("   - x", "ulist")]
fn indentation_threshold(#[case] source: &str, #[case] first: &str) {
    let doc = tokenize(source).unwrap();
    assert_eq!(doc.tokens[0].name(), first);
}

#[test]
fn positions_are_one_based_characters() {
    let doc = tokenize("> é\n").unwrap();
    let text = doc.tokens.iter().find(|t| t.is_text()).unwrap();
    assert_eq!((text.line_number(), text.column_number()), (1, 3));
}

#[test]
fn end_tokens_are_forced_only_at_end_of_input() {
    let doc = tokenize("> a\n\nb").unwrap();
    let forced: Vec<String> = doc
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::End { was_forced: true, .. }))
        .map(ToString::to_string)
        .collect();
    assert_eq!(forced, ["[end-para:::True]"]);
}
