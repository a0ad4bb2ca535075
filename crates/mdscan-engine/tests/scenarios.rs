use insta::assert_snapshot;
use mdscan_engine::tokenize;

fn tokens(source: &str) -> String {
    let doc = tokenize(source).unwrap();
    assert_eq!(doc.to_markdown(), source);
    doc.serialized().join("\n")
}

#[test]
fn atx_heading() {
    assert_snapshot!(tokens("# foo\n"), @r"
    [atx(1,1):1:0:]
    [text(1,3):foo: ]
    [end-atx::]
    ");
}

#[test]
fn atx_heading_with_closing_sequence() {
    assert_snapshot!(tokens("  ## foo ##  \n"), @r"
    [atx(1,3):2:2:  ]
    [text(1,6):foo: ]
    [end-atx:: ##  ]
    ");
}

#[test]
fn setext_wins_over_thematic_break() {
    assert_snapshot!(tokens("Foo\n---\nbar\n"), @r"
    [setext(1,1):-:3::::(2,1)]
    [text(1,1):Foo:]
    [end-setext::]
    [para(3,1):]
    [text(3,1):bar:]
    [end-para:::True]
    ");
}

#[test]
fn thematic_break_without_paragraph() {
    assert_snapshot!(tokens("---\n"), @"[tbreak(1,1):-::---]");
}

#[test]
fn lazy_line_continues_paragraph_in_nested_containers() {
    assert_snapshot!(tokens("> 1. item\n> more\nnot in quote\n"), @r"
    [block-quote(1,1):]
    [olist(1,3):.:1:5:]
    [para(1,6):]
    [text(1,6):item\nmore\nnot in quote:\n\n]
    [end-para:::True]
    [end-olist:::True]
    [end-block-quote:::True]
    ");
}

#[test]
fn nested_containers_close_before_new_block() {
    assert_snapshot!(tokens("> 1. item\n> more\n# not in quote\n"), @r"
    [block-quote(1,1):]
    [olist(1,3):.:1:5:]
    [para(1,6):]
    [text(1,6):item\nmore:\n]
    [end-para:::]
    [end-olist:::]
    [end-block-quote:::]
    [atx(3,1):1:0:]
    [text(3,3):not in quote: ]
    [end-atx::]
    ");
}

#[test]
fn unterminated_fence_is_forced_closed() {
    assert_snapshot!(tokens("```\ncode\n"), @r"
    [fcode-block(1,1):`:3::::]
    [text(2,1):code:]
    [end-fcode-block:::True]
    ");
}

#[test]
fn closed_fence_keeps_closing_line() {
    assert_snapshot!(tokens("~~~ rust\na\n ~~~~ \n"), @r"
    [fcode-block(1,1):~:3:rust: ::]
    [text(2,1):a:]
    [end-fcode-block: :~~~~ ]
    ");
}

#[test]
fn link_definition_is_not_a_setext_heading() {
    assert_snapshot!(tokens("[foo]: /url\n===\n"), @r"
    [link-ref-def(1,1)::foo:/url]
    [para(2,1):]
    [text(2,1):===:]
    [end-para:::True]
    ");
}

#[test]
fn link_definition_before_thematic_break() {
    assert_snapshot!(tokens("[foo]: /url\n---\n"), @r"
    [link-ref-def(1,1)::foo:/url]
    [tbreak(2,1):-::---]
    ");
}

#[test]
fn link_definitions_split_off_setext_heading() {
    assert_snapshot!(tokens("[A]: /a\n[b]:\n  /b 'c'\nHeading\n---\n"), @r"
    [link-ref-def(1,1)::a:/a]
    [link-ref-def(2,1)::b:/b:c]
    [setext(4,1):-:3::::(5,1)]
    [text(4,1):Heading:]
    [end-setext::]
    ");
}

#[test]
fn marker_without_space_is_not_a_list() {
    assert_snapshot!(tokens("-five"), @r"
    [para(1,1):]
    [text(1,1):-five:]
    [end-para:::True]
    ");
}

#[test]
fn tight_list() {
    assert_snapshot!(tokens("- a\n- b\n"), @r"
    [ulist(1,1):-::2:]
    [para(1,3):]
    [text(1,3):a:]
    [end-para:::]
    [li(2,1):2::]
    [para(2,3):]
    [text(2,3):b:]
    [end-para:::True]
    [end-ulist:::True]
    ");
}

#[test]
fn blank_between_items_makes_list_loose() {
    assert_snapshot!(tokens("- a\n\n- b\n"), @r"
    [ulist(1,1):-::2::loose]
    [para(1,3):]
    [text(1,3):a:]
    [end-para:::]
    [BLANK(2,1):]
    [li(3,1):2::]
    [para(3,3):]
    [text(3,3):b:]
    [end-para:::True]
    [end-ulist:::True]
    ");
}

#[test]
fn trailing_blank_line_keeps_list_tight() {
    let serialized = tokens("- a\n- b\n\n");
    assert!(serialized.starts_with("[ulist(1,1):-::2:]\n"));
}

#[test]
fn blank_after_empty_item_makes_list_loose() {
    let serialized = tokens("* a\n*\n\n* c\n");
    assert!(serialized.starts_with("[ulist(1,1):*::2::loose]\n"));
    assert_eq!(serialized.matches("[li(").count(), 2);

    let serialized = tokens("-\n\n- b\n");
    assert!(serialized.starts_with("[ulist(1,1):-::2::loose]\n"));
    assert_eq!(serialized.matches("[end-ulist").count(), 1);
}

#[test]
fn blank_after_empty_item_then_paragraph_stays_tight() {
    let serialized = tokens("-\n\nfoo\n");
    assert!(serialized.starts_with("[ulist(1,1):-::2:]\n"));
}

#[test]
fn unindented_line_after_blank_closes_list() {
    assert_snapshot!(tokens("1) a\n\nb\n"), @r"
    [olist(1,1):):1:3:]
    [para(1,4):]
    [text(1,4):a:]
    [end-para:::]
    [BLANK(2,1):]
    [end-olist:::]
    [para(3,1):]
    [text(3,1):b:]
    [end-para:::True]
    ");
}

#[test]
fn empty_item_cannot_hold_blank_line() {
    assert_snapshot!(tokens("-\n\n  foo\n"), @r"
    [ulist(1,1):-::2:]
    [BLANK(1,2):]
    [BLANK(2,1):]
    [end-ulist:::]
    [para(3,3):  ]
    [text(3,3):foo:  ]
    [end-para:::True]
    ");
}

#[test]
fn different_bullet_starts_new_list() {
    let serialized = tokens("- a\n+ b\n");
    let names: Vec<&str> = serialized
        .lines()
        .filter(|t| t.starts_with("[ulist") || t.starts_with("[end-ulist"))
        .collect();
    assert_eq!(
        names,
        [
            "[ulist(1,1):-::2:]",
            "[end-ulist:::]",
            "[ulist(2,1):+::2:]",
            "[end-ulist:::True]"
        ]
    );
}

#[test]
fn indented_code_keeps_interior_blank_lines() {
    assert_snapshot!(tokens("    a\n\n    b\n\n"), @r"
    [icode-block(1,5):    ]
    [text(1,5):a\n\nb:    \n\n    ]
    [end-icode-block:::True]
    [BLANK(4,1):]
    ");
}

#[test]
fn four_spaces_cannot_interrupt_paragraph() {
    assert_snapshot!(tokens("a\n    b\n"), @r"
    [para(1,1):]
    [text(1,1):a\nb:\n    ]
    [end-para:::True]
    ");
}

#[test]
fn html_block_runs_to_blank_line() {
    assert_snapshot!(tokens("<div>\n*x*\n\nafter\n"), @r"
    [html-block(1,1):6]
    [text(1,1):<div>\n*x*:\n]
    [end-html-block:::]
    [BLANK(3,1):]
    [para(4,1):]
    [text(4,1):after:]
    [end-para:::True]
    ");
}

#[test]
fn tab_after_block_quote_marker() {
    assert_snapshot!(tokens(">\t\tfoo\n"), @r"
    [block-quote(1,1):]
    [icode-block(1,3):\t]
    [text(1,3):\tfoo:\t]
    [end-icode-block:::True]
    [end-block-quote:::True]
    ");
}
