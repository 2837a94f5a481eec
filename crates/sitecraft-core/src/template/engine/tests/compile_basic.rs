//! Basic resolution tests: raw HTML, includes and provenance markers

use super::helpers::{compile_in, site, strip_markers};
use super::*;
use std::fs;

#[test]
fn test_raw_html_passes_through() {
    let temp = site(&[]);
    let html = compile_in(temp.path(), "<p>Hello</p>").unwrap();
    assert_eq!(html, "<p>Hello</p>");
}

#[test]
fn test_unknown_directive_is_kept_verbatim() {
    let temp = site(&[]);
    let html = compile_in(temp.path(), "<p>{{ future thing }}</p>").unwrap();
    assert_eq!(html, "<p>{{ future thing }}</p>");
}

#[test]
fn test_include_is_inlined_with_markers() {
    let temp = site(&[("components/nav.html", "<nav>Home</nav>")]);
    let html = compile_in(
        temp.path(),
        r#"<body>{{ include "components/nav.html" }}</body>"#,
    )
    .unwrap();

    assert_eq!(
        html,
        concat!(
            "<body>",
            r#"<!-- __TP_INC__ file="templates/index.html" token_index="1" -->"#,
            "<nav>Home</nav>",
            "<!-- __TP_END_INC__ -->",
            "</body>"
        )
    );
}

#[test]
fn test_include_paths_are_relative_to_project_root() {
    let temp = site(&[
        ("components/card.html", r#"<div>{{ include "./components/icon.html" }}</div>"#),
        ("components/icon.html", "<i></i>"),
    ]);
    let html = compile_in(temp.path(), r#"{{ include "components/card.html" }}"#).unwrap();
    assert_eq!(strip_markers(&html), "<div><i></i></div>");
}

#[test]
fn test_nested_marker_uses_logical_path_of_includer() {
    let temp = site(&[
        ("components/card.html", r#"A{{ include "./components/icon.html" }}"#),
        ("components/icon.html", "<i></i>"),
    ]);
    let html = compile_in(temp.path(), r#"{{ include "./components/card.html" }}"#).unwrap();
    assert!(html.contains(r#"file="templates/index.html" token_index="0""#));
    assert!(html.contains(r#"file="components/card.html" token_index="1""#));
}

#[test]
fn test_bare_and_single_quoted_include_paths() {
    let temp = site(&[("a.html", "A"), ("b.html", "B")]);
    let html = compile_in(temp.path(), "{{ include ./a.html }}{{ include 'b.html' }}").unwrap();
    assert_eq!(strip_markers(&html), "AB");
}

#[test]
fn test_leading_slash_is_project_relative() {
    let temp = site(&[("components/x.html", "X")]);
    let html = compile_in(temp.path(), r#"{{ include "/components/x.html" }}"#).unwrap();
    assert_eq!(strip_markers(&html), "X");
}

#[test]
fn test_same_include_twice() {
    let temp = site(&[("hr.html", "<hr>")]);
    let html = compile_in(temp.path(), r#"{{ include "hr.html" }}|{{ include "hr.html" }}"#)
        .unwrap();
    assert_eq!(strip_markers(&html), "<hr>|<hr>");
    assert!(html.contains(r#"token_index="0""#));
    assert!(html.contains(r#"token_index="2""#));
}

#[test]
fn test_stray_block_directives_produce_nothing() {
    let temp = site(&[]);
    let html = compile_in(
        temp.path(),
        r#"a{{ block "x" }}b{{ endblock }}c{{ endlayout }}d"#,
    )
    .unwrap();
    assert_eq!(html, "abcd");
}

#[test]
fn test_slot_without_layout_is_empty() {
    let temp = site(&[]);
    let html = compile_in(temp.path(), r#"<title>{{ slot "title" }}</title>"#).unwrap();
    assert_eq!(html, "<title></title>");
}

#[test]
fn test_compile_free_function() {
    let temp = site(&[("p.html", "partial")]);
    let tokens = tokenize(r#"[{{ include "p.html" }}]"#);
    let html = compile(&tokens, temp.path(), "templates/page.html").unwrap();
    assert!(html.starts_with(r#"[<!-- __TP_INC__ file="templates/page.html" token_index="1" -->"#));
    assert!(html.ends_with("partial<!-- __TP_END_INC__ -->]"));
}

#[test]
fn test_compiler_is_reusable_across_files() {
    let temp = site(&[("p.html", "P")]);
    let compiler = Compiler::new(temp.path()).unwrap();
    let first = compiler.compile_source(r#"{{ include "p.html" }}"#, "templates/a.html").unwrap();
    let second = compiler.compile_source(r#"{{ include "p.html" }}"#, "templates/a.html").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_include_with_invalid_utf8_is_decoded_lossily() {
    let temp = site(&[]);
    fs::write(temp.path().join("latin1.html"), b"<p>caf\xe9</p>").unwrap();

    let html = compile_in(temp.path(), r#"{{ include "latin1.html" }}"#).unwrap();
    assert_eq!(strip_markers(&html), "<p>caf\u{FFFD}</p>");
}

#[test]
fn test_read_source_keeps_valid_utf8() {
    let temp = site(&[("ok.html", "<p>café</p>")]);
    assert_eq!(read_source(&temp.path().join("ok.html")).unwrap(), "<p>café</p>");
    assert!(read_source(&temp.path().join("missing.html")).is_err());
}
