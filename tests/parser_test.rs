use email_import::*;
use std::path::PathBuf;

fn body(metadata: &str, content: &str) -> String {
    format!(
        "-----BEGIN IMPORT BLOCK-----\n{metadata}\n-----BEGIN CONTENT BLOCK-----\n{content}\n-----END CONTENT/IMPORT BLOCK-----"
    )
}

// --- parse_block ---

#[test]
fn test_parse_article() {
    let text = body("type: article\ncategory: tech\n", "hello");
    let block = parse_block(&text).unwrap();

    assert_eq!(block.metadata.get("type"), Some("article"));
    assert_eq!(block.metadata.get("category"), Some("tech"));
    assert_eq!(block.metadata.len(), 2);
    assert_eq!(block.content, "hello\r\n");
}

#[test]
fn test_parse_keeps_blank_content_lines() {
    let text = body("type: comment", "date: 2015-11-20T21:52+08:00\nauthor: testauth\n\nawesome");
    let block = parse_block(&text).unwrap();

    assert_eq!(
        block.content,
        "date: 2015-11-20T21:52+08:00\r\nauthor: testauth\r\n\r\nawesome\r\n"
    );
    assert!(!block.metadata.contains("author"));
}

#[test]
fn test_parse_delimiters_case_insensitive() {
    let text = "  -----begin import block-----  \r\n\
                type: page\r\n\
                -----Begin Content Block-----\r\n\
                body\r\n\
                \t-----end content/import block-----\r\n";
    let block = parse_block(text).unwrap();

    assert_eq!(block.metadata.get("type"), Some("page"));
    assert_eq!(block.content, "body\r\n");
}

#[test]
fn test_parse_ignores_text_around_blocks() {
    let text = format!("Hi,\nplease import this:\n\n{}\n\n-- \nsignature", body("type: page", "x"));
    let block = parse_block(&text).unwrap();
    assert_eq!(block.content, "x\r\n");
}

#[test]
fn test_parse_keys_lowercased_values_trimmed() {
    let text = body("  Type :  Article  \nCATEGORY:Tech", "x");
    let block = parse_block(&text).unwrap();

    assert_eq!(block.metadata.get("type"), Some("Article"));
    assert_eq!(block.metadata.get("category"), Some("Tech"));
}

#[test]
fn test_parse_value_with_colon() {
    let text = body("type: comment\ndate: 2015-11-20T21:52", "x");
    let block = parse_block(&text).unwrap();
    assert_eq!(block.metadata.get("date"), Some("2015-11-20T21:52"));
}

#[test]
fn test_parse_duplicate_key_last_wins() {
    let text = body("type: page\ntype: article", "x");
    let block = parse_block(&text).unwrap();
    assert_eq!(block.metadata.get("type"), Some("article"));
}

#[test]
fn test_parse_skips_invalid_metadata_line() {
    let text = body("type: page\nthis line has no separator\nslug: a", "x");
    let block = parse_block(&text).unwrap();
    assert_eq!(block.metadata.len(), 2);
    assert_eq!(block.metadata.get("slug"), Some("a"));
}

#[test]
fn test_parse_empty_content() {
    let text = "-----BEGIN IMPORT BLOCK-----\ntype: page\n-----BEGIN CONTENT BLOCK-----\n-----END CONTENT/IMPORT BLOCK-----";
    let block = parse_block(text).unwrap();
    assert_eq!(block.content, "");
}

#[test]
fn test_parse_missing_end() {
    let text = "-----BEGIN IMPORT BLOCK-----\ntype: article\ncategory: tech\n-----BEGIN CONTENT BLOCK-----\nhello";
    assert!(matches!(parse_block(text), Err(Rejection::NoBlock)));
}

#[test]
fn test_parse_missing_content_block() {
    let text = "-----BEGIN IMPORT BLOCK-----\ntype: article\n-----END CONTENT/IMPORT BLOCK-----";
    assert!(matches!(parse_block(text), Err(Rejection::NoBlock)));
}

#[test]
fn test_parse_regular_email() {
    let err = parse_block("Hello Bob,\nsee you tomorrow.").unwrap_err();
    assert!(matches!(err, Rejection::NoBlock));
    assert!(err.is_routine());
}

#[test]
fn test_parse_requires_exact_dash_count() {
    let text = "----BEGIN IMPORT BLOCK-----\ntype: page\n-----BEGIN CONTENT BLOCK-----\nx\n-----END CONTENT/IMPORT BLOCK-----";
    assert!(matches!(parse_block(text), Err(Rejection::NoBlock)));
}

#[test]
fn test_parse_stops_at_first_end() {
    let text = format!(
        "{}\n-----BEGIN IMPORT BLOCK-----\ntype: other\n",
        body("type: page", "kept")
    );
    let block = parse_block(&text).unwrap();
    assert_eq!(block.metadata.get("type"), Some("page"));
    assert_eq!(block.content, "kept\r\n");
}

// --- validate ---

#[test]
fn test_validate_article() {
    let block = parse_block(&body("type: Article\ncategory: tech", "hello")).unwrap();
    let route = validate(block, &Settings::default()).unwrap();

    assert_eq!(route.kind, "article");
    assert_eq!(route.metadata.get("type"), Some("article"));
    assert_eq!(route.relative_dir, PathBuf::from("articles/tech"));
    assert_eq!(route.content, "hello\r\n");
}

#[test]
fn test_validate_missing_type() {
    let block = parse_block(&body("category: tech", "x")).unwrap();
    assert!(matches!(
        validate(block, &Settings::default()),
        Err(Rejection::MissingType)
    ));
}

#[test]
fn test_validate_unknown_type() {
    let block = parse_block(&body("type: foobar", "x")).unwrap();
    match validate(block, &Settings::default()) {
        Err(Rejection::UnknownType(kind)) => assert_eq!(kind, "foobar"),
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn test_validate_missing_field() {
    let block = parse_block(&body("type: article\nfilename: a.md", "x")).unwrap();
    match validate(block, &Settings::default()) {
        Err(Rejection::MissingField { kind, field }) => {
            assert_eq!(kind, "article");
            assert_eq!(field, "category");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_parent_components() {
    let block = parse_block(&body("type: article\ncategory: ../../../escaped", "x")).unwrap();
    match validate(block, &Settings::default()) {
        Err(Rejection::InvalidPath { kind, path }) => {
            assert_eq!(kind, "article");
            assert_eq!(path, PathBuf::from("articles/../../../escaped"));
        }
        other => panic!("expected InvalidPath, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_absolute_path() {
    let settings = Settings::default().with_type("raw", TypeRule::new("/{dir}", FilenameRule::Metadata));
    let block = parse_block(&body("type: raw\ndir: etc", "x")).unwrap();
    assert!(matches!(
        validate(block, &settings),
        Err(Rejection::InvalidPath { .. })
    ));
}

#[test]
fn test_validate_allows_current_dir_components() {
    let settings = Settings::default().with_type("flat", TypeRule::new("./{dir}", FilenameRule::Metadata));
    let block = parse_block(&body("type: flat\ndir: notes", "x")).unwrap();
    let route = validate(block, &settings).unwrap();
    assert_eq!(route.relative_dir, PathBuf::from("./notes"));
}

// --- render_template ---

#[test]
fn test_render_template() {
    let metadata: Metadata = [("slug", "my-post"), ("category", "tech")].into_iter().collect();
    assert_eq!(
        render_template("comments/{category}/{slug}", &metadata).unwrap(),
        "comments/tech/my-post"
    );
}

#[test]
fn test_render_template_escaped_braces() {
    let metadata: Metadata = [("slug", "a")].into_iter().collect();
    assert_eq!(render_template("x{{y}}/{slug}", &metadata).unwrap(), "x{y}/a");
}

#[test]
fn test_render_template_reports_first_missing() {
    let metadata = Metadata::new();
    assert_eq!(
        render_template("{year}/{month}", &metadata).unwrap_err(),
        "year"
    );
}
