use folio::document::parse_document;
use folio::error::Error;
use folio::template::{compose_page, page_context, MiniJinjaRenderer, TemplateRenderer};
use std::fs;
use tempfile::TempDir;

fn renderer() -> MiniJinjaRenderer {
    MiniJinjaRenderer::from_templates([
        (
            "page".to_string(),
            "<title>{{ title }}</title><main>{{ content }}</main>".to_string(),
        ),
        (
            "project".to_string(),
            "<h1>{{ title }}</h1><p>{{ year }}</p>{{ content }}".to_string(),
        ),
    ])
    .unwrap()
}

#[test]
fn test_default_template_and_title() {
    let record = parse_document("notes.md", "body").unwrap();
    let html = compose_page(&renderer(), &record, "<p>body</p>".to_string()).unwrap();
    assert_eq!(html, "<title>Untitled</title><main><p>body</p></main>");
}

#[test]
fn test_selected_template_sees_metadata() {
    let record =
        parse_document("p.md", "---\ntitle: Lamp\ntemplate: project\nyear: 2021\n---\n").unwrap();
    let html = compose_page(&renderer(), &record, "<img src=\"a.png\">".to_string()).unwrap();
    assert_eq!(html, "<h1>Lamp</h1><p>2021</p><img src=\"a.png\">");
}

#[test]
fn test_title_is_escaped_but_content_is_not() {
    let record = parse_document("p.md", "---\ntitle: Fish & Chips\n---\n").unwrap();
    let html = compose_page(&renderer(), &record, "<em>x</em>".to_string()).unwrap();
    assert!(html.contains("Fish &amp; Chips"));
    assert!(html.contains("<em>x</em>"));
}

#[test]
fn test_metadata_cannot_override_content() {
    let record = parse_document("p.md", "---\ncontent: sneaky\n---\n").unwrap();
    let html = compose_page(&renderer(), &record, "real".to_string()).unwrap();
    assert!(html.contains("<main>real</main>"));
}

#[test]
fn test_unknown_template_is_template_error() {
    let record = parse_document("p.md", "---\ntemplate: gallery\n---\n").unwrap();
    let result = compose_page(&renderer(), &record, String::new());
    match result {
        Err(Error::TemplateError(message)) => assert!(message.contains("gallery")),
        other => panic!("Expected TemplateError, got {other:?}"),
    }
}

#[test]
fn test_templates_load_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("page.html"), "[{{ title }}]{{ content }}").unwrap();

    let renderer = MiniJinjaRenderer::new(temp_dir.path());
    let record = parse_document("a.md", "---\ntitle: About\n---\n").unwrap();
    let html = renderer.render("page", page_context(&record, "<p>hi</p>".to_string())).unwrap();
    assert_eq!(html, "[About]<p>hi</p>");
}

#[test]
fn test_missing_templates_directory_fails_per_page() {
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new(temp_dir.path().join("missing"));
    let record = parse_document("a.md", "").unwrap();
    assert!(matches!(
        compose_page(&renderer, &record, String::new()),
        Err(Error::TemplateError(_))
    ));
}
