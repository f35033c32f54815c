use folio::markdown::MarkdownRenderer;

#[test]
fn test_renders_basic_markdown() {
    let rendered = MarkdownRenderer::default().render("# Title\n\nSome *text*.\n");
    assert!(rendered.html.contains("<h1>Title</h1>"));
    assert!(rendered.html.contains("<em>text</em>"));
    assert!(rendered.fallbacks.is_empty());
}

#[test]
fn test_youtube_image_becomes_embed() {
    let body = "Look:\n\n![Demo reel](https://www.youtube.com/watch?v=ABC123)\n";
    let rendered = MarkdownRenderer::default().render(body);

    assert!(rendered.html.contains("https://www.youtube.com/embed/ABC123"));
    assert!(rendered.html.contains("title=\"Demo reel\""));
    assert!(!rendered.html.contains("<img"));
}

#[test]
fn test_vimeo_image_becomes_embed() {
    let rendered = MarkdownRenderer::default().render("![clip](https://vimeo.com/99999)");
    assert!(rendered.html.contains("https://player.vimeo.com/video/99999"));
    assert!(!rendered.html.contains("<img"));
}

#[test]
fn test_plain_image_is_unchanged() {
    let rendered = MarkdownRenderer::default().render("![A photo](./photo.jpg)");
    assert!(rendered.html.contains("<img src=\"./photo.jpg\" alt=\"A photo\" />"));
    assert!(!rendered.html.contains("video-embed"));
}

#[test]
fn test_image_order_is_preserved_around_embeds() {
    let body = "![one](a.png) ![two](https://youtu.be/XYZ) ![three](c.png)";
    let html = MarkdownRenderer::default().render(body).html;

    let a = html.find("a.png").unwrap();
    let embed = html.find("youtube.com/embed/XYZ").unwrap();
    let c = html.find("c.png").unwrap();
    assert!(a < embed && embed < c);
}

#[test]
fn test_malformed_video_url_falls_back_to_image() {
    let rendered = MarkdownRenderer::default().render("![broken](https://vimeo.com/)");
    assert!(rendered.html.contains("<img src=\"https://vimeo.com/\" alt=\"broken\" />"));
    assert_eq!(rendered.fallbacks.len(), 1);
}

#[test]
fn test_shortcode_rendered_as_raw_html() {
    let rendered = MarkdownRenderer::default().render("Before\n\n`youtube: XYZ`\n\nAfter\n");
    assert!(rendered.html.contains("<iframe src=\"https://www.youtube.com/embed/XYZ\""));
    assert!(!rendered.html.contains("<code>"));
    assert!(rendered.html.contains("<p>After</p>"));
}

#[test]
fn test_unclosed_shortcode_stays_code() {
    let rendered = MarkdownRenderer::default().render("`youtube: XYZ");
    assert!(!rendered.html.contains("iframe"));
    assert!(rendered.html.contains("youtube: XYZ"));
}

#[test]
fn test_raw_html_passes_through() {
    let rendered = MarkdownRenderer::default().render("<div class=\"note\">hi</div>\n");
    assert!(rendered.html.contains("<div class=\"note\">hi</div>"));
}

#[test]
fn test_youtube_image_without_scheme_becomes_embed() {
    let rendered = MarkdownRenderer::default().render("![demo](www.youtube.com/watch?v=ABC123)");
    assert!(rendered.html.contains("https://www.youtube.com/embed/ABC123"));
    assert!(!rendered.html.contains("<img"));
    assert!(rendered.fallbacks.is_empty());
}
