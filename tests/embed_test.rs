use folio::embed::{
    player_block, rewrite_shortcodes, EmbedRewriter, ImageRewrite, VideoHost, Vimeo, YouTube,
};
use folio::error::Error;

#[test]
fn test_shortcode_becomes_player() {
    let out = rewrite_shortcodes("Intro\n\n`youtube: XYZ`\n\nOutro");
    assert!(out.contains("<div class=\"video-embed\">"));
    assert!(out.contains("src=\"https://www.youtube.com/embed/XYZ\""));
    assert!(!out.contains("`youtube"));
    assert!(out.starts_with("Intro"));
    assert!(out.ends_with("Outro"));
}

#[test]
fn test_shortcode_without_space() {
    let out = rewrite_shortcodes("`youtube:a_b-C9`");
    assert!(out.contains("https://www.youtube.com/embed/a_b-C9"));
}

#[test]
fn test_malformed_shortcodes_stay_literal() {
    for input in ["`youtube: XYZ", "`youtube: bad id!`", "`vimeo: 123`", "youtube: XYZ"] {
        assert_eq!(rewrite_shortcodes(input), input);
    }
}

#[test]
fn test_youtube_watch_url() {
    let id = YouTube.video_id("https://www.youtube.com/watch?v=ABC123&t=10s").unwrap();
    assert_eq!(id, "ABC123");
}

#[test]
fn test_youtube_short_url() {
    assert!(YouTube.matches("https://youtu.be/dQw4w9WgXcQ?si=x"));
    assert_eq!(YouTube.video_id("https://youtu.be/dQw4w9WgXcQ?si=x").unwrap(), "dQw4w9WgXcQ");
}

#[test]
fn test_vimeo_url() {
    assert!(Vimeo.matches("https://vimeo.com/99999"));
    assert_eq!(Vimeo.video_id("https://vimeo.com/99999?share=copy").unwrap(), "99999");
    assert_eq!(Vimeo.player_url("99999"), "https://player.vimeo.com/video/99999");
}

#[test]
fn test_rewrite_youtube_image() {
    let rewriter = EmbedRewriter::default();
    match rewriter.rewrite_image("https://www.youtube.com/watch?v=ABC123", "Demo \"reel\"") {
        ImageRewrite::Embed(html) => {
            assert!(html.contains("https://www.youtube.com/embed/ABC123"));
            assert!(html.contains("title=\"Demo &quot;reel&quot;\""));
        }
        other => panic!("Expected embed, got {other:?}"),
    }
}

#[test]
fn test_rewrite_vimeo_image() {
    let rewriter = EmbedRewriter::default();
    match rewriter.rewrite_image("https://vimeo.com/99999", "clip") {
        ImageRewrite::Embed(html) => assert!(html.contains("player.vimeo.com/video/99999")),
        other => panic!("Expected embed, got {other:?}"),
    }
}

#[test]
fn test_plain_image_is_default() {
    let rewriter = EmbedRewriter::default();
    assert!(matches!(rewriter.rewrite_image("./photo.jpg", "photo"), ImageRewrite::Default));
}

#[test]
fn test_malformed_video_url_falls_back() {
    let rewriter = EmbedRewriter::default();
    for src in ["https://www.youtube.com/watch?v=", "https://vimeo.com/", "https://youtu.be/?x=1"] {
        match rewriter.rewrite_image(src, "broken") {
            ImageRewrite::Fallback(Error::RenderError { reference, .. }) => assert_eq!(reference, src),
            other => panic!("Expected fallback for {src}, got {other:?}"),
        }
    }
}

#[test]
fn test_custom_host_order() {
    let rewriter = EmbedRewriter::new(vec![Box::new(Vimeo)]);
    assert!(matches!(
        rewriter.rewrite_image("https://www.youtube.com/watch?v=ABC123", ""),
        ImageRewrite::Default
    ));
}

#[test]
fn test_youtube_url_without_scheme() {
    let rewriter = EmbedRewriter::default();
    for src in [
        "www.youtube.com/watch?v=ABC123",
        "//www.youtube.com/watch?v=ABC123",
        "youtube.com/watch?v=ABC123&list=PL1#t=5",
    ] {
        match rewriter.rewrite_image(src, "demo") {
            ImageRewrite::Embed(html) => {
                assert!(html.contains("https://www.youtube.com/embed/ABC123\""), "{src}")
            }
            other => panic!("Expected embed for {src}, got {other:?}"),
        }
    }
}

#[test]
fn test_youtube_v_parameter_anywhere_in_query() {
    assert_eq!(YouTube.video_id("https://www.youtube.com/watch?feature=share&v=XYZ").unwrap(), "XYZ");
}

#[test]
fn test_player_block_markup() {
    assert_eq!(
        player_block("https://player.vimeo.com/video/1", Some("<Reel> & more")),
        "<div class=\"video-embed\"><iframe src=\"https://player.vimeo.com/video/1\" frameborder=\"0\" allowfullscreen title=\"&lt;Reel&gt; &amp; more\"></iframe></div>"
    );
    assert_eq!(
        player_block("https://www.youtube.com/embed/X", None),
        "<div class=\"video-embed\"><iframe src=\"https://www.youtube.com/embed/X\" frameborder=\"0\" allowfullscreen></iframe></div>"
    );
}
