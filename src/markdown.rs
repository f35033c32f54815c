//! Markdown rendering with video embed interception.

use crate::embed::{rewrite_shortcodes, EmbedRewriter, ImageRewrite};
use crate::error::Error;
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// HTML produced for one document body.
#[derive(Debug)]
pub struct RenderedMarkup {
    pub html: String,
    /// Video references that fell back to plain image rendering
    pub fallbacks: Vec<Error>,
}

/// Markdown renderer that routes every image token through an
/// [`EmbedRewriter`] before falling back to standard image output.
pub struct MarkdownRenderer {
    options: Options,
    embeds: EmbedRewriter,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(EmbedRewriter::default())
    }
}

impl MarkdownRenderer {
    pub fn new(embeds: EmbedRewriter) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        Self { options, embeds }
    }

    /// Renders a document body: shortcodes first, then Markdown.
    pub fn render(&self, body: &str) -> RenderedMarkup {
        let body = rewrite_shortcodes(body);
        let mut fallbacks = Vec::new();
        let events = self.intercept_images(Parser::new_ext(&body, self.options), &mut fallbacks);

        let mut html_out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut html_out, events.into_iter());
        RenderedMarkup { html: html_out, fallbacks }
    }

    fn intercept_images<'a>(
        &self,
        parser: Parser<'a>,
        fallbacks: &mut Vec<Error>,
    ) -> Vec<Event<'a>> {
        let mut out = Vec::new();
        // Events of the image currently being read, start tag included.
        let mut pending: Vec<Event<'a>> = Vec::new();
        let mut depth = 0usize;

        for event in parser {
            match event {
                Event::Start(Tag::Image { .. }) => {
                    depth += 1;
                    pending.push(event);
                }
                Event::End(TagEnd::Image) if depth > 0 => {
                    depth -= 1;
                    pending.push(event);
                    if depth == 0 {
                        let image = std::mem::take(&mut pending);
                        out.extend(self.rewrite_image(image, fallbacks));
                    }
                }
                _ if depth > 0 => pending.push(event),
                _ => out.push(event),
            }
        }
        out.extend(pending);
        out
    }

    fn rewrite_image<'a>(&self, image: Vec<Event<'a>>, fallbacks: &mut Vec<Error>) -> Vec<Event<'a>> {
        let src = match image.first() {
            Some(Event::Start(Tag::Image { dest_url, .. })) => dest_url.to_string(),
            _ => return image,
        };
        let alt = alt_text(&image[1..]);

        match self.embeds.rewrite_image(&src, &alt) {
            ImageRewrite::Embed(block) => vec![Event::Html(block.into())],
            ImageRewrite::Fallback(err) => {
                fallbacks.push(err);
                image
            }
            ImageRewrite::Default => image,
        }
    }
}

/// Plain text of the events nested inside an image tag.
fn alt_text(events: &[Event<'_>]) -> String {
    let mut alt = String::new();
    for event in events {
        match event {
            Event::Text(text) | Event::Code(text) => alt.push_str(text),
            Event::SoftBreak | Event::HardBreak => alt.push(' '),
            _ => {}
        }
    }
    alt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_text_joins_inline_parts() {
        let parser = Parser::new("![a `b` c](x.png)");
        let events: Vec<_> = parser.collect();
        // paragraph start, image start, ..., image end, paragraph end
        assert_eq!(alt_text(&events), "a b c");
    }
}
