//! Video embed rewriting.
//!
//! Two transformations turn video references into player blocks:
//! - the shortcode pass rewrites `` `youtube: ID` `` tokens in the raw body
//!   before Markdown rendering;
//! - image interception inspects every image source during rendering and
//!   asks each [`VideoHost`] in order whether it recognizes the URL.

use crate::error::{Error, Result};
use maud::html;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use url::form_urlencoded;

static SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`youtube:\s*([a-zA-Z0-9_-]+)`").expect("valid regex"));

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"));

/// Builds the embeddable player block for a player URL. The block is a
/// single line so Markdown keeps it as one raw HTML block.
pub fn player_block(player_url: &str, title: Option<&str>) -> String {
    html! {
        div class="video-embed" {
            iframe src=(player_url) frameborder="0" allowfullscreen title=[title] {}
        }
    }
    .into_string()
}

fn youtube_player_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

/// Replaces every `` `youtube: ID` `` token with a player block.
/// Malformed tokens are left untouched.
pub fn rewrite_shortcodes(body: &str) -> Cow<'_, str> {
    SHORTCODE.replace_all(body, |caps: &regex::Captures| {
        player_block(&youtube_player_url(&caps[1]), None)
    })
}

fn validate_id(src: &str, candidate: Option<&str>) -> Result<String> {
    match candidate {
        Some(id) if VIDEO_ID.is_match(id) => Ok(id.to_string()),
        _ => Err(Error::RenderError {
            reference: src.to_string(),
            reason: "could not extract a video id".to_string(),
        }),
    }
}

/// A video hosting service whose URLs can be embedded as a player.
pub trait VideoHost {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether `src` points at this host.
    fn matches(&self, src: &str) -> bool;

    /// Extracts the video identifier from a matching URL.
    fn video_id(&self, src: &str) -> Result<String>;

    /// Player URL for an extracted identifier.
    fn player_url(&self, video_id: &str) -> String;
}

/// `youtube.com/watch?v=ID` and `youtu.be/ID`.
pub struct YouTube;

impl VideoHost for YouTube {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn matches(&self, src: &str) -> bool {
        src.contains("youtube.com/watch?v=") || src.contains("youtu.be/")
    }

    fn video_id(&self, src: &str) -> Result<String> {
        if let Some((_, rest)) = src.split_once("youtu.be/") {
            let segment = rest.split(['?', '#', '/']).next();
            return validate_id(src, segment);
        }

        // Sources may lack a scheme, so only the query string is parsed.
        let id = src
            .split_once('?')
            .map(|(_, rest)| rest.split('#').next().unwrap_or(rest))
            .and_then(|query| {
                form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            });
        validate_id(src, id.as_deref())
    }

    fn player_url(&self, video_id: &str) -> String {
        youtube_player_url(video_id)
    }
}

/// `vimeo.com/ID`.
pub struct Vimeo;

impl VideoHost for Vimeo {
    fn name(&self) -> &'static str {
        "vimeo"
    }

    fn matches(&self, src: &str) -> bool {
        src.contains("vimeo.com/")
    }

    fn video_id(&self, src: &str) -> Result<String> {
        let segment = src
            .split_once("vimeo.com/")
            .and_then(|(_, rest)| rest.split(['?', '#', '/']).next());
        validate_id(src, segment)
    }

    fn player_url(&self, video_id: &str) -> String {
        format!("https://player.vimeo.com/video/{video_id}")
    }
}

/// Outcome of offering an image token to the rewriter.
#[derive(Debug)]
pub enum ImageRewrite {
    /// Replace the image with this player block
    Embed(String),
    /// A host matched but the URL was malformed; render the image as-is
    Fallback(Error),
    /// No host matched; render the image as-is
    Default,
}

/// Ordered list of video hosts consulted for each image.
pub struct EmbedRewriter {
    hosts: Vec<Box<dyn VideoHost + Send + Sync>>,
}

impl EmbedRewriter {
    pub fn new(hosts: Vec<Box<dyn VideoHost + Send + Sync>>) -> Self {
        Self { hosts }
    }

    /// Decides how an image with source `src` and alt text `alt` renders.
    /// The first host whose pattern matches wins.
    pub fn rewrite_image(&self, src: &str, alt: &str) -> ImageRewrite {
        let Some(host) = self.hosts.iter().find(|host| host.matches(src)) else {
            return ImageRewrite::Default;
        };
        match host.video_id(src) {
            Ok(id) => ImageRewrite::Embed(player_block(&host.player_url(&id), Some(alt))),
            Err(err) => {
                log::debug!("{} url not embeddable: {}", host.name(), src);
                ImageRewrite::Fallback(err)
            }
        }
    }
}

impl Default for EmbedRewriter {
    fn default() -> Self {
        Self::new(vec![Box::new(YouTube), Box::new(Vimeo)])
    }
}
