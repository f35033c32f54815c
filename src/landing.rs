//! Aggregate landing page: an image grid linking to every project plus a
//! fixed navigation panel.

use crate::config::{LandingConfig, NavLink};
use crate::constants::OUTPUT_INDEX_FILE;
use crate::error::Result;
use crate::indexer::ProjectEntry;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::{Path, PathBuf};

const GRID_STYLE: &str = "\
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: system-ui, sans-serif; }
    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); }
    .grid img, .grid video { width: 100%; height: 200px; object-fit: cover; display: block; }
    .grid a { display: block; }
    .floating-window { position: fixed; left: 50px; top: 50px; width: 300px; z-index: 1000; }";

/// Number of tiles the landing page shows for `entries`.
pub fn tile_count(entries: &[ProjectEntry]) -> usize {
    entries.iter().map(|entry| entry.images.len()).sum()
}

fn head(config: &LandingConfig) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            title { (config.title) }
            style { (PreEscaped(GRID_STYLE)) }
        }
    }
}

/// One tile per image, each linking to its project page.
fn grid(entries: &[ProjectEntry]) -> Markup {
    html! {
        div class="grid" {
            @for entry in entries {
                @for image in &entry.images {
                    a href=(entry.url) {
                        img src=(image) alt=(entry.title) loading="lazy";
                    }
                }
            }
        }
    }
}

fn link_group(label: &str, links: &[NavLink], external: bool) -> Markup {
    html! {
        div class="button-group" {
            div class="button-group-label" { (label) ":" }
            div class="button-row" {
                @for link in links {
                    a href=(link.href) class="nav-button" target=[external.then_some("_blank")] {
                        (link.label)
                    }
                }
            }
        }
    }
}

fn panel(config: &LandingConfig) -> Markup {
    html! {
        div class="floating-window" {
            div class="window-header" {
                span class="window-title" { (config.window_title) }
            }
            div class="window-content" {
                div class="dialog-text" { (config.message) }
                (link_group("Internal", &config.internal_links, false))
                (link_group("External", &config.external_links, true))
            }
        }
    }
}

/// Renders the landing page. Each image of each project becomes one tile
/// linking to the project page, in index order.
pub fn render_landing_page(entries: &[ProjectEntry], config: &LandingConfig) -> String {
    html! {
        (DOCTYPE)
        html {
            (head(config))
            body {
                (grid(entries))
                (panel(config))
            }
        }
    }
    .into_string()
}

/// Writes the landing page to `output_dir/index.html`.
///
/// # Returns
/// * `Result<PathBuf>` - Path of the written page
pub fn write_landing_page(
    output_dir: &Path,
    entries: &[ProjectEntry],
    config: &LandingConfig,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(OUTPUT_INDEX_FILE);
    fs::write(&path, render_landing_page(entries, config))?;
    Ok(path)
}
