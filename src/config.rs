//! Site configuration for folio.
//! The configuration file is optional; every field falls back to the layout
//! folio expects by default (`content/`, `templates/`, `src/` into `dist/`).

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single navigation link shown on the landing page panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new<L: Into<String>, H: Into<String>>(label: L, href: H) -> Self {
        Self { label: label.into(), href: href.into() }
    }
}

/// Static content of the landing page's informational panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// `<title>` of the aggregate page
    pub title: String,
    /// Caption of the floating panel
    pub window_title: String,
    /// Free text shown inside the panel
    pub message: String,
    /// Links to sections of this site
    pub internal_links: Vec<NavLink>,
    /// Links to external profiles, opened in a new tab
    pub external_links: Vec<NavLink>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            window_title: "Website Navigation".to_string(),
            message: "Welcome to my website here you'll find nothing; here you'll find everything"
                .to_string(),
            internal_links: vec![
                NavLink::new("About Me", "/about/"),
                NavLink::new("Articles", "/articles/"),
                NavLink::new("All Projects", "/projects/"),
            ],
            external_links: vec![
                NavLink::new("Patents", "https://patents.justia.com/inventor/nikhil-b-lal"),
                NavLink::new("Papers", "https://scholar.google.com/citations?user=GLdoyI4AAAAJ"),
                NavLink::new("GitHub", "https://github.com/nikhilblal"),
            ],
        }
    }
}

/// Directory layout and landing page settings of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the content tree
    pub content_dir: PathBuf,
    /// Root of the generated output tree
    pub output_dir: PathBuf,
    /// Directory holding `<name>.html` page templates
    pub templates_dir: PathBuf,
    /// Root-level static files and the `assets/` folder
    pub static_dir: PathBuf,
    pub landing: LandingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("src"),
            landing: LandingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Loads the configuration of the site rooted at `site_root` and
    /// resolves every relative directory against it.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a configuration file exists but is invalid
    pub fn load<P: AsRef<Path>>(site_root: P) -> Result<Self> {
        let site_root = site_root.as_ref();
        let config = match load_config(site_root, &CONFIG_FILES)? {
            Some(content) => parse_config(&content)?,
            None => {
                debug!("No configuration file found, using defaults");
                SiteConfig::default()
            }
        };
        Ok(config.resolve(site_root))
    }

    /// Joins every relative directory onto `site_root`.
    pub fn resolve<P: AsRef<Path>>(mut self, site_root: P) -> Self {
        let site_root = site_root.as_ref();
        for dir in [
            &mut self.content_dir,
            &mut self.output_dir,
            &mut self.templates_dir,
            &mut self.static_dir,
        ] {
            if dir.is_relative() {
                *dir = site_root.join(&*dir);
            }
        }
        self
    }

    /// Directory holding one folder per project entry.
    pub fn projects_dir(&self) -> PathBuf {
        self.content_dir.join(crate::constants::PROJECTS_DIR)
    }
}

/// Reads the first configuration file found in `site_root`.
///
/// # Returns
/// * `Result<Option<String>>` - Contents of the first found configuration
///   file, `None` if the site has none
pub fn load_config<P: AsRef<Path>>(
    site_root: P,
    config_files: &[&str],
) -> Result<Option<String>> {
    for file in config_files {
        let config_path = site_root.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor YAML
pub fn parse_config(content: &str) -> Result<SiteConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}
