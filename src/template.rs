//! Page template composition.
//! Merges rendered HTML and document metadata into a named MiniJinja
//! template loaded from the site's templates directory.

use crate::constants::TEMPLATE_EXTENSION;
use crate::document::DocumentRecord;
use crate::error::{Error, Result};
use minijinja::{path_loader, Environment, ErrorKind, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Trait for page template engines.
pub trait TemplateRenderer {
    /// Renders the template called `name` with the given context.
    ///
    /// # Errors
    /// * `Error::TemplateError` if no template has that name
    fn render(&self, name: &str, context: Value) -> Result<String>;
}

/// MiniJinja-based renderer reading `<name>.html` files from a directory.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer whose templates are loaded lazily from
    /// `templates_dir`.
    pub fn new<P: AsRef<Path>>(templates_dir: P) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_dir.as_ref()));
        Self { env }
    }

    /// Creates a renderer from in-memory `(name, source)` pairs.
    pub fn from_templates<I>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut env = Environment::new();
        for (name, source) in templates {
            env.add_template_owned(format!("{name}.{TEMPLATE_EXTENSION}"), source)?;
        }
        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, context: Value) -> Result<String> {
        let file_name = format!("{name}.{TEMPLATE_EXTENSION}");
        let template = self.env.get_template(&file_name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => Error::TemplateError(format!("unknown template '{name}'")),
            _ => Error::MinijinjaError(e),
        })?;
        Ok(template.render(context)?)
    }
}

/// Builds the template context of a page: `title`, `content` and every
/// other metadata field. The rendered HTML is marked safe so templates can
/// insert it with `{{ content }}`.
pub fn page_context(record: &DocumentRecord, html: String) -> Value {
    let mut context: BTreeMap<String, Value> = record
        .metadata
        .iter()
        .filter(|(key, _)| key.as_str() != "title" && key.as_str() != "content")
        .map(|(key, value)| (key.clone(), Value::from_serialize(value)))
        .collect();
    context.insert("title".to_string(), Value::from(record.title()));
    context.insert("content".to_string(), Value::from_safe_string(html));
    Value::from(context)
}

/// Renders a page through the template the document selects.
pub fn compose_page(renderer: &dyn TemplateRenderer, record: &DocumentRecord, html: String) -> Result<String> {
    renderer.render(&record.template(), page_context(record, html))
}
