//! Tera page templates, compiled once at startup.

use tera::{Context, Tera};
use tracing::{debug, error};

use clinic_shared::error::AppError;

/// Page templates, registered under their file names so `.html`
/// autoescaping applies.
const TEMPLATES: [(&str, &str); 3] = [
    ("console.html", include_str!("../templates/console.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("site.html", include_str!("../templates/site.html")),
];

/// Renders the server-side HTML pages.
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Compile the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns the Tera error if a template fails to parse.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;

        let names: Vec<_> = tera.get_template_names().collect();
        debug!(count = names.len(), "loaded page templates");

        Ok(Self { tera })
    }

    /// Render a template by file name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when rendering fails.
    pub fn render(&self, template: &str, context: &Context) -> Result<String, AppError> {
        self.tera.render(template, context).map_err(|e| {
            error!(error = ?e, template = %template, "failed to render template");
            AppError::Internal(format!("render {template}: {e}"))
        })
    }
}
