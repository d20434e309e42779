// src/views/mod.rs
//! View helpers: markdown-backed pages and form success/error messages.

use pulldown_cmark::{html, Parser};
use std::fs;
use std::path::Path;
use tracing::warn;

/// What a markdown-backed page shows when its source file is missing. The
/// page still renders; the gap is visible instead of fatal.
pub const MISSING_PAGE_PLACEHOLDER: &str = "<p>This page is not available yet.</p>";

/// Render markdown text to an HTML fragment.
pub fn render_markdown(text: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(text));
    out
}

/// Render the markdown file at `path` to HTML. A missing or unreadable file
/// renders [`MISSING_PAGE_PLACEHOLDER`] rather than failing the page.
pub fn render_markdown_file<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => render_markdown(&text),
        Err(err) => {
            warn!(path = %path.display(), %err, "markdown source missing");
            MISSING_PAGE_PLACEHOLDER.to_string()
        }
    }
}

/// Success and error messages for a form-handling view, with overridable
/// text and a model name for the defaults.
#[derive(Debug, Clone, Default)]
pub struct FormMessages {
    pub model: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl FormMessages {
    pub fn for_model(model: &str) -> Self {
        FormMessages {
            model: Some(model.to_string()),
            ..Default::default()
        }
    }

    fn object_name(&self) -> &str {
        self.model.as_deref().unwrap_or("Form")
    }

    pub fn success_message(&self) -> String {
        self.success
            .clone()
            .unwrap_or_else(|| format!("{} saved.", self.object_name()))
    }

    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| format!("Error saving {}.", self.object_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn markdown_file_renders_to_html() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "# About\n\nSome *emphasis* here.")?;
        tmp.flush()?;

        let html = render_markdown_file(tmp.path());
        assert!(html.contains("<h1>About</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        Ok(())
    }

    #[test]
    fn missing_file_renders_the_placeholder() {
        let html = render_markdown_file("pages/does-not-exist.md");
        assert_eq!(html, MISSING_PAGE_PLACEHOLDER);
    }

    #[test]
    fn form_messages_default_from_the_model_name() {
        let msgs = FormMessages::for_model("Task");
        assert_eq!(msgs.success_message(), "Task saved.");
        assert_eq!(msgs.error_message(), "Error saving Task.");

        let bare = FormMessages::default();
        assert_eq!(bare.success_message(), "Form saved.");
        assert_eq!(bare.error_message(), "Error saving Form.");
    }

    #[test]
    fn explicit_messages_win_over_defaults() {
        let msgs = FormMessages {
            model: Some("Task".into()),
            success: Some("All done!".into()),
            error: None,
        };
        assert_eq!(msgs.success_message(), "All done!");
        assert_eq!(msgs.error_message(), "Error saving Task.");
    }
}
