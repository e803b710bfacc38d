//! Tera rendering engine: [`View`] enum and [`Renderer`].
//!
//! | View    | Template     | Shows                                   |
//! |---------|--------------|-----------------------------------------|
//! | Cards   | `cards.html` | filtered profile cards or an empty state|
//! | Table   | `table.html` | every record, one row each              |
//! | Page    | `page.html`  | counter, live region, cards and table   |
//!
//! Template names end in `.html`, so Tera autoescapes every value.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use enrol_core::StudentRecord;

use crate::context::ViewContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates, baked in via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("_card.html", include_str!("templates/_partials/card.html.tera")),
    ("_empty.html", include_str!("templates/_partials/empty.html.tera")),
    ("cards.html", include_str!("templates/cards.html.tera")),
    ("table.html", include_str!("templates/table.html.tera")),
    ("page.html", include_str!("templates/page.html.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::TemplateIo { path: path.into(), source }
}

/// `_partials/_Card.html.tera` → `_card.html`: lower-case file name with the
/// `.tera` suffix dropped, so overrides line up with the embedded names.
fn override_name(path: &Path) -> Option<String> {
    let file = path.file_name()?.to_str()?.to_lowercase();
    file.strip_suffix(".tera").map(str::to_string)
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut templates = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current).map_err(|e| io_err(&current, e))? {
            let path = entry.map_err(|e| io_err(&current, e))?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let Some(name) = override_name(&path) else {
                continue;
            };
            let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            templates.push((name, contents));
        }
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = TPLS
        .iter()
        .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
        .collect();
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(templates.into_iter().collect::<Vec<_>>())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// The renderable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Cards,
    Table,
    Page,
}

impl View {
    pub fn all() -> &'static [View] {
        &[View::Cards, View::Table, View::Page]
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            View::Cards => "cards.html",
            View::Table => "table.html",
            View::Page => "page.html",
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine with embedded templates and optional user overrides.
///
/// `user_template_dir` may contain `<name>.tera` files (e.g. `cards.html.tera`)
/// that replace the embedded template of the same name.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    pub fn render(&self, ctx: &ViewContext, view: View) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(view.template_name(), &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders the record list. Create once and reuse.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(None)? })
    }

    /// Embedded templates, overridden by any found in `dir`.
    pub fn with_overrides(dir: &Path) -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(Some(dir))? })
    }

    /// Render `view` for `records`, with cards filtered by `query`.
    pub fn render(
        &self,
        records: &[StudentRecord],
        query: &str,
        view: View,
    ) -> Result<String, RenderError> {
        let ctx = ViewContext::build(records, query);
        self.render_with_context(&ctx, view)
    }

    pub fn render_with_context(&self, ctx: &ViewContext, view: View) -> Result<String, RenderError> {
        self.engine.render(ctx, view)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use enrol_core::{StudentId, INTERESTS_PLACEHOLDER};

    fn rec(id: u64, first: &str, last: &str) -> StudentRecord {
        StudentRecord {
            id: StudentId(id),
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@x.com", first.to_lowercase()),
            programme: "Computer Science".into(),
            year: "2".into(),
            interests: INTERESTS_PLACEHOLDER.into(),
            photo_url: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn renderer_new_succeeds() {
        Renderer::new().expect("Renderer::new should succeed with embedded templates");
    }

    #[test]
    fn all_views_render_without_error() {
        let renderer = Renderer::new().unwrap();
        let records = vec![rec(1, "Ana", "Lee"), rec(2, "Bo", "Ng")];
        for view in View::all() {
            let html = renderer
                .render(&records, "", *view)
                .unwrap_or_else(|e| panic!("render failed for {view:?}: {e}"));
            assert!(html.contains("Ana Lee"), "{view:?} should list Ana Lee");
        }
    }

    #[test]
    fn override_name_strips_tera_suffix() {
        assert_eq!(
            override_name(Path::new("/t/_partials/_Card.html.tera")).as_deref(),
            Some("_card.html")
        );
        assert_eq!(override_name(Path::new("/t/notes.txt")), None);
    }

    #[test]
    fn empty_views_show_empty_state() {
        let renderer = Renderer::new().unwrap();
        let cards = renderer.render(&[], "", View::Cards).unwrap();
        assert!(cards.contains("No profiles yet"));
        let table = renderer.render(&[], "", View::Table).unwrap();
        assert!(!table.contains("<tr data-position"));
    }

    #[test]
    fn no_crlf_in_any_rendered_output() {
        let renderer = Renderer::new().unwrap();
        let records = vec![rec(1, "Ana", "Lee")];
        for view in View::all() {
            let html = renderer.render(&records, "", *view).unwrap();
            assert!(!html.contains('\r'), "{view:?} output contains CR");
        }
    }
}
