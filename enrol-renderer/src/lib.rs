//! # enrol-renderer
//!
//! Tera-based view layer that renders the student list as a card grid and
//! as a table (plus a full page holding both).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use enrol_renderer::{Renderer, View};
//! use enrol_core::StudentRecord;
//!
//! fn print_cards(records: &[StudentRecord], query: &str) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(html) = renderer.render(records, query, View::Cards) {
//!             println!("{html}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{EmptyState, ViewContext};
pub use engine::{Renderer, TemplateEngine, View};
pub use error::RenderError;
