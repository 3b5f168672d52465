//! Badge rendering
//!
//! Writes the computed statistics into the SVG templates, keeping every value's right
//! edge aligned through its dotted filler.

pub mod justify;
pub mod svg;

pub use justify::{badge_fields, filler, Field};
pub use svg::{existing_templates, SvgDocument};

use crate::domain::BadgeStats;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid element id pattern: {0}")]
    Pattern(String),
}

impl RenderError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        RenderError::Io { path: path.to_path_buf(), source }
    }
}

/// Set a field's value and its filler. Missing elements are skipped.
pub fn justify(doc: &mut SvgDocument, field: &Field) -> Result<(), RenderError> {
    if !doc.set_text(field.id, &field.text)? {
        tracing::debug!(id = field.id, "Template has no element for field");
    }
    doc.set_text(&field.dots_id(), &field.filler())?;
    Ok(())
}

pub fn render_badge(doc: &mut SvgDocument, stats: &BadgeStats) -> Result<(), RenderError> {
    for field in badge_fields(stats) {
        justify(doc, &field)?;
    }
    Ok(())
}

/// Rewrite a template file in place.
pub fn render_file(path: &Path, stats: &BadgeStats) -> Result<(), RenderError> {
    let mut doc = SvgDocument::load(path)?;
    render_badge(&mut doc, stats)?;
    doc.save(path)?;
    tracing::info!(path = %path.display(), "Rendered badge");
    Ok(())
}
