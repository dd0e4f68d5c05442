//! Resume document renderer
//!
//! `ResumeData` and a `TemplateKind` go in, DOCX bytes come out. The layout
//! picked by the template composes a [`model::Document`], the writer turns it
//! into WordprocessingML and the package step zips all parts. Nothing here
//! touches the network or the filesystem.

pub mod layout;
pub mod model;
pub mod package;
pub mod writer;

#[cfg(test)]
pub mod test_utils;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::RenderError;
use crate::template_system::TemplateKind;
use crate::types::ResumeData;
use model::Document;
use package::{DocxPackage, FIXED_TIMESTAMP};
use writer::DocxWriter;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render even when required contact fields are blank
    pub allow_incomplete: bool,
    /// Creation time written to the document properties, fixed epoch when unset
    pub created_at: Option<DateTime<Utc>>,
}

/// Build the document tree of a resume for the given template
pub fn compose(resume: &ResumeData, template: TemplateKind) -> Document {
    let layout = template.layout();
    let name = resume.personal_info.full_name.trim();

    Document {
        blocks: layout.compose(resume),
        font: layout.body_font(),
        title: if name.is_empty() {
            "Resume".to_string()
        } else {
            format!("{} Resume", name)
        },
        author: name.to_string(),
    }
}

/// Render a resume to DOCX bytes, rejecting blank required contact fields
pub fn render(resume: &ResumeData, template: TemplateKind) -> Result<Vec<u8>, RenderError> {
    render_with_options(resume, template, &RenderOptions::default())
}

pub fn render_with_options(
    resume: &ResumeData,
    template: TemplateKind,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    if !options.allow_incomplete {
        if let Some(field) = resume.personal_info.missing_required().first().copied() {
            return Err(RenderError::MissingField { field });
        }
    }

    let doc = compose(resume, template);
    let document_xml = DocxWriter::new().generate(&doc);
    let created = options.created_at.unwrap_or(FIXED_TIMESTAMP);

    let bytes = DocxPackage::assemble(&doc, document_xml, created).to_bytes()?;
    debug!(
        "Rendered {} template: {} blocks, {} bytes",
        template,
        doc.blocks.len(),
        bytes.len()
    );

    Ok(bytes)
}
