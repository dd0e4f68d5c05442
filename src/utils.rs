// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::FsOps;
use crate::docx::{render_with_options, RenderOptions};
use crate::template_system::TemplateKind;
use crate::types::ResumeData;

/// Download name of an exported resume: `<name>_Resume_<template>.docx`
///
/// Whitespace runs in the name become a single `_`, as do characters that
/// are not allowed in file names. Everything else is kept as typed.
pub fn export_filename(full_name: &str, template: TemplateKind) -> String {
    let mut name = String::with_capacity(full_name.len());
    let mut in_whitespace = false;

    for c in full_name.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => name.push('_'),
            c if c.is_control() => {}
            c => name.push(c),
        }
    }

    if name.is_empty() {
        name.push_str("Resume");
    }

    format!("{}_Resume_{}.docx", name, template)
}

/// Build output file path
pub fn output_file_path(base: &Path, full_name: &str, template: TemplateKind) -> PathBuf {
    base.join(export_filename(full_name, template))
}

/// Render a resume and write it into `output_dir`, returning the written path
pub async fn export_resume(
    resume: &ResumeData,
    template: TemplateKind,
    output_dir: &Path,
    options: &RenderOptions,
) -> Result<PathBuf> {
    let bytes = render_with_options(resume, template, options)
        .with_context(|| format!("Failed to render {} resume", template))?;

    let path = output_file_path(output_dir, &resume.personal_info.full_name, template);
    FsOps::write_bytes(&path, &bytes).await?;

    info!("Exported {} resume to {}", template, path.display());
    Ok(path)
}
