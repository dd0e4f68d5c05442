//! ATS resume optimization and DOCX export
//!
//! The optimizer asks a Gemini model to rewrite a plain-text resume against a
//! job description; the renderer turns the resulting structured resume into a
//! Word document using one of four templates.

pub mod cli;
pub mod core;
pub mod docx;
pub mod error;
pub mod optimizer;
pub mod template_system;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::docx::{render, render_with_options, RenderOptions};
pub use crate::error::{OptimizationError, RenderError};
pub use crate::optimizer::{GeminiClient, GeminiSettings, ResumeOptimizer};
pub use crate::template_system::{list_templates, TemplateInfo, TemplateKind};
pub use crate::types::{Education, Experience, OptimizationResult, PersonalInfo, ResumeData};
pub use crate::utils::export_resume;
pub use crate::web::start_web_server;
