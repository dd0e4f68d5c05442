// src/template_system.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::docx::layout::{
    MinimalistLayout, ModernLayout, ResumeLayout, StandardLayout, TwoColumnLayout,
};

/// The four fixed document layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    #[default]
    Standard,
    Modern,
    Minimalist,
    TwoColumn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: TemplateKind,
    pub name: String,
    pub description: String,
    pub ats_safe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTemplate(pub String);

impl fmt::Display for UnknownTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown template: {}. Use standard, modern, minimalist or two-column",
            self.0
        )
    }
}

impl std::error::Error for UnknownTemplate {}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Standard,
        TemplateKind::Modern,
        TemplateKind::Minimalist,
        TemplateKind::TwoColumn,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TemplateKind::Standard => "standard",
            TemplateKind::Modern => "modern",
            TemplateKind::Minimalist => "minimalist",
            TemplateKind::TwoColumn => "two-column",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Standard => "Standard ATS",
            TemplateKind::Modern => "Modern Accent",
            TemplateKind::Minimalist => "Minimalist Serif",
            TemplateKind::TwoColumn => "Professional Two-Column",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateKind::Standard => "Centered header, ruled section headings, single column",
            TemplateKind::Modern => "Accent-colored name and shaded section headings",
            TemplateKind::Minimalist => "Plain serif layout with thin rules",
            TemplateKind::TwoColumn => "Header band with experience beside skills and education",
        }
    }

    /// Multi-column tables are often misread by applicant tracking parsers
    pub fn is_ats_safe(&self) -> bool {
        !matches!(self, TemplateKind::TwoColumn)
    }

    /// Single dispatch point from template tag to layout strategy
    pub fn layout(&self) -> &'static dyn ResumeLayout {
        match self {
            TemplateKind::Standard => &StandardLayout,
            TemplateKind::Modern => &ModernLayout,
            TemplateKind::Minimalist => &MinimalistLayout,
            TemplateKind::TwoColumn => &TwoColumnLayout,
        }
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: *self,
            name: self.name().to_string(),
            description: self.description().to_string(),
            ats_safe: self.is_ats_safe(),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateKind {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(TemplateKind::Standard),
            "modern" => Ok(TemplateKind::Modern),
            "minimalist" | "minimal" => Ok(TemplateKind::Minimalist),
            "two-column" | "two_column" | "twocolumn" => Ok(TemplateKind::TwoColumn),
            _ => Err(UnknownTemplate(s.to_string())),
        }
    }
}

pub fn list_templates() -> Vec<TemplateInfo> {
    TemplateKind::ALL.iter().map(TemplateKind::info).collect()
}
