use super::{compose_single_column, contact_items, ResumeLayout, SingleColumnStyle};
use crate::docx::model::{Block, Paragraph, Run};
use crate::types::{PersonalInfo, ResumeData};

const ACCENT: &str = "1D4ED8";
const HEADING_FILL: &str = "F1F5F9";

/// Large accent-colored name, shaded section headings
pub struct ModernLayout;

impl SingleColumnStyle for ModernLayout {
    fn header(&self, info: &PersonalInfo) -> Vec<Block> {
        let contact = contact_items(
            info,
            [
                info.email.as_str(),
                info.phone.as_str(),
                info.location.as_str(),
            ],
        );

        vec![
            Paragraph::new()
                .run(Run::new(&info.full_name).bold().size(40).color(ACCENT))
                .into(),
            Paragraph::text(contact.join(" \u{2022} "))
                .spacing(0, 200)
                .into(),
        ]
    }

    fn section_header(&self, title: &str) -> Paragraph {
        Paragraph::new()
            .run(Run::new(title.to_uppercase()).bold())
            .heading()
            .shading(HEADING_FILL)
            .spacing(200, 100)
    }
}

impl ResumeLayout for ModernLayout {
    fn compose(&self, resume: &ResumeData) -> Vec<Block> {
        compose_single_column(self, resume)
    }
}
