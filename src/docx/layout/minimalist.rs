use super::{compose_single_column, contact_items, ResumeLayout, SingleColumnStyle};
use crate::docx::model::{Block, Paragraph, Run};
use crate::types::{PersonalInfo, ResumeData};

const RULE_COLOR: &str = "BFBFBF";

/// Plain serif layout with thin rules under section headings
pub struct MinimalistLayout;

impl SingleColumnStyle for MinimalistLayout {
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
                .run(Run::new(&info.full_name).bold().size(40).color("000000"))
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
            .rule_below(RULE_COLOR, 4)
            .spacing(200, 100)
    }
}

impl ResumeLayout for MinimalistLayout {
    fn body_font(&self) -> &'static str {
        "Georgia"
    }

    fn compose(&self, resume: &ResumeData) -> Vec<Block> {
        compose_single_column(self, resume)
    }
}
