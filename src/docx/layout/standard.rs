use super::{compose_single_column, contact_items, ResumeLayout, SingleColumnStyle};
use crate::docx::model::{Alignment, Block, Paragraph, Run};
use crate::types::{PersonalInfo, ResumeData};

/// Centered uppercase name, ruled section headings
pub struct StandardLayout;

impl SingleColumnStyle for StandardLayout {
    fn header(&self, info: &PersonalInfo) -> Vec<Block> {
        let contact = contact_items(
            info,
            [
                info.location.as_str(),
                info.phone.as_str(),
                info.email.as_str(),
            ],
        );

        vec![
            Paragraph::new()
                .run(Run::new(info.full_name.to_uppercase()).bold().size(32))
                .align(Alignment::Center)
                .into(),
            Paragraph::text(contact.join(" | "))
                .align(Alignment::Center)
                .spacing(0, 200)
                .into(),
        ]
    }

    fn section_header(&self, title: &str) -> Paragraph {
        Paragraph::new()
            .run(Run::new(title.to_uppercase()).bold())
            .heading()
            .rule_below("000000", 6)
            .spacing(200, 100)
    }
}

impl ResumeLayout for StandardLayout {
    fn compose(&self, resume: &ResumeData) -> Vec<Block> {
        compose_single_column(self, resume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume_data::fixtures::sample_resume;

    fn paragraphs(blocks: &[Block]) -> Vec<&Paragraph> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p),
                Block::Table(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_header_is_centered_and_uppercased() {
        let blocks = StandardLayout.compose(&sample_resume());
        let paras = paragraphs(&blocks);

        assert_eq!(paras[0].plain_text(), "JANE A. DOE");
        assert_eq!(paras[0].alignment, Alignment::Center);
        assert_eq!(
            paras[1].plain_text(),
            "Berlin, DE | +1 555 0100 | jane@example.com | linkedin.com/in/janedoe"
        );
        assert_eq!(paras[1].alignment, Alignment::Center);
    }

    #[test]
    fn test_section_order_and_rules() {
        let blocks = StandardLayout.compose(&sample_resume());
        let headings: Vec<String> = paragraphs(&blocks)
            .into_iter()
            .filter(|p| p.heading)
            .inspect(|p| assert!(p.rule_below.is_some()))
            .map(|p| p.plain_text())
            .collect();

        assert_eq!(headings, vec!["SUMMARY", "EXPERIENCE", "EDUCATION", "SKILLS"]);
    }

    #[test]
    fn test_skills_are_comma_joined() {
        let blocks = StandardLayout.compose(&sample_resume());
        let last = paragraphs(&blocks).last().map(|p| p.plain_text());
        assert_eq!(last.as_deref(), Some("Rust, Kubernetes, PostgreSQL"));
    }
}
