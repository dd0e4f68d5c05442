//! Layout strategies, one per template
//!
//! Each template implements [`ResumeLayout`]; `TemplateKind::layout()` is the
//! only place that picks one. The three single-column templates share the
//! section sequence in [`compose_single_column`] and differ in their header
//! and section heading styles.

mod minimalist;
mod modern;
mod standard;
mod two_column;

pub use minimalist::MinimalistLayout;
pub use modern::ModernLayout;
pub use standard::StandardLayout;
pub use two_column::TwoColumnLayout;

use super::model::{Block, Paragraph, Run, CONTENT_WIDTH};
use crate::types::{Education, Experience, PersonalInfo, ResumeData};

/// Produces document blocks from resume data
pub trait ResumeLayout: Sync {
    /// Font of the Normal style
    fn body_font(&self) -> &'static str {
        "Calibri"
    }

    fn compose(&self, resume: &ResumeData) -> Vec<Block>;
}

/// Styling hooks of the single-column templates
pub trait SingleColumnStyle {
    fn header(&self, info: &PersonalInfo) -> Vec<Block>;

    fn section_header(&self, title: &str) -> Paragraph;
}

/// Identity header, Summary, Experience, Education, Skills
pub fn compose_single_column<S: SingleColumnStyle>(style: &S, resume: &ResumeData) -> Vec<Block> {
    let mut blocks = style.header(&resume.personal_info);

    blocks.push(style.section_header("Summary").into());
    blocks.push(Paragraph::text(&resume.summary).spacing(0, 200).into());

    blocks.push(style.section_header("Experience").into());
    for exp in &resume.experience {
        blocks.extend(experience_entry(exp, CONTENT_WIDTH, EntrySizes::default()));
    }

    blocks.push(style.section_header("Education").into());
    for edu in &resume.education {
        blocks.push(
            Paragraph::new()
                .run(Run::new(&edu.school).bold())
                .run(Run::new(&edu.graduation_date).bold().after_tab())
                .right_tab(CONTENT_WIDTH)
                .into(),
        );
        blocks.push(Paragraph::text(degree_line(edu)).spacing(0, 100).into());
    }

    blocks.push(style.section_header("Skills").into());
    blocks.push(Paragraph::text(resume.skills.join(", ")).into());

    blocks
}

/// Run sizes of an experience entry, `None` keeps the style default
#[derive(Debug, Clone, Copy, Default)]
pub struct EntrySizes {
    pub company: Option<u32>,
    pub dates: Option<u32>,
    pub role: Option<u32>,
}

/// Employer with right-aligned date range, italic role, then one bullet per item
pub fn experience_entry(exp: &Experience, tab_position: u32, sizes: EntrySizes) -> Vec<Block> {
    let mut company = Run::new(&exp.company).bold();
    let mut dates = Run::new(exp.date_range()).bold().after_tab();
    let mut role = Run::new(&exp.role).italic();

    if let Some(size) = sizes.company {
        company = company.size(size);
    }
    if let Some(size) = sizes.dates {
        dates = dates.size(size);
    }
    if let Some(size) = sizes.role {
        role = role.size(size);
    }

    let mut blocks: Vec<Block> = vec![
        Paragraph::new()
            .run(company)
            .run(dates)
            .right_tab(tab_position)
            .spacing(120, 0)
            .into(),
        Paragraph::new().run(role).spacing(0, 100).into(),
    ];

    blocks.extend(
        exp.description
            .iter()
            .map(|bullet| Paragraph::bullet(bullet).into()),
    );

    blocks
}

/// Contact items that are not blank, required fields first, then links
pub fn contact_items<'a>(info: &'a PersonalInfo, basics: [&'a str; 3]) -> Vec<&'a str> {
    basics
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .chain(info.links())
        .collect()
}

/// `degree | location`, location omitted when blank
fn degree_line(edu: &Education) -> String {
    if edu.location.trim().is_empty() {
        edu.degree.clone()
    } else {
        format!("{} | {}", edu.degree, edu.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume_data::fixtures::sample_resume;

    #[test]
    fn test_experience_entry_without_description() {
        let mut exp = sample_resume().experience.remove(0);
        exp.description.clear();

        let blocks = experience_entry(&exp, CONTENT_WIDTH, EntrySizes::default());
        assert_eq!(blocks.len(), 2);

        let Block::Paragraph(header) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(header.plain_text(), "Acme Corp\tJan 2020 – Present");
        assert_eq!(header.right_tab, Some(CONTENT_WIDTH));
        assert!(header.runs[0].bold);
    }

    #[test]
    fn test_experience_entry_keeps_bullet_order() {
        let exp = sample_resume().experience.remove(0);
        let bullets: Vec<String> = experience_entry(&exp, 5000, EntrySizes::default())
            .into_iter()
            .filter_map(|block| match block {
                Block::Paragraph(p) if p.bullet => Some(p.plain_text()),
                _ => None,
            })
            .collect();

        assert_eq!(
            bullets,
            vec!["Led team of 5", "Shipped feature X", "Reduced latency 30%"]
        );
    }

    #[test]
    fn test_contact_items_skip_blanks_and_append_links() {
        let mut info = sample_resume().personal_info;
        info.phone = String::new();
        info.website = Some("janedoe.dev".to_string());

        let items = contact_items(
            &info,
            [info.location.as_str(), info.phone.as_str(), info.email.as_str()],
        );
        assert_eq!(
            items,
            vec![
                "Berlin, DE",
                "jane@example.com",
                "linkedin.com/in/janedoe",
                "janedoe.dev"
            ]
        );
    }

    #[test]
    fn test_degree_line() {
        let mut edu = sample_resume().education.remove(0);
        assert_eq!(degree_line(&edu), "MSc Computer Science | Berlin");

        edu.location.clear();
        assert_eq!(degree_line(&edu), "MSc Computer Science");
    }
}
