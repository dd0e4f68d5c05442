use super::{experience_entry, EntrySizes, ResumeLayout};
use crate::docx::model::{Alignment, Block, Paragraph, Run, Table, TableCell};
use crate::types::{Education, PersonalInfo, ResumeData};

const HEADING_COLOR: &str = "2563EB";
const LINK_COLOR: &str = "0000EE";

const HEADER_MAIN_PCT: u32 = 60;
const HEADER_CONTACT_PCT: u32 = 40;
const BODY_MAIN_PCT: u32 = 65;
const BODY_SIDE_PCT: u32 = 35;

/// Header band over an experience column beside a skills and education column
pub struct TwoColumnLayout;

impl TwoColumnLayout {
    fn section_header(title: &str) -> Paragraph {
        Paragraph::new()
            .run(
                Run::new(title.to_uppercase())
                    .bold()
                    .color(HEADING_COLOR)
                    .size(20),
            )
            .spacing(0, 200)
    }

    fn identity_cell(resume: &ResumeData) -> TableCell {
        TableCell::new(
            HEADER_MAIN_PCT,
            vec![
                Paragraph::new()
                    .run(Run::new(&resume.personal_info.full_name).bold().size(48))
                    .into(),
                Paragraph::new()
                    .run(Run::new(resume.headline()).bold().size(28))
                    .spacing(0, 100)
                    .into(),
                Paragraph::new()
                    .run(Run::new(&resume.summary).size(18))
                    .into(),
            ],
        )
    }

    fn contact_cell(info: &PersonalInfo) -> TableCell {
        let basics = [
            (info.location.as_str(), None),
            (info.phone.as_str(), None),
            (info.email.as_str(), Some(LINK_COLOR)),
        ];

        let blocks: Vec<Block> = basics
            .into_iter()
            .chain(info.links().into_iter().map(|link| (link, None)))
            .map(|(text, color)| (text.trim(), color))
            .filter(|(text, _)| !text.is_empty())
            .map(|(text, color)| {
                let mut run = Run::new(text);
                if let Some(color) = color {
                    run = run.color(color);
                }
                Block::from(Paragraph::new().run(run).align(Alignment::Right))
            })
            .collect();

        TableCell::new(HEADER_CONTACT_PCT, blocks)
    }

    fn experience_cell(resume: &ResumeData) -> TableCell {
        let sizes = EntrySizes {
            company: Some(24),
            dates: Some(18),
            role: Some(20),
        };
        let tab = TableCell::tab_limit(BODY_MAIN_PCT);

        let mut blocks: Vec<Block> = vec![Self::section_header("Experience").into()];
        for exp in &resume.experience {
            blocks.extend(experience_entry(exp, tab, sizes));
        }

        TableCell::new(BODY_MAIN_PCT, blocks)
    }

    fn side_cell(resume: &ResumeData) -> TableCell {
        let mut blocks: Vec<Block> = vec![Self::section_header("Skills").into()];
        blocks.extend(
            resume
                .skills
                .iter()
                .map(|skill| Paragraph::bullet(skill).into()),
        );

        blocks.push(
            Self::section_header("Education")
                .spacing(400, 200)
                .into(),
        );
        for edu in &resume.education {
            blocks.extend(Self::education_entry(edu));
        }

        TableCell::new(BODY_SIDE_PCT, blocks)
    }

    fn education_entry(edu: &Education) -> Vec<Block> {
        let mut blocks: Vec<Block> = vec![
            Paragraph::new()
                .run(Run::new(&edu.school).bold().size(22))
                .run(Run::new(&edu.graduation_date).bold().size(18).after_tab())
                .right_tab(TableCell::tab_limit(BODY_SIDE_PCT))
                .into(),
            Paragraph::new()
                .run(Run::new(&edu.degree).size(18))
                .into(),
        ];

        if !edu.location.trim().is_empty() {
            blocks.push(
                Paragraph::new()
                    .run(Run::new(&edu.location).size(16))
                    .spacing(0, 200)
                    .into(),
            );
        }

        blocks
    }
}

impl ResumeLayout for TwoColumnLayout {
    fn compose(&self, resume: &ResumeData) -> Vec<Block> {
        let header = Table::single_row(vec![
            Self::identity_cell(resume),
            Self::contact_cell(&resume.personal_info),
        ]);

        let body = Table::single_row(vec![
            Self::experience_cell(resume),
            Self::side_cell(resume),
        ]);

        vec![
            header.into(),
            Paragraph::new().spacing(0, 400).into(),
            body.into(),
        ]
    }
}
