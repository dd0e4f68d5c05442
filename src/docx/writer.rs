//! WordprocessingML writer
//!
//! Turns a [`Document`] tree into the XML of `word/document.xml`.
//! Output is built by string concatenation; all text goes through
//! [`escape_text`].

use quick_xml::escape::escape;

use super::model::{Alignment, Block, Document, Paragraph, Run, Table, CONTENT_WIDTH};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Numbering instance defined in numbering.xml for bulleted paragraphs
pub const BULLET_NUM_ID: u32 = 1;

pub struct DocxWriter {
    output: String,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Generate the complete `word/document.xml` for a document
    pub fn generate(mut self, doc: &Document) -> String {
        self.output
            .push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        self.output.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\">\n",
            WORD_NS, REL_NS
        ));
        self.output.push_str("<w:body>\n");

        for block in &doc.blocks {
            self.generate_block(block);
        }

        self.generate_section_properties();
        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>\n");
        self.output
    }

    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(para) => self.generate_paragraph(para),
            Block::Table(table) => self.generate_table(table),
        }
    }

    fn generate_paragraph(&mut self, para: &Paragraph) {
        self.output.push_str("<w:p>\n");
        self.generate_paragraph_properties(para);

        for run in &para.runs {
            self.generate_run(run);
        }

        self.output.push_str("</w:p>\n");
    }

    /// Child order follows the CT_PPr sequence of the schema
    fn generate_paragraph_properties(&mut self, para: &Paragraph) {
        let mut props = String::new();

        if para.heading {
            props.push_str("<w:pStyle w:val=\"Heading1\"/>\n");
        } else if para.bullet {
            props.push_str("<w:pStyle w:val=\"ListParagraph\"/>\n");
        }

        if para.bullet {
            props.push_str(&format!(
                "<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{}\"/></w:numPr>\n",
                BULLET_NUM_ID
            ));
        }

        if let Some(rule) = para.rule_below {
            props.push_str(&format!(
                "<w:pBdr><w:bottom w:val=\"single\" w:sz=\"{}\" w:space=\"1\" w:color=\"{}\"/></w:pBdr>\n",
                rule.size, rule.color
            ));
        }

        if let Some(fill) = para.shading {
            props.push_str(&format!(
                "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>\n",
                fill
            ));
        }

        if let Some(position) = para.right_tab {
            props.push_str(&format!(
                "<w:tabs><w:tab w:val=\"right\" w:pos=\"{}\"/></w:tabs>\n",
                position
            ));
        }

        if para.space_before > 0 || para.space_after > 0 {
            props.push_str(&format!(
                "<w:spacing w:before=\"{}\" w:after=\"{}\"/>\n",
                para.space_before, para.space_after
            ));
        }

        match para.alignment {
            Alignment::Left => {}
            Alignment::Center => props.push_str("<w:jc w:val=\"center\"/>\n"),
            Alignment::Right => props.push_str("<w:jc w:val=\"right\"/>\n"),
        }

        if !props.is_empty() {
            self.output.push_str("<w:pPr>\n");
            self.output.push_str(&props);
            self.output.push_str("</w:pPr>\n");
        }
    }

    fn generate_run(&mut self, run: &Run) {
        self.output.push_str("<w:r>\n");

        let mut props = String::new();
        if run.bold {
            props.push_str("<w:b/>");
        }
        if run.italic {
            props.push_str("<w:i/>");
        }
        if let Some(color) = run.color {
            props.push_str(&format!("<w:color w:val=\"{}\"/>", color));
        }
        if let Some(size) = run.size {
            props.push_str(&format!("<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>", size));
        }
        if !props.is_empty() {
            self.output.push_str(&format!("<w:rPr>{}</w:rPr>\n", props));
        }

        if run.after_tab {
            self.output.push_str("<w:tab/>\n");
        }

        self.output.push_str(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t>\n",
            escape_text(&run.text)
        ));
        self.output.push_str("</w:r>\n");
    }

    fn generate_table(&mut self, table: &Table) {
        self.output.push_str("<w:tbl>\n");

        self.output.push_str("<w:tblPr>\n");
        self.output
            .push_str("<w:tblW w:w=\"5000\" w:type=\"pct\"/>\n");
        self.output.push_str("<w:tblBorders>");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            self.output
                .push_str(&format!("<w:{} w:val=\"nil\"/>", edge));
        }
        self.output.push_str("</w:tblBorders>\n");
        self.output.push_str("<w:tblLayout w:type=\"fixed\"/>\n");
        self.output.push_str("</w:tblPr>\n");

        // Grid from the first row
        if let Some(first) = table.rows.first() {
            self.output.push_str("<w:tblGrid>\n");
            for cell in &first.cells {
                self.output
                    .push_str(&format!("<w:gridCol w:w=\"{}\"/>\n", cell.width_twips()));
            }
            self.output.push_str("</w:tblGrid>\n");
        }

        for row in &table.rows {
            self.output.push_str("<w:tr>\n");

            for cell in &row.cells {
                self.output.push_str("<w:tc>\n");
                // tcW in fiftieths of a percent
                self.output.push_str(&format!(
                    "<w:tcPr><w:tcW w:w=\"{}\" w:type=\"pct\"/></w:tcPr>\n",
                    cell.width_pct * 50
                ));

                for block in &cell.blocks {
                    self.generate_block(block);
                }

                // A cell must end with a paragraph
                if !matches!(cell.blocks.last(), Some(Block::Paragraph(_))) {
                    self.output.push_str("<w:p/>\n");
                }

                self.output.push_str("</w:tc>\n");
            }

            self.output.push_str("</w:tr>\n");
        }

        self.output.push_str("</w:tbl>\n");
    }

    /// US Letter, one-inch margins
    fn generate_section_properties(&mut self) {
        let margin = (12240 - CONTENT_WIDTH) / 2;
        self.output.push_str("<w:sectPr>\n");
        self.output
            .push_str("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>\n");
        self.output.push_str(&format!(
            "<w:pgMar w:top=\"1440\" w:right=\"{0}\" w:bottom=\"1440\" w:left=\"{0}\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\n",
            margin
        ));
        self.output.push_str("</w:sectPr>\n");
    }
}

/// Escape XML markup and drop characters XML 1.0 cannot carry
pub fn escape_text(text: &str) -> String {
    let cleaned: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    escape(cleaned.as_str()).into_owned()
}

/// The `Char` production of XML 1.0
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
