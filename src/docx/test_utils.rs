//! Helpers for inspecting rendered DOCX bytes in tests

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

/// Read a part of a DOCX archive as a string
pub fn read_part(docx: &[u8], path: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).expect("valid zip");
    let mut part = archive.by_name(path).expect("part present");
    let mut content = String::new();
    part.read_to_string(&mut content).expect("utf-8 part");
    content
}

/// A paragraph of `word/document.xml` reduced to what tests assert on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphInfo {
    pub text: String,
    pub bullet: bool,
    pub heading: bool,
    pub right_aligned: bool,
    pub centered: bool,
    /// Nesting depth of tables around the paragraph
    pub table_depth: usize,
    /// Index of the enclosing table cell in document order, if any
    pub cell: Option<usize>,
}

/// Walk the body XML and collect every paragraph in document order
pub fn paragraphs(docx: &[u8]) -> Vec<ParagraphInfo> {
    let xml = read_part(docx, "word/document.xml");
    let mut reader = Reader::from_str(&xml);

    let mut result = Vec::new();
    let mut current: Option<ParagraphInfo> = None;
    let mut in_text = false;
    let mut table_depth = 0;
    let mut cell_count = 0;
    let mut cell_stack: Vec<usize> = Vec::new();

    loop {
        match reader.read_event().expect("well-formed document.xml") {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:tc" => {
                    cell_stack.push(cell_count);
                    cell_count += 1;
                }
                b"w:p" => {
                    current = Some(ParagraphInfo {
                        table_depth,
                        cell: cell_stack.last().copied(),
                        ..ParagraphInfo::default()
                    })
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                let name = e.name();
                let para = current.as_mut();
                match (name.as_ref(), para) {
                    (b"w:p", None) => result.push(ParagraphInfo {
                        table_depth,
                        cell: cell_stack.last().copied(),
                        ..ParagraphInfo::default()
                    }),
                    (b"w:numPr", Some(p)) | (b"w:numId", Some(p)) => p.bullet = true,
                    (b"w:tab", Some(p)) => {
                        // <w:tab/> inside a run, not the tab stop definition
                        if e.attributes().count() == 0 {
                            p.text.push('\t');
                        }
                    }
                    (b"w:pStyle", Some(p)) => {
                        let heading = e.attributes().flatten().any(|a| {
                            a.key.as_ref() == b"w:val" && a.value.as_ref() == b"Heading1"
                        });
                        p.heading |= heading;
                    }
                    (b"w:jc", Some(p)) => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"w:val" {
                                p.right_aligned |= attr.value.as_ref() == b"right";
                                p.centered |= attr.value.as_ref() == b"center";
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if in_text {
                    if let Some(p) = current.as_mut() {
                        p.text.push_str(&e.unescape().expect("valid text"));
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(p) = current.take() {
                        result.push(p);
                    }
                }
                b"w:tc" => {
                    cell_stack.pop();
                }
                b"w:tbl" => table_depth -= 1,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    result
}

/// Texts of the paragraphs, in order
pub fn texts(docx: &[u8]) -> Vec<String> {
    paragraphs(docx).into_iter().map(|p| p.text).collect()
}

/// Texts of the bulleted paragraphs, in order
pub fn bullet_texts(docx: &[u8]) -> Vec<String> {
    paragraphs(docx)
        .into_iter()
        .filter(|p| p.bullet)
        .map(|p| p.text)
        .collect()
}
